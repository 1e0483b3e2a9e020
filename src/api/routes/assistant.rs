//! AI Guardian Routes
//!
//! - GET /api/v1/guardian/messages - Conversation so far
//! - POST /api/v1/guardian/messages - Send a message; the reply lands later
//! - GET /api/v1/guardian/interventions - Recent interventions feed

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::{ChatRequest, ChatResponse, ChatSubmitResponse, InterventionsResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::assistant::{recent_interventions, CANNED_REPLIES};

/// GET /api/v1/guardian/messages
pub async fn messages(State(state): State<Arc<AppState>>) -> Json<ChatResponse> {
    Json(ChatResponse {
        messages: state.chat.messages().await,
        suggested_prompts: CANNED_REPLIES
            .iter()
            .map(|(prompt, _)| prompt.to_string())
            .collect(),
    })
}

/// POST /api/v1/guardian/messages
///
/// Returns 202: the user message is stored now, the assistant's answer
/// shows up in `GET /guardian/messages` once the reply delay has passed.
pub async fn send(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> ApiResult<(StatusCode, Json<ChatSubmitResponse>)> {
    let (message, _pending) = state.chat.submit(&request.text).await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(ChatSubmitResponse {
            message,
            reply_delay_ms: state.chat_reply_delay_ms,
        }),
    ))
}

/// GET /api/v1/guardian/interventions
pub async fn interventions() -> Json<InterventionsResponse> {
    Json(InterventionsResponse {
        interventions: recent_interventions(),
    })
}
