//! Onboarding Routes
//!
//! - GET /api/v1/onboarding - Whether the setup dialog is showing
//! - POST /api/v1/onboarding/complete - Dismiss it for good

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::OnboardingResponse;
use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// GET /api/v1/onboarding
pub async fn status(State(state): State<Arc<AppState>>) -> Json<OnboardingResponse> {
    let onboarding = state.onboarding.lock().await;
    Json(OnboardingResponse {
        completed: onboarding.is_completed(),
        visible: onboarding.is_visible(),
    })
}

/// POST /api/v1/onboarding/complete
pub async fn complete(State(state): State<Arc<AppState>>) -> ApiResult<Json<OnboardingResponse>> {
    let mut onboarding = state.onboarding.lock().await;
    onboarding.complete()?;

    Ok(Json(OnboardingResponse {
        completed: onboarding.is_completed(),
        visible: onboarding.is_visible(),
    }))
}
