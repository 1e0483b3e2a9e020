//! Medication Routes
//!
//! - GET /api/v1/medications - Today's schedule and adherence
//! - POST /api/v1/medications - Add a scheduled dose
//! - POST /api/v1/medications/:id/toggle - Flip pending/taken
//! - POST /api/v1/medications/side-effects - Log an observation

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::{MedicationListResponse, SideEffectRequest};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::medication::{MedicationEntry, MedicationTracker, NewMedication, SideEffectReport};

fn list_response(tracker: &MedicationTracker) -> MedicationListResponse {
    MedicationListResponse {
        entries: tracker.entries().to_vec(),
        pending: tracker.pending().into_iter().cloned().collect(),
        taken: tracker.taken().into_iter().cloned().collect(),
        adherence: tracker.adherence(),
        adherence_series: tracker.adherence_series(),
    }
}

/// GET /api/v1/medications
pub async fn list(State(state): State<Arc<AppState>>) -> Json<MedicationListResponse> {
    let tracker = state.medication.lock().await;
    Json(list_response(&tracker))
}

/// POST /api/v1/medications
pub async fn add(
    State(state): State<Arc<AppState>>,
    Json(request): Json<NewMedication>,
) -> ApiResult<(StatusCode, Json<MedicationEntry>)> {
    let mut tracker = state.medication.lock().await;
    let entry = tracker.add(request)?;

    tracing::info!(id = entry.id, name = %entry.name, "Medication added via API");
    Ok((StatusCode::CREATED, Json(entry)))
}

/// POST /api/v1/medications/:id/toggle
pub async fn toggle(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
) -> ApiResult<Json<MedicationEntry>> {
    let mut tracker = state.medication.lock().await;
    let entry = tracker.toggle(id)?;
    Ok(Json(entry))
}

/// POST /api/v1/medications/side-effects
pub async fn report_side_effect(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SideEffectRequest>,
) -> ApiResult<(StatusCode, Json<SideEffectReport>)> {
    let mut tracker = state.medication.lock().await;
    let report = tracker.log_side_effect(&request.observation)?;
    Ok((StatusCode::CREATED, Json(report)))
}
