//! Device Routes
//!
//! - GET /api/v1/devices/limits - Every slider with its bounds
//! - PUT /api/v1/devices/limits/:category - Move one slider
//! - GET /api/v1/devices/usage - Today's usage by app and category

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{LimitsResponse, SetLimitRequest, UsageResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::devices::{mock_usage, total_hours, usage_by_app, usage_by_category, LimitCategory, LimitView};

/// GET /api/v1/devices/limits
pub async fn limits(State(state): State<Arc<AppState>>) -> Json<LimitsResponse> {
    let limits = state.limits.lock().await;
    Json(LimitsResponse {
        limits: limits.views(),
    })
}

/// PUT /api/v1/devices/limits/:category
///
/// Out-of-range hours are refused with 400; accepted values are snapped to
/// the slider step and the stored value is returned.
pub async fn set_limit(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
    Json(request): Json<SetLimitRequest>,
) -> ApiResult<Json<LimitView>> {
    let category: LimitCategory = category.parse()?;

    let mut limits = state.limits.lock().await;
    limits.set_limit(category, request.hours)?;

    limits
        .views()
        .into_iter()
        .find(|view| view.category == category)
        .map(Json)
        .ok_or_else(|| ApiError::Internal(format!("limit {} missing after write", category.as_str())))
}

/// GET /api/v1/devices/usage
pub async fn usage() -> Json<UsageResponse> {
    let apps = mock_usage();
    Json(UsageResponse {
        by_app: usage_by_app(&apps),
        by_category: usage_by_category(&apps),
        total_hours: total_hours(&apps),
        apps,
    })
}
