//! Dashboard and Activities Routes
//!
//! Both pages are static; nothing here touches the store.
//!
//! - GET /api/v1/dashboard
//! - GET /api/v1/activities

use axum::Json;

use crate::activities::{recommendations, upcoming_activities};
use crate::api::dto::ActivitiesResponse;
use crate::dashboard::DashboardOverview;

/// GET /api/v1/dashboard
pub async fn overview() -> Json<DashboardOverview> {
    Json(DashboardOverview::build())
}

/// GET /api/v1/activities
pub async fn activities() -> Json<ActivitiesResponse> {
    Json(ActivitiesResponse {
        upcoming: upcoming_activities(),
        recommendations: recommendations(),
    })
}
