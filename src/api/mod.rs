//! Guardian Local API
//!
//! JSON view of every page over the local store, built with Axum.
//! Bound to loopback by default; there is no remote sync.
//!
//! # Endpoints
//!
//! ## Shell
//! - `GET /api/v1/dashboard` - Summary cards and weekly chart
//! - `GET /api/v1/onboarding` - Setup dialog state
//! - `POST /api/v1/onboarding/complete` - Finish setup
//!
//! ## Medication
//! - `GET /api/v1/medications` - Today's schedule
//! - `POST /api/v1/medications` - Add a dose
//! - `POST /api/v1/medications/:id/toggle` - Mark taken / undo
//! - `POST /api/v1/medications/side-effects` - Report a side effect
//!
//! ## Devices
//! - `GET /api/v1/devices/limits` - Limit sliders
//! - `PUT /api/v1/devices/limits/:category` - Adjust a slider
//! - `GET /api/v1/devices/usage` - Usage breakdown
//!
//! ## Activities
//! - `GET /api/v1/activities` - Upcoming and recommended
//!
//! ## AI Guardian
//! - `GET /api/v1/guardian/messages` - Conversation
//! - `POST /api/v1/guardian/messages` - Send a message
//! - `GET /api/v1/guardian/interventions` - Interventions feed
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,no_run
//! use guardian::api::{serve, AppState};
//! use guardian::config::Config;
//! use guardian::shell::Shell;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let shell = Shell::from_config(&config)?;
//!
//!     let state = AppState::new(&shell)?;
//!     serve(state, &config.api).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ApiConfig;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    router(Arc::new(state))
}

fn router(shared_state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        // Shell routes
        .route("/dashboard", get(routes::dashboard::overview))
        .route("/onboarding", get(routes::onboarding::status))
        .route("/onboarding/complete", post(routes::onboarding::complete))
        // Medication routes
        .route(
            "/medications",
            get(routes::medication::list).post(routes::medication::add),
        )
        .route("/medications/:id/toggle", post(routes::medication::toggle))
        .route(
            "/medications/side-effects",
            post(routes::medication::report_side_effect),
        )
        // Device routes
        .route("/devices/limits", get(routes::devices::limits))
        .route("/devices/limits/:category", put(routes::devices::set_limit))
        .route("/devices/usage", get(routes::devices::usage))
        // Activity routes
        .route("/activities", get(routes::dashboard::activities))
        // AI Guardian routes
        .route(
            "/guardian/messages",
            get(routes::assistant::messages).post(routes::assistant::send),
        )
        .route("/guardian/interventions", get(routes::assistant::interventions));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/", get(routes::health::full_health));

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the API server
///
/// Pending onboarding and chat callbacks are cancelled on shutdown.
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let shared_state = Arc::new(state);
    let router = router(Arc::clone(&shared_state));

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(store = shared_state.store_backend, "Guardian API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    shared_state.close().await;
    tracing::info!("Guardian API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimingConfig;
    use crate::shell::Shell;
    use crate::store::{MemoryStore, PersistentStore, DEVICE_LIMITS_KEY};
    use crate::timer::SystemClock;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use std::time::Duration;
    use tower::util::ServiceExt;

    fn create_test_app() -> (Router, Arc<dyn PersistentStore>) {
        let store: Arc<dyn PersistentStore> = Arc::new(MemoryStore::new());
        let timing = TimingConfig {
            assistant_reply_delay_ms: 1000,
            onboarding_reveal_delay_ms: 1000,
        };
        let shell = Shell::new(Arc::clone(&store), Arc::new(SystemClock), timing);

        (build_router(AppState::new(&shell).unwrap()), store)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let (app, _store) = create_test_app();
        let response = app.oneshot(get_request("/health/live")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let (app, _store) = create_test_app();
        let response = app.oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["store"], "memory");
        assert_eq!(body["nav"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_dashboard() {
        let (app, _store) = create_test_app();
        let response = app.oneshot(get_request("/api/v1/dashboard")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["cards"].as_array().unwrap().len(), 4);
        assert_eq!(body["weekly_screen_time"].as_array().unwrap().len(), 7);
    }

    #[tokio::test]
    async fn test_medications_default_schedule() {
        let (app, _store) = create_test_app();
        let response = app.oneshot(get_request("/api/v1/medications")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["entries"].as_array().unwrap().len(), 4);
        assert_eq!(body["pending"].as_array().unwrap().len(), 2);
        assert_eq!(body["adherence"]["taken"], 2);
    }

    #[tokio::test]
    async fn test_toggle_medication() {
        let (app, _store) = create_test_app();

        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/v1/medications/3/toggle", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["taken"], true);
        assert!(body["takenAt"].is_string());

        let response = app
            .oneshot(json_request("POST", "/api/v1/medications/99/toggle", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_add_medication() {
        let (app, _store) = create_test_app();
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/medications",
                r#"{"name": "Melatonin", "dosage": "1mg", "time": "8:00 PM"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = body_json(response).await;
        assert_eq!(body["id"], 5);
        assert_eq!(body["taken"], false);
    }

    #[tokio::test]
    async fn test_side_effect_requires_text() {
        let (app, _store) = create_test_app();
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/medications/side-effects",
                r#"{"observation": "  "}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_set_limit_persists() {
        let (app, store) = create_test_app();
        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                "/api/v1/devices/limits/gaming",
                r#"{"hours": 3.5}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["hours"], 3.5);

        let blob = store.get(DEVICE_LIMITS_KEY).unwrap().unwrap();
        let stored: Value = serde_json::from_str(&blob).unwrap();
        assert_eq!(stored["gaming"], 3.5);
        assert_eq!(stored["social"], 1.0);

        let response = app
            .oneshot(json_request(
                "PUT",
                "/api/v1/devices/limits/gaming",
                r#"{"hours": 9.0}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_limit_category() {
        let (app, _store) = create_test_app();
        let response = app
            .oneshot(json_request(
                "PUT",
                "/api/v1/devices/limits/snacks",
                r#"{"hours": 1.0}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let (app, _store) = create_test_app();
        let response = app
            .oneshot(json_request("POST", "/api/v1/medications", "not json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test(start_paused = true)]
    async fn test_chat_reply_arrives_later() {
        let (app, _store) = create_test_app();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/guardian/messages",
                r#"{"text": "Suggest an outdoor activity"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);

        let body = body_json(app.clone().oneshot(get_request("/api/v1/guardian/messages")).await.unwrap()).await;
        assert_eq!(body["messages"].as_array().unwrap().len(), 2);

        tokio::time::sleep(Duration::from_millis(1100)).await;

        let body = body_json(app.oneshot(get_request("/api/v1/guardian/messages")).await.unwrap()).await;
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2]["sender"], "assistant");
    }

    #[tokio::test(start_paused = true)]
    async fn test_onboarding_flow() {
        let (app, store) = create_test_app();

        let body = body_json(app.clone().oneshot(get_request("/api/v1/onboarding")).await.unwrap()).await;
        assert_eq!(body["visible"], false);

        tokio::time::sleep(Duration::from_millis(1100)).await;
        let body = body_json(app.clone().oneshot(get_request("/api/v1/onboarding")).await.unwrap()).await;
        assert_eq!(body["visible"], true);

        let response = app
            .oneshot(json_request("POST", "/api/v1/onboarding/complete", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["completed"], true);
        assert_eq!(body["visible"], false);

        assert_eq!(store.get("has_onboarded").unwrap().as_deref(), Some("true"));
    }
}
