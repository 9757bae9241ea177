//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/session", get(session_handler))
        .route("/session/start", post(start_handler))
        .route("/session/pause", post(pause_handler))
        .route("/session/stop", post(stop_handler))
        .route("/session/reset", post(reset_handler))
        .route("/session/limit", put(limit_handler))
        .route("/player", get(player_handler))
        .route("/player/load", post(player_load_handler))
        .route("/player/toggle", post(player_toggle_handler))
        .route("/player/stop", post(player_stop_handler))
        .route("/player/seek", post(player_seek_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::{
        state::{Session, StepSequence},
        tasks::{SessionController, TICK_PERIOD},
    };

    fn app() -> Router {
        let steps = StepSequence::default();
        let (handle, _task) = SessionController::spawn(Session::new(steps.clone(), None), TICK_PERIOD);
        let state = Arc::new(AppState::new(20554, "127.0.0.1".to_string(), steps, handle));
        create_router(state)
    }

    async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(body) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(body.to_string())
            }
            None => Body::empty(),
        };
        let response = app.clone().oneshot(request.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn start_reports_countdown() {
        let app = app();
        let (status, body) = call(&app, Method::POST, "/session/start", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "countdown");
        assert_eq!(body["session"]["countdown"], 3);

        let (_, session) = call(&app, Method::GET, "/session", None).await;
        assert_eq!(session["status"], "countdown");
    }

    #[tokio::test]
    async fn pause_outside_breathing_is_a_no_op() {
        let app = app();
        let (status, body) = call(&app, Method::POST, "/session/pause", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "idle");
        assert_eq!(body["session"]["is_paused"], false);
    }

    #[tokio::test]
    async fn limit_can_be_set_and_cleared() {
        let app = app();
        let (status, body) =
            call(&app, Method::PUT, "/session/limit", Some(json!({ "seconds": 600 }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["session"]["playback_limit_seconds"], 600);
        let (_, session) = call(&app, Method::GET, "/session", None).await;
        assert_eq!(session["playback_limit_seconds"], 600);
        let (_, status) = call(&app, Method::GET, "/status", None).await;
        assert_eq!(status["session"]["playback_limit_seconds"], 600);

        let (status, body) =
            call(&app, Method::PUT, "/session/limit", Some(json!({ "seconds": null }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["session"]["playback_limit_seconds"], Value::Null);
        let (_, session) = call(&app, Method::GET, "/session", None).await;
        assert_eq!(session["playback_limit_seconds"], Value::Null);

        let (status, _) =
            call(&app, Method::PUT, "/session/limit", Some(json!({ "seconds": 0 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn reset_returns_initial_state() {
        let app = app();
        call(&app, Method::POST, "/session/start", None).await;
        let (status, body) = call(&app, Method::POST, "/session/reset", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "idle");
        assert_eq!(body["session"]["countdown"], 3);
        assert_eq!(body["session"]["remaining_seconds"], 0);
    }

    #[tokio::test]
    async fn player_round_trip() {
        let app = app();
        let (status, body) = call(
            &app,
            Method::POST,
            "/player/load",
            Some(json!({ "duration_seconds": 180.0 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["player"]["loaded"], true);
        assert_eq!(body["player"]["duration_seconds"], 180.0);

        let (_, body) = call(
            &app,
            Method::POST,
            "/player/seek",
            Some(json!({ "position_seconds": 400.0 })),
        )
        .await;
        assert_eq!(body["player"]["position_seconds"], 180.0);

        let (status, _) = call(
            &app,
            Method::POST,
            "/player/seek",
            Some(json!({ "position_seconds": -1.0 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn status_describes_cycle_and_last_action() {
        let app = app();
        call(&app, Method::POST, "/session/stop", None).await;
        let (status, body) = call(&app, Method::GET, "/status", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["steps"], "Inhale (4s) > Hold (7s) > Exhale (8s)");
        assert_eq!(body["cycle_seconds"], 19);
        assert_eq!(body["last_action"], "stop");
        assert_eq!(body["session"]["status"], "idle");
    }

    #[tokio::test]
    async fn health_is_ok() {
        let app = app();
        let (status, body) = call(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}
