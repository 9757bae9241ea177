//! HTTP endpoint handlers

use std::{sync::Arc, time::Duration};
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::state::{AppState, PlayerSnapshot, SessionSnapshot};
use super::responses::{
    ApiResponse, HealthResponse, LimitRequest, LoadRequest, PlayerResponse, SeekRequest,
    StatusResponse,
};

/// Wrap a session controller reply into an API response
fn session_reply(
    state: &AppState,
    action: &str,
    message: &str,
    result: Result<SessionSnapshot, String>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match result {
        Ok(snapshot) => {
            info!("{} endpoint called - session is {}", action, snapshot.status.as_str());
            state.record_action(action);
            Ok(Json(ApiResponse::new(message.to_string(), snapshot)))
        }
        Err(e) => {
            error!("Failed to {} session: {}", action, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /session/start - Begin the 3-2-1 countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    let result = state.session.start_countdown().await;
    session_reply(&state, "start", "Countdown started", result)
}

/// Handle POST /session/pause - Toggle pause
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    let result = state.session.toggle_pause().await;
    session_reply(&state, "pause", "Pause toggled", result)
}

/// Handle POST /session/stop - Cancel the cadence
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    let result = state.session.stop().await;
    session_reply(&state, "stop", "Session stopped", result)
}

/// Handle POST /session/reset - Cancel the cadence and clear progress
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    let result = state.session.reset().await;
    session_reply(&state, "reset", "Session reset", result)
}

/// Handle PUT /session/limit - Set or clear the playback limit
pub async fn limit_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LimitRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    if request.seconds == Some(0) {
        warn!("Rejecting zero playback limit");
        return Err(StatusCode::BAD_REQUEST);
    }
    let limit = request.seconds.map(Duration::from_secs);
    let result = state.session.set_playback_limit(limit).await;
    let message = match request.seconds {
        Some(seconds) => format!("Playback limit set to {}s", seconds),
        None => "Playback limit cleared".to_string(),
    };
    session_reply(&state, "limit", &message, result)
}

/// Handle GET /session - Current session snapshot
pub async fn session_handler(State(state): State<Arc<AppState>>) -> Json<SessionSnapshot> {
    Json(state.session.snapshot())
}

/// Handle POST /player/load - Load a track of the given length
pub async fn player_load_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoadRequest>,
) -> Result<Json<PlayerResponse>, StatusCode> {
    let duration = seconds_from_request(request.duration_seconds)?;
    player_reply(
        state.update_player("player-load", |player| player.load(duration)),
        "Track loaded",
    )
}

/// Handle POST /player/toggle - Play or pause
pub async fn player_toggle_handler(State(state): State<Arc<AppState>>) -> Result<Json<PlayerResponse>, StatusCode> {
    player_reply(
        state.update_player("player-toggle", |player| {
            player.toggle();
        }),
        "Playback toggled",
    )
}

/// Handle POST /player/stop - Pause playback
pub async fn player_stop_handler(State(state): State<Arc<AppState>>) -> Result<Json<PlayerResponse>, StatusCode> {
    player_reply(
        state.update_player("player-stop", |player| player.stop()),
        "Playback stopped",
    )
}

/// Handle POST /player/seek - Move the play head
pub async fn player_seek_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SeekRequest>,
) -> Result<Json<PlayerResponse>, StatusCode> {
    let position = seconds_from_request(request.position_seconds)?;
    player_reply(
        state.update_player("player-seek", |player| player.seek(position)),
        "Play head moved",
    )
}

/// Handle GET /player - Current player snapshot
pub async fn player_handler(State(state): State<Arc<AppState>>) -> Result<Json<PlayerResponse>, StatusCode> {
    player_reply(state.get_player_state(), "Player state")
}

fn seconds_from_request(seconds: f64) -> Result<Duration, StatusCode> {
    Duration::try_from_secs_f64(seconds).map_err(|e| {
        warn!("Rejecting invalid duration {}: {}", seconds, e);
        StatusCode::BAD_REQUEST
    })
}

fn player_reply(
    result: Result<PlayerSnapshot, String>,
    message: &str,
) -> Result<Json<PlayerResponse>, StatusCode> {
    match result {
        Ok(player) => Ok(Json(PlayerResponse::new(message.to_string(), player))),
        Err(e) => {
            error!("Failed to update player: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - Return current system status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let player = match state.get_player_state() {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to get player state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        session: state.session.snapshot(),
        steps: state.steps.describe(),
        cycle_seconds: state.steps.cycle_seconds(),
        player,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
