//! API response and request structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{PlayerSnapshot, SessionSnapshot};

/// API response structure for session command endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub session: SessionSnapshot,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(message: String, session: SessionSnapshot) -> Self {
        Self {
            status: session.status.as_str().to_string(),
            message,
            timestamp: Utc::now(),
            session,
        }
    }
}

/// API response structure for music player endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerResponse {
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub player: PlayerSnapshot,
}

impl PlayerResponse {
    pub fn new(message: String, player: PlayerSnapshot) -> Self {
        Self {
            message,
            timestamp: Utc::now(),
            player,
        }
    }
}

/// Full status response with session, cycle and player information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub session: SessionSnapshot,
    pub steps: String,
    pub cycle_seconds: u64,
    pub player: PlayerSnapshot,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Body of `PUT /session/limit`; `null` clears the limit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitRequest {
    pub seconds: Option<u64>,
}

/// Body of `POST /player/load`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadRequest {
    pub duration_seconds: f64,
}

/// Body of `POST /player/seek`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeekRequest {
    pub position_seconds: f64,
}
