//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tracing::info;

use super::{PlayerSnapshot, PlayerState, StepSequence};
use crate::tasks::SessionHandle;

/// Shared state behind the HTTP handlers
#[derive(Debug)]
pub struct AppState {
    /// Handle to the breathing session controller task
    pub session: SessionHandle,
    /// Breathing cycle the session runs
    pub steps: StepSequence,
    /// Music player transport
    pub player_state: Arc<Mutex<PlayerState>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    /// Create a new AppState around a running session controller
    pub fn new(port: u16, host: String, steps: StepSequence, session: SessionHandle) -> Self {
        Self {
            session,
            steps,
            player_state: Arc::new(Mutex::new(PlayerState::new())),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        }
    }

    /// Remember the most recent user command
    pub fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Apply a change to the music player and return the resulting snapshot
    pub fn update_player<F>(&self, action: &str, updater: F) -> Result<PlayerSnapshot, String>
    where
        F: FnOnce(&mut PlayerState),
    {
        let mut player = self.player_state.lock()
            .map_err(|e| format!("Failed to lock player state: {}", e))?;

        updater(&mut *player);
        let snapshot = player.snapshot();
        drop(player); // Release the lock early

        info!("Player action: {}", action);
        self.record_action(action);
        Ok(snapshot)
    }

    /// Get current music player state
    pub fn get_player_state(&self) -> Result<PlayerSnapshot, String> {
        self.player_state.lock()
            .map(|player| player.snapshot())
            .map_err(|e| format!("Failed to lock player state: {}", e))
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
