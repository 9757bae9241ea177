//! Session bookkeeping and the snapshot published to observers

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::Phase;

/// Number the countdown starts from
pub const COUNTDOWN_START: u8 = 3;

/// Coarse stage of a session as seen from outside
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Idle,
    Countdown,
    Active,
    Paused,
}

impl SessionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionStatus::Idle => "idle",
            SessionStatus::Countdown => "countdown",
            SessionStatus::Active => "active",
            SessionStatus::Paused => "paused",
        }
    }
}

/// Countdown, pause flag and active-time accounting for one session
#[derive(Debug, Clone)]
pub struct SessionState {
    pub status: SessionStatus,
    pub countdown_remaining: u8,
    pub is_paused: bool,
    /// Active (unpaused) time since breathing began
    pub elapsed: Duration,
    /// Cap on `elapsed`; `None` means unbounded. Survives resets.
    pub playback_limit: Option<Duration>,
}

impl SessionState {
    /// Create an idle session state with the given limit
    pub fn new(playback_limit: Option<Duration>) -> Self {
        Self {
            status: SessionStatus::Idle,
            countdown_remaining: COUNTDOWN_START,
            is_paused: false,
            elapsed: Duration::ZERO,
            playback_limit,
        }
    }

    /// Forget everything about the current run, keeping the limit
    pub fn clear(&mut self) {
        *self = Self::new(self.playback_limit);
    }

    /// Whether the active time has reached the limit
    pub fn limit_reached(&self) -> bool {
        self.playback_limit
            .map_or(false, |limit| self.elapsed >= limit)
    }

    /// Whether a cadence should be running for this state
    pub fn needs_cadence(&self) -> bool {
        !matches!(self.status, SessionStatus::Idle)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Read-only view of a session, published after every change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    pub countdown: u8,
    pub is_paused: bool,
    pub step_index: usize,
    pub phase: Phase,
    pub phase_label: String,
    pub scale: f32,
    pub remaining_seconds: u32,
    pub elapsed_seconds: u64,
    pub playback_limit_seconds: Option<u64>,
}
