//! Notifications emitted by a breathing session

use serde::{Deserialize, Serialize};

use super::Step;

/// Every observable change of a session produces one of these.
/// Presentation and audio collaborators subscribe to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// One beat of the 3-2-1 countdown, including the initial 3 and the final 0
    CountdownUpdated { value: u8 },
    /// The countdown finished and the first step is loaded
    BreathingStarted,
    PhaseChanged { step_index: usize, step: Step },
    TickUpdated { step_index: usize, remaining_seconds: u32 },
    PauseToggled { paused: bool },
    /// The cadence was cancelled without clearing state
    Stopped,
    SessionReset,
}

impl SessionEvent {
    /// Short name used in log lines
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::CountdownUpdated { .. } => "countdown-updated",
            SessionEvent::BreathingStarted => "breathing-started",
            SessionEvent::PhaseChanged { .. } => "phase-changed",
            SessionEvent::TickUpdated { .. } => "tick-updated",
            SessionEvent::PauseToggled { .. } => "pause-toggled",
            SessionEvent::Stopped => "stopped",
            SessionEvent::SessionReset => "session-reset",
        }
    }
}
