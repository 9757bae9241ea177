//! Breathing timer engine
//!
//! A pure step sequencer: it knows which step of the cycle is current and how
//! many whole seconds are left in it. It has no clock, so the owner decides
//! when a second has passed and calls `decrement()`.
//!
//! ```text
//! start -> decrement* -> (is_at_zero) -> advance -> decrement* -> ...
//! ```

use super::{Step, StepSequence};

/// Cyclic per-step countdown over a fixed sequence
#[derive(Debug, Clone)]
pub struct TimerEngine {
    steps: StepSequence,
    step_index: usize,
    remaining_seconds: u32,
}

impl TimerEngine {
    /// Create an engine in its cleared state (first step, nothing remaining)
    pub fn new(steps: StepSequence) -> Self {
        Self {
            steps,
            step_index: 0,
            remaining_seconds: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn step_index(&self) -> usize {
        self.step_index
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn steps(&self) -> &StepSequence {
        &self.steps
    }

    pub fn current_step(&self) -> Step {
        self.steps
            .get(self.step_index)
            .copied()
            .unwrap_or_else(|| *self.steps.first())
    }

    pub fn is_at_zero(&self) -> bool {
        self.remaining_seconds == 0
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Rewind to the first step with its full duration
    pub fn start(&mut self) {
        self.step_index = 0;
        self.remaining_seconds = self.steps.first().duration;
    }

    /// Remove one second, flooring at zero
    pub fn decrement(&mut self) {
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
    }

    /// Move to the next step, wrapping to the first after the last
    pub fn advance(&mut self) {
        self.step_index = (self.step_index + 1) % self.steps.len();
        self.remaining_seconds = self.current_step().duration;
    }

    /// Back to the zero-equivalent display state
    pub fn clear(&mut self) {
        self.step_index = 0;
        self.remaining_seconds = 0;
    }
}
