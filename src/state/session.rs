//! Breathing session state machine
//!
//! `Session` combines the timer engine with countdown, pause and limit
//! bookkeeping. It has no clock of its own; the session controller task calls
//! `on_cadence()` once per period and forwards user commands. Every method
//! returns the events the change produced so the caller can publish them.
//!
//! ```text
//! Idle -> Countdown(3,2,1,0) -> Active <-> Paused
//!   ^__________ stop / reset / limit reached ____|
//! ```

use std::time::Duration;

use tracing::{debug, info};

use super::{
    session_state::COUNTDOWN_START, SessionEvent, SessionSnapshot, SessionState, SessionStatus,
    StepSequence, TimerEngine,
};

#[derive(Debug)]
pub struct Session {
    engine: TimerEngine,
    state: SessionState,
}

impl Session {
    /// Create an idle session over `steps`
    pub fn new(steps: StepSequence, playback_limit: Option<Duration>) -> Self {
        Self {
            engine: TimerEngine::new(steps),
            state: SessionState::new(playback_limit),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn status(&self) -> SessionStatus {
        self.state.status
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let step = self.engine.current_step();
        let scale = match self.state.status {
            SessionStatus::Active | SessionStatus::Paused => step.phase.scale(),
            SessionStatus::Idle | SessionStatus::Countdown => 1.0,
        };
        SessionSnapshot {
            status: self.state.status,
            countdown: self.state.countdown_remaining,
            is_paused: self.state.is_paused,
            step_index: self.engine.step_index(),
            phase: step.phase,
            phase_label: step.phase.label().to_string(),
            scale,
            remaining_seconds: self.engine.remaining_seconds(),
            elapsed_seconds: self.state.elapsed.as_secs(),
            playback_limit_seconds: self.state.playback_limit.map(|limit| limit.as_secs()),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin (or restart) the 3-2-1 countdown from a clean slate
    pub fn start_countdown(&mut self) -> Vec<SessionEvent> {
        if self.state.needs_cadence() {
            debug!("Countdown requested while {:?}, restarting", self.state.status);
        }
        self.engine.clear();
        self.state.clear();
        self.state.status = SessionStatus::Countdown;
        info!("Breathing countdown started");
        vec![SessionEvent::CountdownUpdated {
            value: COUNTDOWN_START,
        }]
    }

    /// Advance whatever the current stage runs on its one-second cadence
    pub fn on_cadence(&mut self, period: Duration) -> Vec<SessionEvent> {
        match self.state.status {
            SessionStatus::Countdown => self.countdown_beat(),
            SessionStatus::Active => self.tick(period),
            SessionStatus::Paused | SessionStatus::Idle => Vec::new(),
        }
    }

    /// One breathing tick: consume a second, enforce the limit, advance on zero
    pub fn tick(&mut self, period: Duration) -> Vec<SessionEvent> {
        if self.state.status != SessionStatus::Active || self.state.is_paused {
            return Vec::new();
        }

        self.engine.decrement();
        self.state.elapsed += period;
        let mut events = vec![SessionEvent::TickUpdated {
            step_index: self.engine.step_index(),
            remaining_seconds: self.engine.remaining_seconds(),
        }];

        if self.state.limit_reached() {
            info!(
                "Playback limit reached after {}s of breathing, resetting session",
                self.state.elapsed.as_secs()
            );
            events.extend(self.reset());
            return events;
        }

        if self.engine.is_at_zero() {
            self.engine.advance();
            let step = self.engine.current_step();
            debug!("Advanced to step {} ({})", self.engine.step_index(), step.phase);
            events.push(SessionEvent::PhaseChanged {
                step_index: self.engine.step_index(),
                step,
            });
        }

        events
    }

    /// Flip between active and paused; ignored outside a running breathing phase
    pub fn toggle_pause(&mut self) -> Vec<SessionEvent> {
        let paused = match self.state.status {
            SessionStatus::Active => true,
            SessionStatus::Paused => false,
            other => {
                debug!("Ignoring pause toggle while {:?}", other);
                return Vec::new();
            }
        };
        self.state.is_paused = paused;
        self.state.status = if paused {
            SessionStatus::Paused
        } else {
            SessionStatus::Active
        };
        info!("Breathing session {}", if paused { "paused" } else { "resumed" });
        vec![SessionEvent::PauseToggled { paused }]
    }

    /// Cancel the cadence, leaving the engine where it is
    pub fn stop(&mut self) -> Vec<SessionEvent> {
        if self.state.status == SessionStatus::Idle {
            return Vec::new();
        }
        self.state.status = SessionStatus::Idle;
        info!("Breathing session stopped");
        vec![SessionEvent::Stopped]
    }

    /// Stop and return every counter to its initial value
    pub fn reset(&mut self) -> Vec<SessionEvent> {
        let mut events = self.stop();
        self.engine.clear();
        self.state.clear();
        events.push(SessionEvent::SessionReset);
        events
    }

    /// Change the active-time cap; checked on the next tick
    pub fn set_playback_limit(&mut self, limit: Option<Duration>) {
        info!(
            "Playback limit set to {}",
            limit.map_or("unbounded".to_string(), |limit| format!("{}s", limit.as_secs()))
        );
        self.state.playback_limit = limit;
    }

    fn countdown_beat(&mut self) -> Vec<SessionEvent> {
        self.state.countdown_remaining = self.state.countdown_remaining.saturating_sub(1);
        let mut events = vec![SessionEvent::CountdownUpdated {
            value: self.state.countdown_remaining,
        }];
        if self.state.countdown_remaining == 0 {
            events.extend(self.begin_breathing());
        }
        events
    }

    fn begin_breathing(&mut self) -> Vec<SessionEvent> {
        self.engine.start();
        self.state.status = SessionStatus::Active;
        self.state.is_paused = false;
        self.state.elapsed = Duration::ZERO;
        let step = self.engine.current_step();
        info!("Breathing started: {}", self.engine.steps().describe());
        vec![
            SessionEvent::BreathingStarted,
            SessionEvent::PhaseChanged {
                step_index: self.engine.step_index(),
                step,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Phase, Step};

    const SECOND: Duration = Duration::from_secs(1);

    fn session(limit: Option<u64>) -> Session {
        Session::new(StepSequence::default(), limit.map(Duration::from_secs))
    }

    fn run_countdown(session: &mut Session) {
        session.start_countdown();
        for _ in 0..COUNTDOWN_START {
            session.on_cadence(SECOND);
        }
        assert_eq!(session.status(), SessionStatus::Active);
    }

    #[test]
    fn countdown_counts_three_two_one_zero() {
        let mut session = session(None);
        let mut events = session.start_countdown();
        for _ in 0..3 {
            events.extend(session.on_cadence(SECOND));
        }
        let countdown: Vec<u8> = events
            .iter()
            .filter_map(|event| match event {
                SessionEvent::CountdownUpdated { value } => Some(*value),
                _ => None,
            })
            .collect();
        assert_eq!(countdown, vec![3, 2, 1, 0]);
        assert!(events.contains(&SessionEvent::BreathingStarted));
        assert_eq!(
            events.last(),
            Some(&SessionEvent::PhaseChanged {
                step_index: 0,
                step: Step::new(Phase::Inhale, 4),
            })
        );
        assert_eq!(session.engine().remaining_seconds(), 4);
    }

    #[test]
    fn tick_advances_phase_on_zero() {
        let mut session = session(None);
        run_countdown(&mut session);
        let mut events = Vec::new();
        for _ in 0..4 {
            events = session.on_cadence(SECOND);
        }
        assert_eq!(
            events,
            vec![
                SessionEvent::TickUpdated {
                    step_index: 0,
                    remaining_seconds: 0,
                },
                SessionEvent::PhaseChanged {
                    step_index: 1,
                    step: Step::new(Phase::Hold, 7),
                },
            ]
        );
        assert_eq!(session.snapshot().scale, 1.0);
        assert_eq!(session.snapshot().phase_label, "Hold");
    }

    #[test]
    fn limit_resets_on_the_tenth_tick() {
        let mut session = session(Some(10));
        run_countdown(&mut session);
        for tick in 1..10 {
            session.tick(SECOND);
            assert_eq!(session.status(), SessionStatus::Active, "tick {tick}");
        }
        let events = session.tick(SECOND);
        assert_eq!(session.status(), SessionStatus::Idle);
        assert_eq!(events.last(), Some(&SessionEvent::SessionReset));
        assert_eq!(session.state().countdown_remaining, COUNTDOWN_START);
        assert_eq!(session.state().playback_limit, Some(Duration::from_secs(10)));
    }

    #[test]
    fn paused_time_does_not_count_towards_limit() {
        let mut session = session(Some(10));
        run_countdown(&mut session);
        for _ in 0..6 {
            session.on_cadence(SECOND);
        }
        session.toggle_pause();
        for _ in 0..30 {
            assert!(session.on_cadence(SECOND).is_empty());
        }
        session.toggle_pause();
        for _ in 0..3 {
            session.on_cadence(SECOND);
        }
        assert_eq!(session.status(), SessionStatus::Active);
        assert_eq!(session.state().elapsed, Duration::from_secs(9));

        session.on_cadence(SECOND);
        assert_eq!(session.status(), SessionStatus::Idle);
    }

    #[test]
    fn pause_freezes_engine() {
        let mut session = session(None);
        run_countdown(&mut session);
        session.tick(SECOND);
        session.toggle_pause();
        assert!(session.snapshot().is_paused);
        assert!(session.tick(SECOND).is_empty());
        assert_eq!(session.engine().remaining_seconds(), 3);
    }

    #[test]
    fn pause_is_ignored_outside_breathing() {
        let mut session = session(None);
        assert!(session.toggle_pause().is_empty());
        session.start_countdown();
        assert!(session.toggle_pause().is_empty());
        assert_eq!(session.status(), SessionStatus::Countdown);
        assert!(!session.state().is_paused);
    }

    #[test]
    fn stop_keeps_engine_position() {
        let mut session = session(None);
        run_countdown(&mut session);
        session.tick(SECOND);
        assert_eq!(session.stop(), vec![SessionEvent::Stopped]);
        assert_eq!(session.status(), SessionStatus::Idle);
        assert_eq!(session.engine().remaining_seconds(), 3);
        assert!(session.on_cadence(SECOND).is_empty());
        assert!(session.stop().is_empty());
    }

    #[test]
    fn stop_then_reset_is_idempotent() {
        let mut session = session(Some(60));
        run_countdown(&mut session);
        for _ in 0..5 {
            session.tick(SECOND);
        }
        session.stop();
        for _ in 0..2 {
            session.reset();
            let snapshot = session.snapshot();
            assert_eq!(snapshot.countdown, COUNTDOWN_START);
            assert_eq!(snapshot.step_index, 0);
            assert_eq!(snapshot.remaining_seconds, 0);
            assert_eq!(snapshot.elapsed_seconds, 0);
            assert_eq!(snapshot.status, SessionStatus::Idle);
            assert!(!snapshot.is_paused);
        }
    }

    #[test]
    fn restarting_countdown_starts_over() {
        let mut session = session(None);
        session.start_countdown();
        session.on_cadence(SECOND);
        assert_eq!(session.state().countdown_remaining, 2);
        session.start_countdown();
        assert_eq!(session.state().countdown_remaining, 3);

        run_countdown(&mut session);
        session.tick(SECOND);
        session.toggle_pause();
        session.start_countdown();
        assert_eq!(session.status(), SessionStatus::Countdown);
        assert!(!session.state().is_paused);
        assert_eq!(session.state().elapsed, Duration::ZERO);
    }

    #[test]
    fn lowering_limit_applies_on_next_tick() {
        let mut session = session(None);
        run_countdown(&mut session);
        for _ in 0..5 {
            session.tick(SECOND);
        }
        session.set_playback_limit(Some(Duration::from_secs(3)));
        assert_eq!(session.status(), SessionStatus::Active);
        session.tick(SECOND);
        assert_eq!(session.status(), SessionStatus::Idle);
    }
}
