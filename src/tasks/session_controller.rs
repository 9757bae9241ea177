//! Session controller background task
//!
//! The controller task is the single owner of a [`Session`]. User commands
//! arrive over an mpsc channel and the one-second cadence is an interval
//! polled in the same `select!`, so no two mutations ever overlap. Dropping
//! the interval is how the cadence is cancelled.
//!
//! The controller holds the only strong reference to the event sender, so
//! subscribers see the stream close once the task finishes.

use std::{
    sync::{Arc, Weak},
    time::Duration,
};

use tokio::{
    sync::{broadcast, mpsc, oneshot, watch},
    task::JoinHandle,
    time::{interval_at, Instant, Interval, MissedTickBehavior},
};
use tracing::{debug, info};

use crate::state::{Session, SessionEvent, SessionSnapshot};

/// Cadence of countdown beats and breathing ticks
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

const COMMAND_BUFFER: usize = 32;
const EVENT_BUFFER: usize = 100;

#[derive(Debug)]
enum SessionCommand {
    StartCountdown,
    TogglePause,
    Stop,
    Reset,
    SetPlaybackLimit(Option<Duration>),
    Shutdown,
}

/// Cloneable handle used to drive and observe a running session
#[derive(Debug, Clone)]
pub struct SessionHandle {
    command_tx: mpsc::Sender<(SessionCommand, oneshot::Sender<SessionSnapshot>)>,
    event_tx: Weak<broadcast::Sender<SessionEvent>>,
    snapshot_rx: watch::Receiver<SessionSnapshot>,
}

impl SessionHandle {
    /// Start (or restart) the 3-2-1 countdown
    pub async fn start_countdown(&self) -> Result<SessionSnapshot, String> {
        self.send(SessionCommand::StartCountdown).await
    }

    /// Pause an active session or resume a paused one
    pub async fn toggle_pause(&self) -> Result<SessionSnapshot, String> {
        self.send(SessionCommand::TogglePause).await
    }

    /// Cancel the cadence without clearing progress
    pub async fn stop(&self) -> Result<SessionSnapshot, String> {
        self.send(SessionCommand::Stop).await
    }

    /// Cancel the cadence and clear all progress
    pub async fn reset(&self) -> Result<SessionSnapshot, String> {
        self.send(SessionCommand::Reset).await
    }

    /// Set or clear the cap on active breathing time
    pub async fn set_playback_limit(
        &self,
        limit: Option<Duration>,
    ) -> Result<SessionSnapshot, String> {
        self.send(SessionCommand::SetPlaybackLimit(limit)).await
    }

    /// Stop the controller task; later calls on any handle fail
    pub async fn shutdown(&self) -> Result<SessionSnapshot, String> {
        self.send(SessionCommand::Shutdown).await
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Receiver that is notified whenever the snapshot changes
    pub fn watch(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshot_rx.clone()
    }

    /// Subscribe to session events from now on.
    ///
    /// Once the controller has finished the receiver is already closed.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        match self.event_tx.upgrade() {
            Some(event_tx) => event_tx.subscribe(),
            None => broadcast::channel(1).1,
        }
    }

    async fn send(&self, command: SessionCommand) -> Result<SessionSnapshot, String> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send((command, reply_tx))
            .await
            .map_err(|_| "Session controller is not running".to_string())?;
        reply_rx
            .await
            .map_err(|_| "Session controller dropped the command".to_string())
    }
}

/// Owns the session and runs its cadence
pub struct SessionController {
    session: Session,
    period: Duration,
    command_rx: mpsc::Receiver<(SessionCommand, oneshot::Sender<SessionSnapshot>)>,
    event_tx: Arc<broadcast::Sender<SessionEvent>>,
    snapshot_tx: watch::Sender<SessionSnapshot>,
}

impl SessionController {
    /// Spawn the controller task for `session`, ticking every `period`
    pub fn spawn(session: Session, period: Duration) -> (SessionHandle, JoinHandle<()>) {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let event_tx = Arc::new(broadcast::channel(EVENT_BUFFER).0);
        let (snapshot_tx, snapshot_rx) = watch::channel(session.snapshot());

        let handle = SessionHandle {
            command_tx,
            event_tx: Arc::downgrade(&event_tx),
            snapshot_rx,
        };
        let controller = Self {
            session,
            period,
            command_rx,
            event_tx,
            snapshot_tx,
        };
        let task = tokio::spawn(controller.run());
        (handle, task)
    }

    async fn run(mut self) {
        info!("Starting session controller task");
        let mut cadence: Option<Interval> = None;

        loop {
            tokio::select! {
                received = self.command_rx.recv() => {
                    let Some((command, reply_tx)) = received else {
                        info!("All session handles dropped, stopping controller");
                        break;
                    };
                    debug!("Session command: {:?}", command);

                    let events = match command {
                        SessionCommand::StartCountdown => {
                            cadence = Some(self.new_cadence());
                            self.session.start_countdown()
                        }
                        SessionCommand::TogglePause => self.session.toggle_pause(),
                        SessionCommand::Stop => self.session.stop(),
                        SessionCommand::Reset => self.session.reset(),
                        SessionCommand::SetPlaybackLimit(limit) => {
                            self.session.set_playback_limit(limit);
                            Vec::new()
                        }
                        SessionCommand::Shutdown => {
                            let events = self.session.stop();
                            self.publish(events);
                            // Receiver may be gone already; nothing to report back to.
                            let _ = reply_tx.send(self.session.snapshot());
                            break;
                        }
                    };
                    self.publish(events);
                    if !self.session.state().needs_cadence() {
                        cadence = None;
                    }
                    let _ = reply_tx.send(self.session.snapshot());
                }
                _ = next_beat(&mut cadence) => {
                    let events = self.session.on_cadence(self.period);
                    self.publish(events);
                    if !self.session.state().needs_cadence() {
                        debug!("Session idle, cancelling cadence");
                        cadence = None;
                    }
                }
            }
        }

        info!("Session controller task finished");
    }

    fn new_cadence(&self) -> Interval {
        let mut cadence = interval_at(Instant::now() + self.period, self.period);
        cadence.set_missed_tick_behavior(MissedTickBehavior::Delay);
        cadence
    }

    /// Send `events` and republish the snapshot if anything in it changed
    fn publish(&self, events: Vec<SessionEvent>) {
        for event in events {
            debug!("Session event: {}", event.name());
            // No subscribers is normal; events are fire-and-forget.
            let _ = self.event_tx.send(event);
        }
        let snapshot = self.session.snapshot();
        self.snapshot_tx.send_if_modified(|current| {
            if *current == snapshot {
                return false;
            }
            *current = snapshot;
            true
        });
    }
}

/// Resolves on the next beat, or never when no cadence is armed
async fn next_beat(cadence: &mut Option<Interval>) {
    match cadence {
        Some(cadence) => {
            cadence.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
