//! Cue dispatcher background task

use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, info, warn};

use crate::{
    services::{Cue, CueSink},
    state::SessionEvent,
};

/// Plays audio cues for session events until the event stream closes,
/// which happens when the session controller task finishes.
///
/// Sink failures are logged and dropped; the session never sees them.
pub async fn cue_dispatcher_task(
    mut events: broadcast::Receiver<SessionEvent>,
    mut sink: Box<dyn CueSink>,
) {
    info!("Starting cue dispatcher task");

    loop {
        match events.recv().await {
            Ok(event) => dispatch(&mut *sink, &event),
            Err(RecvError::Lagged(skipped)) => {
                warn!("Cue dispatcher lagged, skipped {} session events", skipped);
            }
            Err(RecvError::Closed) => {
                debug!("Session event stream closed");
                break;
            }
        }
    }

    sink.silence();
    info!("Cue dispatcher task finished");
}

fn dispatch(sink: &mut dyn CueSink, event: &SessionEvent) {
    let cue = match event {
        SessionEvent::BreathingStarted => Cue::Background,
        SessionEvent::PhaseChanged { step, .. } => Cue::Phase(step.phase),
        SessionEvent::Stopped | SessionEvent::SessionReset => {
            sink.silence();
            return;
        }
        _ => return,
    };
    if let Err(e) = sink.play(cue) {
        warn!("Cue {} failed: {}", cue.id(), e);
    }
}
