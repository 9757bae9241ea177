//! Music player transport state
//!
//! A virtual playback clock behind the music player overlay. It tracks the
//! loaded track's length and the play head; no audio is decoded here.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::{debug, info};

/// Serializable view of the transport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub loaded: bool,
    pub is_playing: bool,
    pub duration_seconds: f64,
    pub position_seconds: f64,
}

#[derive(Debug, Clone, Default)]
pub struct PlayerState {
    duration: Duration,
    loaded: bool,
    /// Play head at the moment playback last started or was moved
    anchor_position: Duration,
    /// Set while playing
    playing_since: Option<Instant>,
}

impl PlayerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a track of the given length, rewinding and pausing
    pub fn load(&mut self, duration: Duration) {
        info!("Loaded track of {:.1}s", duration.as_secs_f64());
        self.duration = duration;
        self.loaded = true;
        self.anchor_position = Duration::ZERO;
        self.playing_since = None;
    }

    pub fn is_playing(&self) -> bool {
        self.playing_since.is_some()
    }

    /// Start or pause playback; returns whether it is now playing
    pub fn toggle(&mut self) -> bool {
        self.toggle_at(Instant::now())
    }

    /// Pause and keep the play head where it is
    pub fn stop(&mut self) {
        self.stop_at(Instant::now());
    }

    /// Move the play head, clamped to the track
    pub fn seek(&mut self, position: Duration) {
        self.seek_at(position, Instant::now());
    }

    pub fn position(&self) -> Duration {
        self.position_at(Instant::now())
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        self.snapshot_at(Instant::now())
    }

    pub(crate) fn toggle_at(&mut self, now: Instant) -> bool {
        if self.is_playing() && self.position_at(now) >= self.duration {
            // Ran off the end: settle at the end so this press restarts.
            self.stop_at(now);
        }
        if self.is_playing() {
            self.stop_at(now);
            info!("Playback paused");
            return false;
        }
        if !self.loaded {
            debug!("Ignoring play request with no track loaded");
            return false;
        }
        if self.anchor_position >= self.duration {
            self.anchor_position = Duration::ZERO;
        }
        self.playing_since = Some(now);
        info!("Playback started at {:.1}s", self.anchor_position.as_secs_f64());
        true
    }

    pub(crate) fn stop_at(&mut self, now: Instant) {
        self.anchor_position = self.position_at(now);
        self.playing_since = None;
    }

    pub(crate) fn seek_at(&mut self, position: Duration, now: Instant) {
        self.anchor_position = position.min(self.duration);
        if self.playing_since.is_some() {
            self.playing_since = Some(now);
        }
        debug!("Seeked to {:.1}s", self.anchor_position.as_secs_f64());
    }

    pub(crate) fn position_at(&self, now: Instant) -> Duration {
        let played = self
            .playing_since
            .map_or(Duration::ZERO, |since| now.saturating_duration_since(since));
        (self.anchor_position + played).min(self.duration)
    }

    pub(crate) fn snapshot_at(&self, now: Instant) -> PlayerSnapshot {
        let position = self.position_at(now);
        PlayerSnapshot {
            loaded: self.loaded,
            is_playing: self.is_playing() && position < self.duration,
            duration_seconds: self.duration.as_secs_f64(),
            position_seconds: position.as_secs_f64(),
        }
    }
}
