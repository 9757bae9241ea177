//! Breath Pacer - A state-managed HTTP server for guided breathing sessions
//! 
//! This library provides the breathing timer engine, the session controller
//! that drives it on a one-second cadence, audio cue dispatch and an HTTP API
//! for presentation layers.

pub mod config;
pub mod error;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::SequenceError;
pub use state::{AppState, Phase, Session, Step, StepSequence};
pub use tasks::{SessionController, SessionHandle};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
