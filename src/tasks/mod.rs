//! Background tasks module
//! 
//! This module contains background tasks that run alongside the HTTP server.

pub mod session_controller;
pub mod cue_dispatcher;

// Re-export main types and functions
pub use session_controller::{SessionController, SessionHandle, TICK_PERIOD};
pub use cue_dispatcher::cue_dispatcher_task;
