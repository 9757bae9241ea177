//! State management module
//! 
//! This module contains the breathing catalog, the timer engine, the session
//! state machine and the music player transport.

pub mod phase;
pub mod sequence;
pub mod timer_engine;
pub mod events;
pub mod session_state;
pub mod session;
pub mod player_state;
pub mod app_state;

// Re-export main types
pub use phase::Phase;
pub use sequence::{Step, StepSequence};
pub use timer_engine::TimerEngine;
pub use events::SessionEvent;
pub use session_state::{SessionSnapshot, SessionState, SessionStatus};
pub use session::Session;
pub use player_state::{PlayerSnapshot, PlayerState};
pub use app_state::AppState;
