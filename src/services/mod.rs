//! External collaborator module
//! 
//! This module contains the audio cue players driven by session events.

pub mod cues;

// Re-export main types and functions
pub use cues::*;
