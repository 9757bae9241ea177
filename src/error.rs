//! Error types for step sequence construction

use thiserror::Error;

/// Reasons a breathing step sequence is rejected at construction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    /// A cycle needs at least one step
    #[error("step sequence must contain at least one step")]
    Empty,

    /// Every step must last at least one second
    #[error("step {index} has a zero duration")]
    ZeroDuration { index: usize },

    #[error("unknown breathing phase '{0}'")]
    UnknownPhase(String),

    /// A `phase:seconds` entry whose seconds part is not a whole number
    #[error("invalid duration '{value}' in step '{entry}'")]
    InvalidDuration { entry: String, value: String },
}
