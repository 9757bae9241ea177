//! Breathing phase catalog

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::SequenceError;

/// One stage of a breathing cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Inhale,
    Hold,
    Exhale,
}

impl Phase {
    /// Every phase, in catalog order
    pub const ALL: [Phase; 3] = [Phase::Inhale, Phase::Hold, Phase::Exhale];

    /// Intrinsic duration in seconds when a step does not override it
    pub fn default_duration(self) -> u32 {
        match self {
            Phase::Inhale => 4,
            Phase::Hold => 7,
            Phase::Exhale => 8,
        }
    }

    /// Human readable name, shown under the countdown
    pub fn label(self) -> &'static str {
        match self {
            Phase::Inhale => "Inhale",
            Phase::Hold => "Hold",
            Phase::Exhale => "Exhale",
        }
    }

    /// Audio cue identifier for this phase (same as its label)
    pub fn cue_id(self) -> &'static str {
        self.label()
    }

    /// Target scale of the breathing shape while in this phase
    pub fn scale(self) -> f32 {
        match self {
            Phase::Inhale => 1.5,
            Phase::Hold => 1.0,
            Phase::Exhale => 0.7,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Phase {
    type Err = SequenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "inhale" => Ok(Phase::Inhale),
            "hold" => Ok(Phase::Hold),
            "exhale" => Ok(Phase::Exhale),
            other => Err(SequenceError::UnknownPhase(other.to_string())),
        }
    }
}
