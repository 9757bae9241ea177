//! Breathing steps and the cyclic sequence they form

use std::{fmt, str::FromStr, sync::Arc};

use serde::{Deserialize, Serialize};

use super::Phase;
use crate::error::SequenceError;

/// A single (phase, duration) pair within a breathing cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub phase: Phase,
    pub duration: u32,
}

impl Step {
    pub fn new(phase: Phase, duration: u32) -> Self {
        Self { phase, duration }
    }

    /// Step using the phase's intrinsic duration
    pub fn with_default_duration(phase: Phase) -> Self {
        Self::new(phase, phase.default_duration())
    }
}

/// Ordered, non-empty list of steps that repeats forever.
///
/// Cloning is cheap: the steps are shared and never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSequence {
    steps: Arc<[Step]>,
}

impl StepSequence {
    /// Build a sequence, rejecting empty lists and zero-length steps
    pub fn new(steps: Vec<Step>) -> Result<Self, SequenceError> {
        if steps.is_empty() {
            return Err(SequenceError::Empty);
        }
        if let Some(index) = steps.iter().position(|step| step.duration == 0) {
            return Err(SequenceError::ZeroDuration { index });
        }
        Ok(Self { steps: steps.into() })
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false; kept for parity with `len`
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn first(&self) -> &Step {
        &self.steps[0]
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Length of one full cycle in seconds
    pub fn cycle_seconds(&self) -> u64 {
        self.steps.iter().map(|step| u64::from(step.duration)).sum()
    }

    /// Summary phrase such as `Inhale (4s) > Hold (7s) > Exhale (8s)`
    pub fn describe(&self) -> String {
        self.steps
            .iter()
            .map(|step| format!("{} ({}s)", step.phase.label(), step.duration))
            .collect::<Vec<_>>()
            .join(" > ")
    }
}

impl Default for StepSequence {
    /// The classic 4-7-8 cycle
    fn default() -> Self {
        Self {
            steps: Phase::ALL.map(Step::with_default_duration).to_vec().into(),
        }
    }
}

impl fmt::Display for StepSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries: Vec<String> = self
            .steps
            .iter()
            .map(|step| format!("{}:{}", step.phase.label().to_lowercase(), step.duration))
            .collect();
        f.write_str(&entries.join(","))
    }
}

impl FromStr for StepSequence {
    type Err = SequenceError;

    /// Parse `inhale:4,hold:7,exhale:8`; a bare phase name uses its default duration
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut steps = Vec::new();
        for entry in s.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
            let step = match entry.split_once(':') {
                Some((phase, seconds)) => {
                    let phase: Phase = phase.parse()?;
                    let duration = seconds.trim().parse::<u32>().map_err(|_| {
                        SequenceError::InvalidDuration {
                            entry: entry.to_string(),
                            value: seconds.trim().to_string(),
                        }
                    })?;
                    Step::new(phase, duration)
                }
                None => Step::with_default_duration(entry.parse()?),
            };
            steps.push(step);
        }
        Self::new(steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_sequence() {
        assert_eq!(StepSequence::new(Vec::new()), Err(SequenceError::Empty));
        assert_eq!("".parse::<StepSequence>(), Err(SequenceError::Empty));
        assert_eq!(" , ".parse::<StepSequence>(), Err(SequenceError::Empty));
    }

    #[test]
    fn rejects_zero_duration() {
        let result = StepSequence::new(vec![
            Step::new(Phase::Inhale, 4),
            Step::new(Phase::Hold, 0),
        ]);
        assert_eq!(result, Err(SequenceError::ZeroDuration { index: 1 }));
    }

    #[test]
    fn parses_mixed_entries() {
        let sequence: StepSequence = "inhale:5, hold ,exhale:6".parse().unwrap();
        assert_eq!(
            sequence.steps(),
            &[
                Step::new(Phase::Inhale, 5),
                Step::new(Phase::Hold, 7),
                Step::new(Phase::Exhale, 6),
            ]
        );
        assert_eq!(sequence.cycle_seconds(), 18);
        assert_eq!(sequence.to_string(), "inhale:5,hold:7,exhale:6");
    }

    #[test]
    fn reports_bad_duration() {
        let err = "inhale:four".parse::<StepSequence>().unwrap_err();
        assert_eq!(
            err,
            SequenceError::InvalidDuration {
                entry: "inhale:four".to_string(),
                value: "four".to_string(),
            }
        );
    }

    #[test]
    fn default_is_four_seven_eight() {
        let sequence = StepSequence::default();
        assert_eq!(sequence.len(), 3);
        assert_eq!(sequence.describe(), "Inhale (4s) > Hold (7s) > Exhale (8s)");
        assert_eq!(sequence.to_string().parse::<StepSequence>().unwrap(), sequence);
    }
}
