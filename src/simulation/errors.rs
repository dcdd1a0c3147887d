//! Driver errors

use std::fmt;

/// Faults raised while stepping a simulation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    /// `tick` called after the trace finished
    Exhausted,

    /// A pop named a different call than the one on top of the stack
    LabelMismatch { expected: String, found: String },

    /// Algorithm name not in the catalog
    UnknownAlgorithm(String),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::Exhausted => write!(f, "Simulation has already finished"),
            SimulationError::LabelMismatch { expected, found } => {
                write!(f, "Pop of '{}' does not match open call '{}'", found, expected)
            }
            SimulationError::UnknownAlgorithm(name) => {
                write!(f, "Unknown algorithm '{}'", name)
            }
        }
    }
}

impl std::error::Error for SimulationError {}
