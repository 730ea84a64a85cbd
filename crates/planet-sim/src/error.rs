//! Error types for simulator construction and control.

use std::fmt;

/// Errors returned by the simulator and its shared wrapper.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Mass must be positive and finite.
    InvalidMass { index: usize, mass: f64 },
    /// Radius must be non-negative and finite.
    InvalidRadius { index: usize, radius: f64 },
    /// The simulated time interval per frame must be positive and finite.
    InvalidTimeStep(f64),
    /// Frame rate must be at least one frame per second.
    InvalidFrameRate,
    /// A frame needs at least one substep.
    InvalidSubsteps,
    /// Planet index is out of bounds.
    PlanetOutOfBounds { index: usize, count: usize },
    /// The selected force model does not support this operation.
    Unsupported {
        operation: &'static str,
        model: &'static str,
    },
    /// A thread panicked while holding the simulator lock.
    LockPoisoned,
    /// A bounded wait for a completed substep elapsed.
    Timeout,
    /// The stepping thread could not be started.
    Spawn(String),
    /// The stepping thread panicked; carries the panic message.
    WorkerPanicked(String),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::InvalidMass { index, mass } => {
                write!(f, "planet {} has invalid mass {} (must be positive)", index, mass)
            }
            SimulationError::InvalidRadius { index, radius } => {
                write!(f, "planet {} has invalid radius {} (must be non-negative)", index, radius)
            }
            SimulationError::InvalidTimeStep(dt) => {
                write!(f, "time interval {} must be positive and finite", dt)
            }
            SimulationError::InvalidFrameRate => write!(f, "frame rate must be positive"),
            SimulationError::InvalidSubsteps => write!(f, "substeps per frame must be positive"),
            SimulationError::PlanetOutOfBounds { index, count } => {
                write!(f, "planet index {} out of bounds (count: {})", index, count)
            }
            SimulationError::Unsupported { operation, model } => {
                write!(f, "{} is not supported by the {} model", operation, model)
            }
            SimulationError::LockPoisoned => write!(f, "simulator lock poisoned"),
            SimulationError::Timeout => write!(f, "timed out waiting for a substep"),
            SimulationError::Spawn(reason) => write!(f, "failed to start stepping thread: {}", reason),
            SimulationError::WorkerPanicked(message) => {
                write!(f, "stepping thread panicked: {}", message)
            }
        }
    }
}

impl std::error::Error for SimulationError {}
