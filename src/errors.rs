//! Shared error types used across submodules.

use thiserror::Error;

use crate::circuits::CircuitError;
use crate::simulation::SimulationError;
use crate::sweep::SweepError;

/// Top-level error type for the crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LadderError {
    /// Wraps simulation-related errors.
    #[error(transparent)]
    Simulation(#[from] SimulationError),
    /// Wraps component, cascade, termination and projection errors.
    #[error(transparent)]
    Circuit(#[from] CircuitError),
    /// Wraps frequency sweep errors.
    #[error(transparent)]
    Sweep(#[from] SweepError),
}
