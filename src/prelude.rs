//! Convenience re-exports for building ladder sweeps.

pub use crate::circuits::{
    component::{Component, ComponentKind, ComponentModel, ComponentRecord, Immittance, Placement},
    network::Network,
    ordering::{order_components, OrderingStrategy},
    projection::{OutputRequest, ProjectedValue, Projection, ProjectionMode, ProjectionRow},
    termination::{Quantity, QuantitySet, Termination},
    twoport::ChainMatrix,
    CircuitError,
};
pub use crate::constants::*;
pub use crate::errors::LadderError;
pub use crate::math::{CScalar, Scalar};
pub use crate::simulation::{AnalysisConfig, LadderAnalysis, SimulationEngine, SimulationError};
pub use crate::sweep::{decibels, linspace, logspace_hz, phase_rad, FrequencySweep, SweepError};
pub use crate::units::{parse_prefixed_value, Prefix, UnitSpec};
