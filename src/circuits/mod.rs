//! Ladder-network primitives: element models, cascade ordering, chain-matrix composition,
//! termination solving and result projection.

/// Lumped element records and their chain-matrix models.
pub mod component;
/// Cascade ordering of ladder components.
pub mod ordering;
/// Per-frequency chain-matrix composition.
pub mod cascade;
/// Source/load termination solving.
pub mod termination;
/// Solved ladder network with cached per-frequency results.
pub mod network;
/// Unit and decibel projection of solved quantities.
pub mod projection;
/// Chain (ABCD) two-port representation.
pub mod twoport;

pub use component::{
    Component, ComponentKind, ComponentModel, ComponentRecord, FixedImpedance, Immittance,
    ReactiveImpedance,
};
pub use network::Network;
pub use ordering::{order_components, OrderingStrategy, Permutation};
pub use projection::{OutputRequest, ProjectedValue, Projection, ProjectionMode, ProjectionRow};
pub use termination::{Quantity, QuantitySet, Termination};
pub use twoport::ChainMatrix;

use thiserror::Error;

/// Errors raised while modelling, cascading, solving or projecting a ladder network.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CircuitError {
    /// A component record names a kind other than `R`, `G`, `L` or `C`.
    #[error("unsupported component type `{0}` (expected R, G, L or C)")]
    UnsupportedComponentType(String),
    /// A division in the model or termination equations hit an exact zero denominator.
    #[error("division by zero while computing {quantity}")]
    DivisionSingularity {
        /// Expression whose denominator vanished.
        quantity: &'static str,
    },
    /// A [`CircuitError::DivisionSingularity`] located within a frequency sweep.
    #[error("division by zero while computing {quantity} at sweep point {index} ({frequency} Hz)")]
    SingularityAt {
        /// Position in the frequency sweep.
        index: usize,
        /// Frequency in hertz.
        frequency: f64,
        /// Expression whose denominator vanished.
        quantity: &'static str,
    },
    /// A value that should be finite overflowed or became NaN.
    #[error("non-finite value while computing {quantity}")]
    NonFinite {
        /// Expression that produced the non-finite value.
        quantity: &'static str,
    },
    /// A [`CircuitError::NonFinite`] located within a frequency sweep.
    #[error("non-finite value while computing {quantity} at sweep point {index} ({frequency} Hz)")]
    NonFiniteAt {
        /// Position in the frequency sweep.
        index: usize,
        /// Frequency in hertz.
        frequency: f64,
        /// Expression that produced the non-finite value.
        quantity: &'static str,
    },
    /// A sweep frequency is NaN, infinite, zero or negative.
    #[error("invalid frequency {frequency} Hz at sweep point {index}")]
    InvalidFrequency {
        /// Position in the frequency sweep.
        index: usize,
        /// Offending value.
        frequency: f64,
    },
    /// A strict projection requested a quantity name that does not exist.
    #[error("unknown output quantity `{0}`")]
    UnknownQuantity(String),
}

impl CircuitError {
    /// Attaches a sweep position to a bare singularity or non-finite error. Other errors pass
    /// through.
    #[must_use]
    pub fn at(self, index: usize, frequency: f64) -> Self {
        match self {
            Self::DivisionSingularity { quantity } => Self::SingularityAt { index, frequency, quantity },
            Self::NonFinite { quantity } => Self::NonFiniteAt { index, frequency, quantity },
            other => other,
        }
    }
}

/// Result alias for circuit operations.
pub type Result<T> = std::result::Result<T, CircuitError>;
