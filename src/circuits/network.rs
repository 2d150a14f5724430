use tracing::{debug, info_span, warn};

use crate::math::Scalar;

use super::cascade::cascade_sweep;
use super::component::Component;
use super::ordering::{order_components, OrderingStrategy};
use super::projection::{project, OutputRequest, Projection, ProjectionMode};
use super::termination::{solve, QuantitySet, Termination};
use super::twoport::ChainMatrix;
use super::{CircuitError, Result};

/// Terminated ladder network solved across a frequency sweep.
///
/// Construction runs the whole pipeline once: order the components, cascade their chain
/// matrices at every frequency, then derive every terminated quantity. The cached tables are
/// read-only afterwards and indexed by sweep position.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    components: Vec<Component>,
    termination: Termination,
    frequencies: Vec<Scalar>,
    chains: Vec<ChainMatrix>,
    results: Vec<QuantitySet>,
}

impl Network {
    /// Orders `components` with the ladder heuristic and solves the network at `frequencies`.
    pub fn new(
        components: &[Component],
        termination: Termination,
        frequencies: Vec<Scalar>,
    ) -> Result<Self> {
        Self::with_ordering(components, termination, frequencies, OrderingStrategy::Ladder)
    }

    /// Like [`Network::new`] with an explicit ordering strategy.
    ///
    /// An empty component list yields a network with no solved points. Every frequency must be
    /// finite and positive, otherwise [`CircuitError::InvalidFrequency`] names the first bad one.
    pub fn with_ordering(
        components: &[Component],
        termination: Termination,
        frequencies: Vec<Scalar>,
        strategy: OrderingStrategy,
    ) -> Result<Self> {
        let _span = info_span!(
            "ladder_network",
            components = components.len(),
            points = frequencies.len()
        )
        .entered();

        if let Some((index, &frequency)) =
            frequencies.iter().enumerate().find(|(_, f)| !(f.is_finite() && **f > 0.0))
        {
            return Err(CircuitError::InvalidFrequency { index, frequency });
        }

        if components.is_empty() {
            warn!("ladder network has no components; nothing to solve");
            return Ok(Self {
                components: Vec::new(),
                termination,
                frequencies,
                chains: Vec::new(),
                results: Vec::new(),
            });
        }

        let components = order_components(components, strategy);
        let chains = cascade_sweep(&components, &frequencies)?;
        let results = chains
            .iter()
            .zip(&frequencies)
            .enumerate()
            .map(|(idx, (chain, &f))| solve(chain, &termination).map_err(|e| e.at(idx, f)))
            .collect::<Result<Vec<_>>>()?;
        debug!(points = results.len(), "solved terminated ladder");

        Ok(Self { components, termination, frequencies, chains, results })
    }

    /// Components in cascade order.
    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Source and load terminations.
    #[must_use]
    pub fn termination(&self) -> &Termination {
        &self.termination
    }

    /// Sweep frequencies (Hz).
    #[must_use]
    pub fn frequencies(&self) -> &[Scalar] {
        &self.frequencies
    }

    /// Network chain matrix per solved sweep point.
    #[must_use]
    pub fn chain_matrices(&self) -> &[ChainMatrix] {
        &self.chains
    }

    /// Derived quantities per solved sweep point.
    #[must_use]
    pub fn results(&self) -> &[QuantitySet] {
        &self.results
    }

    /// Frequency and quantities at sweep position `index`.
    #[must_use]
    pub fn point(&self, index: usize) -> Option<(Scalar, &QuantitySet)> {
        Some((*self.frequencies.get(index)?, self.results.get(index)?))
    }

    /// Number of solved sweep points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// True when nothing was solved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Projects the cached results, skipping unknown names.
    pub fn project(&self, request: &OutputRequest) -> Result<Projection> {
        self.project_with(request, ProjectionMode::Lenient)
    }

    /// Projects the cached results with an explicit handling of unknown names.
    pub fn project_with(&self, request: &OutputRequest, mode: ProjectionMode) -> Result<Projection> {
        project(&self.frequencies, &self.results, request, mode)
    }
}
