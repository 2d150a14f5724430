//! High-level orchestration of ladder frequency sweeps.

use tracing::info;

use crate::circuits::component::{Component, ComponentRecord};
use crate::circuits::network::Network;
use crate::circuits::ordering::OrderingStrategy;
use crate::circuits::projection::{OutputRequest, Projection, ProjectionMode};
use crate::circuits::termination::Termination;
use crate::errors::LadderError;
use crate::sweep::FrequencySweep;

/// Metadata describing a ladder sweep experiment.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Human-readable identifier.
    pub name: String,
    /// Frequency sweep to evaluate.
    pub sweep: Option<FrequencySweep>,
    /// Source and load terminations.
    pub termination: Option<Termination>,
    /// How components are put into cascade order.
    pub ordering: OrderingStrategy,
    /// Handling of unknown names in output requests.
    pub projection: ProjectionMode,
}

impl AnalysisConfig {
    /// Creates an empty configuration; sweep and termination must be supplied before running.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sweep: None,
            termination: None,
            ordering: OrderingStrategy::default(),
            projection: ProjectionMode::default(),
        }
    }

    /// Sets the frequency sweep.
    #[must_use]
    pub fn with_sweep(mut self, sweep: FrequencySweep) -> Self {
        self.sweep = Some(sweep);
        self
    }

    /// Sets the terminations.
    #[must_use]
    pub fn with_termination(mut self, termination: Termination) -> Self {
        self.termination = Some(termination);
        self
    }

    /// Sets the ordering strategy.
    #[must_use]
    pub fn with_ordering(mut self, ordering: OrderingStrategy) -> Self {
        self.ordering = ordering;
        self
    }

    /// Sets the projection mode.
    #[must_use]
    pub fn with_projection(mut self, projection: ProjectionMode) -> Self {
        self.projection = projection;
        self
    }

    /// Checks that every required parameter is present and the sweep is well formed.
    pub fn validate(&self) -> Result<(FrequencySweep, Termination), LadderError> {
        let sweep = self.sweep.ok_or(SimulationError::MissingParameter("sweep"))?;
        let termination = self
            .termination
            .ok_or(SimulationError::MissingParameter("termination"))?;
        sweep.validate()?;
        if !(termination.vth.is_finite() && termination.rs.is_finite() && termination.rl.is_finite()) {
            return Err(SimulationError::InvalidConfig(format!(
                "termination values must be finite, got {termination:?}"
            ))
            .into());
        }
        Ok((sweep, termination))
    }
}

/// Trait for simulation engines.
pub trait SimulationEngine {
    /// Output produced by a run.
    type Output;

    /// Executes the simulation using the provided configuration.
    fn run(&self, config: &AnalysisConfig) -> Result<Self::Output, LadderError>;
}

/// Errors that can occur while configuring or executing simulations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimulationError {
    /// Raised when a required parameter is missing.
    #[error("missing parameter: {0}")]
    MissingParameter(&'static str),
    /// Raised when the configuration is internally inconsistent.
    #[error("configuration error: {0}")]
    InvalidConfig(String),
}

/// Ladder sweep over a set of component records.
#[derive(Debug, Clone, Default)]
pub struct LadderAnalysis {
    components: Vec<Component>,
}

impl LadderAnalysis {
    /// Builds the analysis from reader records. Fails on the first unsupported kind.
    pub fn from_records<'a>(
        records: impl IntoIterator<Item = &'a ComponentRecord>,
    ) -> Result<Self, LadderError> {
        let components = records
            .into_iter()
            .map(Component::from_record)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { components })
    }

    /// Builds the analysis from already constructed components.
    #[must_use]
    pub fn from_components(components: Vec<Component>) -> Self {
        Self { components }
    }

    /// Components as supplied.
    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Runs the analysis and projects the results in one step.
    pub fn run_and_project(
        &self,
        config: &AnalysisConfig,
        request: &OutputRequest,
    ) -> Result<Projection, LadderError> {
        let network = self.run(config)?;
        Ok(network.project_with(request, config.projection)?)
    }
}

impl SimulationEngine for LadderAnalysis {
    type Output = Network;

    fn run(&self, config: &AnalysisConfig) -> Result<Network, LadderError> {
        let (sweep, termination) = config.validate()?;
        let frequencies = sweep.frequencies()?;
        info!(
            name = %config.name,
            components = self.components.len(),
            points = sweep.points(),
            "running ladder sweep"
        );
        Ok(Network::with_ordering(&self.components, termination, frequencies, config.ordering)?)
    }
}
