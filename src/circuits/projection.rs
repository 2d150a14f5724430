//! Projection of solved quantities onto caller-requested names and units.
//!
//! A request is an ordered list of `(name, unit)` pairs, e.g. `("Vin", "dBV")` or
//! `("Zout", "Ohms")`. Units containing `dB` produce decibel magnitude and phase in radians;
//! every other unit produces the raw complex value.

use std::fmt;

use tracing::warn;

use crate::constants::{AMPLITUDE_DB_FACTOR, POWER_DB_FACTOR};
use crate::math::{real, Scalar};
use crate::sweep::{decibels, phase_rad};
use crate::units::UnitSpec;

use super::termination::{Quantity, QuantitySet};
use super::twoport::C;
use super::{CircuitError, Result};

/// Handling of request names that match no quantity.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionMode {
    /// Skip unknown names.
    #[default]
    Lenient,
    /// Fail with [`CircuitError::UnknownQuantity`].
    Strict,
}

/// One requested output column.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestEntry {
    /// Requested quantity name, e.g. `Vin`.
    pub name: String,
    /// Requested unit, e.g. `dBmV`.
    pub unit: UnitSpec,
}

/// Ordered list of requested outputs.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutputRequest {
    entries: Vec<RequestEntry>,
}

impl OutputRequest {
    /// Empty request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a `(name, unit)` pair.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, unit: &str) -> Self {
        self.push(name, unit);
        self
    }

    /// Appends a `(name, unit)` pair in place.
    pub fn push(&mut self, name: impl Into<String>, unit: &str) {
        self.entries.push(RequestEntry { name: name.into(), unit: UnitSpec::parse(unit) });
    }

    /// Requested entries in order.
    #[must_use]
    pub fn entries(&self) -> &[RequestEntry] {
        &self.entries
    }

    /// Number of requested entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is requested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: Into<String>, U: AsRef<str>> FromIterator<(N, U)> for OutputRequest {
    fn from_iter<I: IntoIterator<Item = (N, U)>>(iter: I) -> Self {
        let mut request = Self::new();
        for (name, unit) in iter {
            request.push(name, unit.as_ref());
        }
        request
    }
}

/// A projected value.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectedValue {
    /// Raw complex value; real and imaginary parts are consumed downstream.
    Complex(C),
    /// Decibel magnitude and phase in radians.
    Decibel {
        /// `10·log10|x|` or `20·log10|x|`; negative infinity for zero.
        mag: Scalar,
        /// `arg(x)` in radians.
        phase: Scalar,
    },
}

impl ProjectedValue {
    /// Expresses a complex value in a prefixed unit, e.g. volts → millivolts.
    /// Decibel values are returned unchanged.
    #[must_use]
    pub fn rescaled(self, unit: &UnitSpec) -> Self {
        match self {
            Self::Complex(v) => Self::Complex(v / real(unit.scale())),
            other => other,
        }
    }
}

impl fmt::Display for ProjectedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Complex(v) => write!(f, "{:e}{:+e}j", v.re, v.im),
            Self::Decibel { mag, phase } => write!(f, "{mag:e} dB /_ {phase:e} rad"),
        }
    }
}

/// Projects one value.
#[must_use]
pub fn project_value(value: C, quantity: Quantity, unit: &UnitSpec) -> ProjectedValue {
    if unit.decibel {
        let factor = if quantity.is_power_family() { POWER_DB_FACTOR } else { AMPLITUDE_DB_FACTOR };
        ProjectedValue::Decibel { mag: decibels(value, factor), phase: phase_rad(value) }
    } else {
        ProjectedValue::Complex(value)
    }
}

/// A projected entry of one row.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedEntry {
    /// Request name.
    pub name: String,
    /// Resolved quantity.
    pub quantity: Quantity,
    /// Requested unit.
    pub unit: UnitSpec,
    /// Projected value.
    pub value: ProjectedValue,
}

/// Projected values at one sweep point.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionRow {
    /// Frequency of the sweep point (Hz).
    pub frequency: Scalar,
    /// Entries in request order, unknown names removed.
    pub entries: Vec<ProjectedEntry>,
}

impl ProjectionRow {
    /// First entry with the given request name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ProjectedValue> {
        self.entries.iter().find(|e| e.name == name).map(|e| &e.value)
    }
}

/// Projected table in sweep order.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Projection {
    /// One row per sweep point.
    pub rows: Vec<ProjectionRow>,
}

impl Projection {
    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterates over rows in sweep order.
    pub fn iter(&self) -> impl Iterator<Item = &ProjectionRow> {
        self.rows.iter()
    }
}

fn resolve(request: &OutputRequest, mode: ProjectionMode) -> Result<Vec<(&RequestEntry, Quantity)>> {
    let mut resolved = Vec::with_capacity(request.len());
    for entry in request.entries() {
        match (Quantity::from_name(&entry.name), mode) {
            (Some(q), _) => resolved.push((entry, q)),
            (None, ProjectionMode::Strict) => {
                return Err(CircuitError::UnknownQuantity(entry.name.clone()));
            }
            (None, ProjectionMode::Lenient) => {
                warn!(name = %entry.name, "skipping unknown output quantity");
            }
        }
    }
    Ok(resolved)
}

/// Projects a solved table. `frequencies` and `results` are parallel, indexed by sweep position.
pub fn project(
    frequencies: &[Scalar],
    results: &[QuantitySet],
    request: &OutputRequest,
    mode: ProjectionMode,
) -> Result<Projection> {
    let resolved = resolve(request, mode)?;
    let rows = frequencies
        .iter()
        .zip(results)
        .map(|(&frequency, set)| ProjectionRow {
            frequency,
            entries: resolved
                .iter()
                .map(|(entry, q)| ProjectedEntry {
                    name: entry.name.clone(),
                    quantity: *q,
                    unit: entry.unit.clone(),
                    value: project_value(set.get(*q), *q, &entry.unit),
                })
                .collect(),
        })
        .collect();
    Ok(Projection { rows })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use num_complex::Complex;

    use super::*;
    use crate::circuits::termination::{solve, Termination};
    use crate::circuits::twoport::ChainMatrix;

    fn table() -> (Vec<Scalar>, Vec<QuantitySet>) {
        let term = Termination::new(5.0, 50.0, 50.0);
        let chains = [
            ChainMatrix::series_impedance(real(50.0)),
            ChainMatrix::shunt_admittance(real(0.02)),
        ];
        let results = chains.iter().map(|c| solve(c, &term).unwrap()).collect();
        (vec![100.0, 200.0], results)
    }

    #[test]
    fn amplitude_and_power_decibels_use_their_factors() {
        let unit = UnitSpec::parse("dBV");
        let amp = project_value(Complex::new(2.0, 0.0), Quantity::Vout, &unit);
        let pow = project_value(Complex::new(4.0, 0.0), Quantity::Pout, &unit);
        let (ProjectedValue::Decibel { mag: a, .. }, ProjectedValue::Decibel { mag: p, .. }) = (amp, pow) else {
            panic!("expected decibel values");
        };
        assert_relative_eq!(a, 6.0206, epsilon = 1e-4);
        assert_relative_eq!(p, 6.0206, epsilon = 1e-4);
        assert_relative_eq!(a, p, epsilon = 1e-12);
    }

    #[test]
    fn zero_magnitude_is_negative_infinity() {
        let v = project_value(Complex::new(0.0, 0.0), Quantity::Av, &UnitSpec::parse("dB"));
        assert_eq!(v, ProjectedValue::Decibel { mag: Scalar::NEG_INFINITY, phase: 0.0 });
    }

    #[test]
    fn non_decibel_units_keep_complex_value() {
        let v = project_value(Complex::new(1.0, -2.0), Quantity::Zin, &UnitSpec::parse("Ohms"));
        assert_eq!(v, ProjectedValue::Complex(Complex::new(1.0, -2.0)));
    }

    #[test]
    fn rows_follow_sweep_and_request_order() {
        let (freqs, results) = table();
        let request = OutputRequest::new().with("Zin", "Ohms").with("Vin", "dBV");
        let p = project(&freqs, &results, &request, ProjectionMode::Lenient).unwrap();
        assert_eq!(p.len(), 2);
        assert_eq!(p.rows[0].frequency, 100.0);
        let names: Vec<_> = p.rows[1].entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Zin", "Vin"]);
        for (row, expected) in p.iter().zip([100.0, 25.0]) {
            let Some(ProjectedValue::Complex(z)) = row.get("Zin") else {
                panic!("Zin should be complex");
            };
            assert_relative_eq!(z.re, expected, max_relative = 1e-12);
            assert!(matches!(row.get("Vin"), Some(ProjectedValue::Decibel { .. })));
        }
    }

    #[test]
    fn lenient_mode_skips_unknown_names() {
        let (freqs, results) = table();
        let request: OutputRequest = [("Bogus", "V"), ("Av", "")].into_iter().collect();
        let p = project(&freqs, &results, &request, ProjectionMode::Lenient).unwrap();
        assert_eq!(p.rows[0].entries.len(), 1);
        assert!(p.rows[0].get("Bogus").is_none());
    }

    #[test]
    fn strict_mode_rejects_unknown_names() {
        let (freqs, results) = table();
        let request = OutputRequest::new().with("Bogus", "V");
        let err = project(&freqs, &results, &request, ProjectionMode::Strict).unwrap_err();
        assert_eq!(err, CircuitError::UnknownQuantity("Bogus".into()));
    }

    #[test]
    fn projection_is_idempotent() {
        let (freqs, results) = table();
        let request = OutputRequest::new().with("Ap", "dB").with("Iout", "mA");
        let first = project(&freqs, &results, &request, ProjectionMode::Lenient).unwrap();
        let second = project(&freqs, &results, &request, ProjectionMode::Lenient).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn rescaling_applies_prefix_to_complex_values_only() {
        let milli = UnitSpec::parse("mA");
        let ProjectedValue::Complex(v) = ProjectedValue::Complex(Complex::new(0.5, 0.0)).rescaled(&milli) else {
            panic!("complex stays complex");
        };
        assert_relative_eq!(v.re, 500.0, max_relative = 1e-12);
        let db = ProjectedValue::Decibel { mag: 3.0, phase: 0.1 };
        assert_eq!(db.rescaled(&UnitSpec::parse("dBmV")), db);
    }
}
