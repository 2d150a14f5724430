//! Per-frequency chain-matrix composition.
//!
//! For every frequency the running matrix starts at identity and is right-multiplied by each
//! ordered component's chain matrix. Frequencies are independent of one another; with the
//! `parallel` feature they are evaluated on the rayon pool, each into its own slot.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

use crate::math::Scalar;

use super::component::Component;
use super::twoport::ChainMatrix;
use super::Result;

/// Network chain matrix of `components` (already in cascade order) at `frequency` (Hz).
pub fn cascade_at(components: &[Component], frequency: Scalar) -> Result<ChainMatrix> {
    components.iter().try_fold(ChainMatrix::identity(), |acc, component| {
        Ok(acc.cascade(&component.chain_matrix(frequency)?))
    })
}

/// Network chain matrix at every frequency of `frequencies`, in sweep order.
///
/// A singular element matrix is reported with the sweep position it occurred at.
pub fn cascade_sweep(components: &[Component], frequencies: &[Scalar]) -> Result<Vec<ChainMatrix>> {
    debug!(
        components = components.len(),
        points = frequencies.len(),
        "cascading ladder chain matrices"
    );
    let point = |(idx, &f): (usize, &Scalar)| cascade_at(components, f).map_err(|e| e.at(idx, f));

    #[cfg(feature = "parallel")]
    {
        frequencies.par_iter().enumerate().map(point).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        frequencies.iter().enumerate().map(point).collect()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::circuits::CircuitError;
    use crate::math::real;

    fn assert_matrix_eq(lhs: &ChainMatrix, rhs: &ChainMatrix) {
        for (x, y) in [(lhs.a, rhs.a), (lhs.b, rhs.b), (lhs.c, rhs.c), (lhs.d, rhs.d)] {
            assert_relative_eq!(x.re, y.re, epsilon = 1e-12, max_relative = 1e-12);
            assert_relative_eq!(x.im, y.im, epsilon = 1e-12, max_relative = 1e-12);
        }
    }

    #[test]
    fn three_stage_cascade_equals_matrix_product() {
        let f = 2.5e3;
        let parts = [
            Component::resistor(1, 2, 50.0),
            Component::capacitor(2, 0, 1e-6),
            Component::inductor(2, 3, 1e-3),
            Component::conductance(3, 0, 0.01),
        ];
        let total = cascade_at(&parts, f).unwrap();

        let product = parts
            .iter()
            .map(|c| c.chain_matrix(f).unwrap().to_matrix())
            .fold(ChainMatrix::identity().to_matrix(), |acc, m| acc * m);
        assert_matrix_eq(&total, &ChainMatrix::from(product));
    }

    #[test]
    fn single_series_resistor_matches_element() {
        let total = cascade_at(&[Component::resistor(1, 2, 50.0)], 1.0).unwrap();
        assert_eq!(total, ChainMatrix::series_impedance(real(50.0)));
    }

    #[test]
    fn empty_cascade_is_identity() {
        assert_eq!(cascade_at(&[], 1.0e3).unwrap(), ChainMatrix::identity());
    }

    #[test]
    fn sweep_preserves_frequency_order() {
        let parts = [Component::inductor(1, 2, 1e-3)];
        let freqs = [10.0, 1.0e3, 1.0e5];
        let mats = cascade_sweep(&parts, &freqs).unwrap();
        assert_eq!(mats.len(), 3);
        for (m, f) in mats.iter().zip(freqs) {
            assert_relative_eq!(m.b.im, 2.0 * std::f64::consts::PI * f * 1e-3, max_relative = 1e-12);
        }
    }

    #[test]
    fn sweep_reports_singular_point() {
        let parts = [Component::capacitor(1, 2, 1e-9)];
        let err = cascade_sweep(&parts, &[1.0e3, 0.0]).unwrap_err();
        assert!(matches!(err, CircuitError::SingularityAt { index: 1, .. }));
    }
}
