//! Chain (ABCD) matrix representation of two-port stages.

use crate::math::{real, C2x2, CScalar, ONE, ZERO};

/// Convenience alias for complex scalars.
pub type C = CScalar;

/// ABCD chain matrix `[[A, B], [C, D]]` relating input port `(V1, I1)` to output port `(V2, I2)`:
/// `V1 = A·V2 + B·I2`, `I1 = C·V2 + D·I2`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainMatrix {
    /// A element (open-circuit voltage ratio).
    pub a: C,
    /// B element (short-circuit transfer impedance).
    pub b: C,
    /// C element (open-circuit transfer admittance).
    pub c: C,
    /// D element (short-circuit current ratio).
    pub d: C,
}

impl Default for ChainMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl ChainMatrix {
    /// Identity two-port (through connection): [[1, 0], [0, 1]].
    #[must_use]
    pub const fn identity() -> Self {
        Self { a: ONE, b: ZERO, c: ZERO, d: ONE }
    }

    /// Constructs a chain matrix from explicit ABCD elements.
    #[must_use]
    pub const fn from_abcd(a: C, b: C, c: C, d: C) -> Self {
        Self { a, b, c, d }
    }

    /// Series impedance `Z` represented as a two-port: [[1, Z], [0, 1]].
    #[must_use]
    pub const fn series_impedance(z: C) -> Self {
        Self::from_abcd(ONE, z, ZERO, ONE)
    }

    /// Shunt admittance `Y` represented as a two-port: [[1, 0], [Y, 1]].
    #[must_use]
    pub const fn shunt_admittance(y: C) -> Self {
        Self::from_abcd(ONE, ZERO, y, ONE)
    }

    /// ABCD determinant `ad - bc`. Equals one for any reciprocal network.
    #[must_use]
    pub fn determinant(&self) -> C {
        self.a * self.d - self.b * self.c
    }

    /// Cascades this two-port with `rhs` (i.e., self followed by rhs).
    #[must_use]
    pub fn cascade(&self, rhs: &ChainMatrix) -> ChainMatrix {
        // Matrix multiplication [[a b],[c d]] * [[a' b'],[c' d']]
        ChainMatrix {
            a: self.a * rhs.a + self.b * rhs.c,
            b: self.a * rhs.b + self.b * rhs.d,
            c: self.c * rhs.a + self.d * rhs.c,
            d: self.c * rhs.b + self.d * rhs.d,
        }
    }

    /// Cascades a sequence of two-ports from first to last. Returns identity for empty.
    #[must_use]
    pub fn cascade_all<'a>(list: impl IntoIterator<Item = &'a ChainMatrix>) -> ChainMatrix {
        let mut acc = ChainMatrix::identity();
        for t in list {
            acc = acc.cascade(t);
        }
        acc
    }

    /// Numerator `A·RL + B` shared by the input impedance and output current expressions.
    #[must_use]
    pub fn load_numerator(&self, r_load: f64) -> C {
        self.a * real(r_load) + self.b
    }

    /// True when every element is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        [self.a, self.b, self.c, self.d].iter().all(|v| v.is_finite())
    }

    /// Copies the elements into an `nalgebra` matrix.
    #[must_use]
    pub fn to_matrix(&self) -> C2x2 {
        C2x2::new(self.a, self.b, self.c, self.d)
    }

    /// Builds a chain matrix from an `nalgebra` matrix.
    #[must_use]
    pub fn from_matrix(m: &C2x2) -> Self {
        Self::from_abcd(m[(0, 0)], m[(0, 1)], m[(1, 0)], m[(1, 1)])
    }
}

impl From<C2x2> for ChainMatrix {
    fn from(m: C2x2) -> Self {
        Self::from_matrix(&m)
    }
}

impl From<ChainMatrix> for C2x2 {
    fn from(t: ChainMatrix) -> Self {
        t.to_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn cascade_identity_is_noop() {
        let t = ChainMatrix::series_impedance(C::new(50.0, 0.0));
        let id = ChainMatrix::identity();
        let res = t.cascade(&id);
        assert_eq!(res, t);
        assert_eq!(id.cascade(&t), t);
    }

    #[test]
    fn cascade_of_series_impedances_adds_b_terms() {
        let t1 = ChainMatrix::series_impedance(C::new(10.0, 1.0));
        let t2 = ChainMatrix::series_impedance(C::new(5.0, -2.0));
        let tc = t1.cascade(&t2);
        let te = ChainMatrix::series_impedance(C::new(15.0, -1.0));
        assert_relative_eq!(tc.b.re, te.b.re, epsilon = 1e-12);
        assert_relative_eq!(tc.b.im, te.b.im, epsilon = 1e-12);
        assert_relative_eq!(tc.a.re, 1.0, epsilon = 1e-12);
        assert_relative_eq!(tc.d.re, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn cascade_of_shunt_admittances_adds_c_terms() {
        let t = ChainMatrix::shunt_admittance(C::new(0.01, 0.0))
            .cascade(&ChainMatrix::shunt_admittance(C::new(0.0, 0.02)));
        assert_relative_eq!(t.c.re, 0.01, epsilon = 1e-15);
        assert_relative_eq!(t.c.im, 0.02, epsilon = 1e-15);
        assert_eq!(t.b, ZERO);
    }

    #[test]
    fn cascade_matches_nalgebra_product() {
        let m1 = ChainMatrix::series_impedance(C::new(10.0, 3.0));
        let m2 = ChainMatrix::shunt_admittance(C::new(0.02, -0.01));
        let m3 = ChainMatrix::series_impedance(C::new(0.0, -159.0));
        let ours = ChainMatrix::cascade_all([&m1, &m2, &m3]);
        let reference = ChainMatrix::from(m1.to_matrix() * m2.to_matrix() * m3.to_matrix());
        for (x, y) in [(ours.a, reference.a), (ours.b, reference.b), (ours.c, reference.c), (ours.d, reference.d)] {
            assert_relative_eq!(x.re, y.re, epsilon = 1e-12);
            assert_relative_eq!(x.im, y.im, epsilon = 1e-12);
        }
    }

    #[test]
    fn cascade_is_order_sensitive() {
        let s = ChainMatrix::series_impedance(C::new(50.0, 0.0));
        let p = ChainMatrix::shunt_admittance(C::new(0.02, 0.0));
        assert_ne!(s.cascade(&p), p.cascade(&s));
    }

    #[test]
    fn passive_ladder_is_reciprocal() {
        let t = ChainMatrix::series_impedance(C::new(10.0, 5.0))
            .cascade(&ChainMatrix::shunt_admittance(C::new(1e-3, -2e-3)));
        let det = t.determinant();
        assert_relative_eq!(det.re, 1.0, epsilon = 1e-12);
        assert_relative_eq!(det.im, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn empty_cascade_is_identity() {
        let none: [ChainMatrix; 0] = [];
        assert_eq!(ChainMatrix::cascade_all(none.iter()), ChainMatrix::identity());
    }
}
