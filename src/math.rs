//! Shared numerical primitives anchored on `num-complex` and `nalgebra`.

use nalgebra::Matrix2;
use num_complex::Complex;

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// Primary complex scalar type used for phasors.
pub type CScalar = Complex<Scalar>;
/// Convenient alias for two-by-two complex matrices.
pub type C2x2 = Matrix2<CScalar>;

/// Complex zero.
pub const ZERO: CScalar = Complex::new(0.0, 0.0);
/// Complex one.
pub const ONE: CScalar = Complex::new(1.0, 0.0);

/// Promotes a real value to a complex scalar.
#[inline]
#[must_use]
pub fn real(value: Scalar) -> CScalar {
    Complex::new(value, 0.0)
}

/// Divides `num` by `den`, returning `None` when `den` is exactly zero.
///
/// Only an exact zero is rejected. The quotient is computed with [`Complex::fdiv`], which scales
/// the operands so denominators far from unit magnitude neither underflow nor overflow.
#[inline]
#[must_use]
pub fn checked_div(num: CScalar, den: CScalar) -> Option<CScalar> {
    if den.re == 0.0 && den.im == 0.0 {
        None
    } else {
        Some(num.fdiv(den))
    }
}

/// Reciprocal of `value`, or `None` if `value` is exactly zero.
#[inline]
#[must_use]
pub fn checked_recip(value: CScalar) -> Option<CScalar> {
    if value.re == 0.0 && value.im == 0.0 {
        None
    } else {
        Some(value.finv())
    }
}
