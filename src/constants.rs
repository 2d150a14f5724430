//! Baseline constants and conversion helpers.

use std::f64::consts::PI;

/// Node identifier of the reference (ground) node.
pub const REFERENCE_NODE: usize = 0;

/// Multiplier applied to `log10(|x|)` for amplitude-type quantities (V, I, gains of V/I).
pub const AMPLITUDE_DB_FACTOR: f64 = 20.0;
/// Multiplier applied to `log10(|x|)` for power-type and impedance-type quantities.
pub const POWER_DB_FACTOR: f64 = 10.0;

/// Returns the angular frequency corresponding to a linear frequency `hz`.
#[inline]
#[must_use]
pub fn angular_frequency(hz: f64) -> f64 {
    2.0 * PI * hz
}
