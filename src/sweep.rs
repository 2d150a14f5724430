//! Frequency sweep builders and decibel/phase post-processing helpers.

use num_complex::Complex;
use thiserror::Error;

use crate::math::Scalar;

/// Errors raised while generating a frequency sweep.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SweepError {
    /// A sweep needs at least one point.
    #[error("frequency sweep needs at least one point")]
    ZeroPoints,
    /// A bound is NaN or infinite.
    #[error("frequency sweep bound {0} is not finite")]
    NonFiniteBound(Scalar),
    /// A bound is zero or negative.
    #[error("frequency sweep bound {0} Hz must be positive")]
    NonPositiveFrequency(Scalar),
}

/// Generates `n` linearly spaced samples in [start, stop].
#[must_use]
pub fn linspace(start: Scalar, stop: Scalar, n: usize) -> Vec<Scalar> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n as Scalar - 1.0);
            (0..n).map(|i| start + step * i as Scalar).collect()
        }
    }
}

/// Generates `n` logarithmically spaced samples between `start` and `stop` (Hz).
/// Both bounds must be positive; see [`FrequencySweep::frequencies`] for a checked variant.
#[must_use]
pub fn logspace_hz(start_hz: Scalar, stop_hz: Scalar, n: usize) -> Vec<Scalar> {
    match n {
        0 => Vec::new(),
        1 => vec![start_hz],
        _ => {
            let log_start = start_hz.log10();
            let log_stop = stop_hz.log10();
            let step = (log_stop - log_start) / (n as Scalar - 1.0);
            (0..n)
                .map(|i| 10f64.powf(log_start + step * i as Scalar))
                .collect()
        }
    }
}

/// Frequency sweep specification. Both variants include their endpoints.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrequencySweep {
    /// `points` samples evenly spaced in hertz (`Fstart`, `Fend`, `Nfreqs`).
    Linear {
        /// First frequency (Hz).
        start: Scalar,
        /// Last frequency (Hz).
        stop: Scalar,
        /// Number of samples.
        points: usize,
    },
    /// `points` samples evenly spaced in decades (`LFstart`, `LFend`, `Nfreqs`).
    Logarithmic {
        /// First frequency (Hz).
        start: Scalar,
        /// Last frequency (Hz).
        stop: Scalar,
        /// Number of samples.
        points: usize,
    },
}

impl FrequencySweep {
    /// Linear sweep.
    #[must_use]
    pub fn linear(start: Scalar, stop: Scalar, points: usize) -> Self {
        Self::Linear { start, stop, points }
    }

    /// Logarithmic sweep.
    #[must_use]
    pub fn logarithmic(start: Scalar, stop: Scalar, points: usize) -> Self {
        Self::Logarithmic { start, stop, points }
    }

    /// Number of samples.
    #[must_use]
    pub fn points(&self) -> usize {
        match *self {
            Self::Linear { points, .. } | Self::Logarithmic { points, .. } => points,
        }
    }

    /// Checks the bounds and point count.
    pub fn validate(&self) -> Result<(), SweepError> {
        let (start, stop, points) = match *self {
            Self::Linear { start, stop, points } | Self::Logarithmic { start, stop, points } => {
                (start, stop, points)
            }
        };
        if points == 0 {
            return Err(SweepError::ZeroPoints);
        }
        for bound in [start, stop] {
            if !bound.is_finite() {
                return Err(SweepError::NonFiniteBound(bound));
            }
            if bound <= 0.0 {
                return Err(SweepError::NonPositiveFrequency(bound));
            }
        }
        Ok(())
    }

    /// Generates the sample frequencies in sweep order.
    pub fn frequencies(&self) -> Result<Vec<Scalar>, SweepError> {
        self.validate()?;
        Ok(match *self {
            Self::Linear { start, stop, points } => linspace(start, stop, points),
            Self::Logarithmic { start, stop, points } => logspace_hz(start, stop, points),
        })
    }
}

/// `factor · log10(|value|)`, or negative infinity when `|value|` is zero.
#[must_use]
pub fn decibels(value: Complex<Scalar>, factor: Scalar) -> Scalar {
    let magnitude = value.norm();
    if magnitude > 0.0 {
        factor * magnitude.log10()
    } else {
        Scalar::NEG_INFINITY
    }
}

/// Phase in radians.
#[must_use]
pub fn phase_rad(value: Complex<Scalar>) -> Scalar {
    value.arg()
}
