//! Source/load termination of a ladder and the quantities derived from it.
//!
//! The network is driven by a Thevenin source `(Vth, Rs)` and loaded by `RL`. From the chain
//! matrix `[A, B; C, D]`:
//!
//! ```text
//! Zin  = (A·RL + B) / (C·RL + D)
//! Zout = (D·Rs + B) / (C·Rs + A)
//! Vin  = Vth · Zin / (Zin + Rs)
//! Iin  = Vin / Zin
//! Iout = Vin / (A·RL + B)
//! Vout = RL · Iout
//! Pin  = Vin · conj(Iin)
//! Pout = Vout · conj(Iout)
//! Av   = 1 / (A + B/RL)
//! Ai   = Iout / Iin
//! Ap   = Pout / Pin
//! ```
//!
//! `Zout` is looked at from the load side with the source resistance in place, so it is
//! terminated by `Rs` rather than `RL`.

use std::fmt;
use std::str::FromStr;

use crate::math::{checked_div, checked_recip, real, Scalar};

use super::twoport::{ChainMatrix, C};
use super::{CircuitError, Result};

/// Source and load terminations.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Termination {
    /// Thevenin source voltage (V).
    pub vth: Scalar,
    /// Source resistance (Ω).
    pub rs: Scalar,
    /// Load resistance (Ω).
    pub rl: Scalar,
}

impl Termination {
    /// Creates a termination record.
    #[must_use]
    pub fn new(vth: Scalar, rs: Scalar, rl: Scalar) -> Self {
        Self { vth, rs, rl }
    }
}

/// Named derived quantities.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Quantity {
    /// Input impedance.
    Zin,
    /// Output impedance.
    Zout,
    /// Input port voltage.
    Vin,
    /// Input port current.
    Iin,
    /// Output port voltage.
    Vout,
    /// Output port current.
    Iout,
    /// Complex power into the input port.
    Pin,
    /// Complex power delivered to the load.
    Pout,
    /// Voltage gain.
    Av,
    /// Current gain.
    Ai,
    /// Power gain.
    Ap,
}

impl Quantity {
    /// All quantities in table order.
    pub const ALL: [Quantity; 11] = [
        Quantity::Zin,
        Quantity::Zout,
        Quantity::Vin,
        Quantity::Iin,
        Quantity::Vout,
        Quantity::Iout,
        Quantity::Pin,
        Quantity::Pout,
        Quantity::Av,
        Quantity::Ai,
        Quantity::Ap,
    ];

    /// Canonical name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Zin => "Zin",
            Self::Zout => "Zout",
            Self::Vin => "Vin",
            Self::Iin => "Iin",
            Self::Vout => "Vout",
            Self::Iout => "Iout",
            Self::Pin => "Pin",
            Self::Pout => "Pout",
            Self::Av => "Av",
            Self::Ai => "Ai",
            Self::Ap => "Ap",
        }
    }

    /// Looks a quantity up by its canonical (case-sensitive) name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|q| q.name() == name)
    }

    /// Power and impedance quantities take `10·log10` in decibels, the rest `20·log10`.
    #[must_use]
    pub fn is_power_family(self) -> bool {
        matches!(self, Self::Pin | Self::Pout | Self::Zin | Self::Zout | Self::Ap)
    }
}

impl FromStr for Quantity {
    type Err = CircuitError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s).ok_or_else(|| CircuitError::UnknownQuantity(s.to_owned()))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Every derived quantity at one frequency.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantitySet {
    /// Input impedance.
    pub zin: C,
    /// Output impedance.
    pub zout: C,
    /// Input port voltage.
    pub vin: C,
    /// Input port current.
    pub iin: C,
    /// Output port voltage.
    pub vout: C,
    /// Output port current.
    pub iout: C,
    /// Complex input power.
    pub pin: C,
    /// Complex output power.
    pub pout: C,
    /// Voltage gain.
    pub av: C,
    /// Current gain.
    pub ai: C,
    /// Power gain.
    pub ap: C,
}

impl QuantitySet {
    /// Value of `quantity`.
    #[must_use]
    pub fn get(&self, quantity: Quantity) -> C {
        match quantity {
            Quantity::Zin => self.zin,
            Quantity::Zout => self.zout,
            Quantity::Vin => self.vin,
            Quantity::Iin => self.iin,
            Quantity::Vout => self.vout,
            Quantity::Iout => self.iout,
            Quantity::Pin => self.pin,
            Quantity::Pout => self.pout,
            Quantity::Av => self.av,
            Quantity::Ai => self.ai,
            Quantity::Ap => self.ap,
        }
    }
}

fn div(num: C, den: C, quantity: &'static str) -> Result<C> {
    checked_div(num, den).ok_or(CircuitError::DivisionSingularity { quantity })
}

/// Derives every quantity of a terminated chain matrix.
///
/// A chain matrix with an overflowed or NaN element is rejected with
/// [`CircuitError::NonFinite`] before any quantity is derived.
pub fn solve(chain: &ChainMatrix, termination: &Termination) -> Result<QuantitySet> {
    if !chain.is_finite() {
        return Err(CircuitError::NonFinite { quantity: "chain matrix" });
    }
    let ChainMatrix { a, b, c, d } = *chain;
    let rl = real(termination.rl);
    let rs = real(termination.rs);
    let vth = real(termination.vth);

    let load_num = chain.load_numerator(termination.rl);
    let zin = div(load_num, c * rl + d, "Zin")?;
    let zout = div(d * rs + b, c * rs + a, "Zout")?;
    let vin = div(vth * zin, zin + rs, "Vin")?;
    let iin = div(vin, zin, "Iin")?;
    let iout = div(vin, load_num, "Iout")?;
    let vout = rl * iout;
    let pin = vin * iin.conj();
    let pout = vout * iout.conj();
    let b_over_rl = div(b, rl, "Av")?;
    let av = checked_recip(a + b_over_rl).ok_or(CircuitError::DivisionSingularity { quantity: "Av" })?;
    let ai = div(iout, iin, "Ai")?;
    let ap = div(pout, pin, "Ap")?;

    Ok(QuantitySet { zin, zout, vin, iin, vout, iout, pin, pout, av, ai, ap })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::circuits::component::Component;
    use crate::math::ZERO;

    fn matched() -> Termination {
        Termination::new(5.0, 50.0, 50.0)
    }

    #[test]
    fn series_resistor_terminated() {
        let chain = Component::resistor(1, 2, 50.0).chain_matrix(1.0e3).unwrap();
        let q = solve(&chain, &matched()).unwrap();
        assert_relative_eq!(q.zin.re, 100.0, epsilon = 1e-12);
        assert_relative_eq!(q.vin.re, 10.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(q.iin.re, 1.0 / 30.0, epsilon = 1e-12);
        assert_relative_eq!(q.iout.re, 1.0 / 30.0, epsilon = 1e-12);
        assert_relative_eq!(q.vout.re, 5.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(q.av.re, 0.5, epsilon = 1e-12);
        assert_relative_eq!(q.ai.re, 1.0, epsilon = 1e-12);
        assert_relative_eq!(q.ap.re, 0.5, epsilon = 1e-12);
        // Zout = (1·50 + 50) / (0·50 + 1)
        assert_relative_eq!(q.zout.re, 100.0, epsilon = 1e-12);
    }

    #[test]
    fn shunt_resistor_terminated() {
        let chain = Component::resistor(1, 0, 50.0).chain_matrix(1.0e3).unwrap();
        let q = solve(&chain, &matched()).unwrap();
        assert_relative_eq!(q.zin.re, 25.0, epsilon = 1e-12);
        assert_relative_eq!(q.vin.re, 5.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(q.vout.re, q.vin.re, epsilon = 1e-12);
        assert_relative_eq!(q.ai.re, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn output_impedance_uses_source_resistance() {
        let chain = Component::resistor(1, 2, 10.0).chain_matrix(1.0).unwrap();
        let q = solve(&chain, &Termination::new(1.0, 30.0, 1.0e3)).unwrap();
        // (D·Rs + B) / (C·Rs + A) = 30 + 10
        assert_relative_eq!(q.zout.re, 40.0, epsilon = 1e-12);
    }

    #[test]
    fn powers_are_conjugate_products() {
        let chain = Component::capacitor(1, 2, 1e-6).chain_matrix(1.0e3).unwrap();
        let q = solve(&chain, &matched()).unwrap();
        let pin = q.vin * q.iin.conj();
        assert_relative_eq!(q.pin.re, pin.re, epsilon = 1e-15);
        assert_relative_eq!(q.pin.im, pin.im, epsilon = 1e-15);
        // Real power is conserved through a lossless series capacitor.
        assert_relative_eq!(q.pin.re, q.pout.re, max_relative = 1e-12);
    }

    #[test]
    fn zero_load_denominator_is_singular() {
        // A + B/RL with RL = 0 divides by zero.
        let chain = ChainMatrix::identity();
        let err = solve(&chain, &Termination::new(1.0, 50.0, 0.0)).unwrap_err();
        assert!(matches!(err, CircuitError::DivisionSingularity { .. }));
    }

    #[test]
    fn zero_source_voltage_makes_current_gain_singular() {
        // Iin is exactly zero, so Iout / Iin has no value.
        let chain = Component::resistor(1, 2, 50.0).chain_matrix(1.0).unwrap();
        let err = solve(&chain, &Termination::new(0.0, 50.0, 50.0)).unwrap_err();
        assert_eq!(err, CircuitError::DivisionSingularity { quantity: "Ai" });
    }

    #[test]
    fn quantity_names_round_trip() {
        for q in Quantity::ALL {
            assert_eq!(q.name().parse::<Quantity>().unwrap(), q);
        }
        assert!("Xin".parse::<Quantity>().is_err());
        assert!(Quantity::Zout.is_power_family());
        assert!(!Quantity::Vout.is_power_family());
    }

    #[test]
    fn get_reads_matching_field() {
        let chain = Component::resistor(1, 2, 50.0).chain_matrix(1.0).unwrap();
        let q = solve(&chain, &matched()).unwrap();
        assert_eq!(q.get(Quantity::Zin), q.zin);
        assert_eq!(q.get(Quantity::Ap), q.ap);
        assert_ne!(q.get(Quantity::Iin), ZERO);
    }

    #[test]
    fn overflowed_chain_matrix_is_rejected() {
        let chain = ChainMatrix::series_impedance(real(Scalar::INFINITY));
        assert!(!chain.is_finite());
        assert_eq!(
            solve(&chain, &matched()),
            Err(CircuitError::NonFinite { quantity: "chain matrix" })
        );
    }

    #[test]
    fn tiny_input_impedance_stays_finite() {
        // |C·RL + D| is near 1e162, so |den|² overflows f64.
        let chain = Component::resistor(1, 0, 1.0e-160).chain_matrix(1.0).unwrap();
        let q = solve(&chain, &matched()).unwrap();
        assert_relative_eq!(q.zin.re, 1.0e-160, max_relative = 1e-9);
        assert_relative_eq!(q.iin.re, 0.1, max_relative = 1e-9);
        for quantity in Quantity::ALL {
            assert!(q.get(quantity).is_finite(), "{quantity} is not finite");
        }
    }
}
