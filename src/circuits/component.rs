use std::fmt;
use std::str::FromStr;

use num_complex::Complex;

use crate::constants::{angular_frequency, REFERENCE_NODE};
use crate::math::{checked_recip, real, Scalar};

use super::twoport::{ChainMatrix, C};
use super::{CircuitError, Result};

/// Element kinds understood by the ladder engine.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// `R`, resistance in ohms.
    Resistor,
    /// `G`, conductance in siemens.
    Conductance,
    /// `L`, inductance in henries.
    Inductor,
    /// `C`, capacitance in farads.
    Capacitor,
}

impl ComponentKind {
    /// Netlist symbol of the kind.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Resistor => "R",
            Self::Conductance => "G",
            Self::Inductor => "L",
            Self::Capacitor => "C",
        }
    }

    /// Parses a netlist symbol, failing with [`CircuitError::UnsupportedComponentType`].
    pub fn from_symbol(symbol: &str) -> Result<Self> {
        match symbol.trim() {
            "R" => Ok(Self::Resistor),
            "G" => Ok(Self::Conductance),
            "L" => Ok(Self::Inductor),
            "C" => Ok(Self::Capacitor),
            other => Err(CircuitError::UnsupportedComponentType(other.to_owned())),
        }
    }
}

impl FromStr for ComponentKind {
    type Err = CircuitError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_symbol(s)
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// How an element sits in the ladder.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Placement {
    /// One terminal on the reference node.
    Shunt,
    /// Bridges two non-reference nodes.
    Series,
}

impl Placement {
    /// Placement implied by a pin pair.
    #[must_use]
    pub fn of(pin1: usize, pin2: usize) -> Self {
        if pin1 == REFERENCE_NODE || pin2 == REFERENCE_NODE {
            Self::Shunt
        } else {
            Self::Series
        }
    }
}

/// Cascade ordering key of a pin pair.
///
/// A shunt element is keyed by its non-reference pin, a series element by its lower pin.
#[must_use]
pub fn in_node(pin1: usize, pin2: usize) -> usize {
    if pin1 == REFERENCE_NODE {
        pin2
    } else if pin2 == REFERENCE_NODE {
        pin1
    } else {
        pin1.min(pin2)
    }
}

/// Frequency-domain impedance/admittance of a two-terminal element.
pub trait Immittance {
    /// Impedance at `frequency` (Hz).
    fn impedance(&self, frequency: Scalar) -> Result<C>;

    /// Admittance at `frequency` (Hz).
    fn admittance(&self, frequency: Scalar) -> Result<C>;

    /// Chain matrix of the element in the given placement.
    fn chain_matrix(&self, placement: Placement, frequency: Scalar) -> Result<ChainMatrix> {
        Ok(match placement {
            Placement::Shunt => ChainMatrix::shunt_admittance(self.admittance(frequency)?),
            Placement::Series => ChainMatrix::series_impedance(self.impedance(frequency)?),
        })
    }
}

/// Frequency-independent elements.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixedKind {
    /// Resistance in ohms.
    Resistor,
    /// Conductance in siemens.
    Conductance,
}

/// Frequency-dependent elements.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReactiveKind {
    /// Inductance in henries.
    Inductor,
    /// Capacitance in farads.
    Capacitor,
}

/// Resistor or conductance with a frequency-invariant chain matrix.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedImpedance {
    kind: FixedKind,
    value: Scalar,
}

impl FixedImpedance {
    /// Creates a fixed element.
    #[must_use]
    pub fn new(kind: FixedKind, value: Scalar) -> Self {
        Self { kind, value }
    }

    /// Element kind.
    #[must_use]
    pub fn kind(&self) -> FixedKind {
        self.kind
    }

    /// Ohms for a resistor, siemens for a conductance.
    #[must_use]
    pub fn value(&self) -> Scalar {
        self.value
    }

    /// Chain matrix of the element; identical at every frequency.
    pub fn fixed_chain_matrix(&self, placement: Placement) -> Result<ChainMatrix> {
        self.chain_matrix(placement, 0.0)
    }
}

impl Immittance for FixedImpedance {
    fn impedance(&self, _frequency: Scalar) -> Result<C> {
        match self.kind {
            FixedKind::Resistor => Ok(real(self.value)),
            FixedKind::Conductance => checked_recip(real(self.value))
                .ok_or(CircuitError::DivisionSingularity { quantity: "series conductance impedance" }),
        }
    }

    fn admittance(&self, _frequency: Scalar) -> Result<C> {
        match self.kind {
            FixedKind::Resistor => checked_recip(real(self.value))
                .ok_or(CircuitError::DivisionSingularity { quantity: "shunt resistor admittance" }),
            FixedKind::Conductance => Ok(real(self.value)),
        }
    }
}

/// Inductor or capacitor whose chain matrix depends on frequency.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReactiveImpedance {
    kind: ReactiveKind,
    value: Scalar,
}

impl ReactiveImpedance {
    /// Creates a reactive element.
    #[must_use]
    pub fn new(kind: ReactiveKind, value: Scalar) -> Self {
        Self { kind, value }
    }

    /// Element kind.
    #[must_use]
    pub fn kind(&self) -> ReactiveKind {
        self.kind
    }

    /// Henries for an inductor, farads for a capacitor.
    #[must_use]
    pub fn value(&self) -> Scalar {
        self.value
    }
}

impl Immittance for ReactiveImpedance {
    fn impedance(&self, frequency: Scalar) -> Result<C> {
        let omega = angular_frequency(frequency);
        match self.kind {
            ReactiveKind::Inductor => Ok(Complex::new(0.0, omega * self.value)),
            ReactiveKind::Capacitor => checked_recip(Complex::new(0.0, omega * self.value))
                .ok_or(CircuitError::DivisionSingularity { quantity: "capacitor impedance" }),
        }
    }

    fn admittance(&self, frequency: Scalar) -> Result<C> {
        checked_recip(self.impedance(frequency)?).ok_or(CircuitError::DivisionSingularity {
            quantity: match self.kind {
                ReactiveKind::Inductor => "shunt inductor admittance",
                ReactiveKind::Capacitor => "shunt capacitor admittance",
            },
        })
    }
}

/// Closed set of element models.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ComponentModel {
    /// R or G.
    Fixed(FixedImpedance),
    /// L or C.
    Reactive(ReactiveImpedance),
}

impl ComponentModel {
    /// Selects the model variant for `kind`. Total over [`ComponentKind`].
    #[must_use]
    pub fn classify(kind: ComponentKind, value: Scalar) -> Self {
        match kind {
            ComponentKind::Resistor => Self::Fixed(FixedImpedance::new(FixedKind::Resistor, value)),
            ComponentKind::Conductance => {
                Self::Fixed(FixedImpedance::new(FixedKind::Conductance, value))
            }
            ComponentKind::Inductor => {
                Self::Reactive(ReactiveImpedance::new(ReactiveKind::Inductor, value))
            }
            ComponentKind::Capacitor => {
                Self::Reactive(ReactiveImpedance::new(ReactiveKind::Capacitor, value))
            }
        }
    }

    /// True for L and C.
    #[must_use]
    pub fn is_frequency_dependent(&self) -> bool {
        matches!(self, Self::Reactive(_))
    }

    /// Chain matrix at `frequency` (Hz). Fixed models ignore the frequency.
    pub fn chain_matrix(&self, placement: Placement, frequency: Scalar) -> Result<ChainMatrix> {
        match self {
            Self::Fixed(m) => m.fixed_chain_matrix(placement),
            Self::Reactive(m) => m.chain_matrix(placement, frequency),
        }
    }
}

/// Raw component description handed over by a netlist reader.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentRecord {
    /// First terminal node.
    pub pin1: usize,
    /// Second terminal node.
    pub pin2: usize,
    /// Element value in SI base units.
    pub value: Scalar,
    /// Kind symbol (`R`, `G`, `L` or `C`).
    pub kind: String,
}

impl ComponentRecord {
    /// Creates a record.
    #[must_use]
    pub fn new(pin1: usize, pin2: usize, value: Scalar, kind: impl Into<String>) -> Self {
        Self { pin1, pin2, value, kind: kind.into() }
    }
}

/// One two-terminal ladder element. Immutable once constructed.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Component {
    pin1: usize,
    pin2: usize,
    kind: ComponentKind,
    in_node: usize,
    model: ComponentModel,
}

impl Component {
    /// Creates a component; the ordering key and model are fixed here.
    #[must_use]
    pub fn new(pin1: usize, pin2: usize, value: Scalar, kind: ComponentKind) -> Self {
        Self {
            pin1,
            pin2,
            kind,
            in_node: in_node(pin1, pin2),
            model: ComponentModel::classify(kind, value),
        }
    }

    /// Resistor of `ohms` between `pin1` and `pin2`.
    #[must_use]
    pub fn resistor(pin1: usize, pin2: usize, ohms: Scalar) -> Self {
        Self::new(pin1, pin2, ohms, ComponentKind::Resistor)
    }

    /// Conductance of `siemens` between `pin1` and `pin2`.
    #[must_use]
    pub fn conductance(pin1: usize, pin2: usize, siemens: Scalar) -> Self {
        Self::new(pin1, pin2, siemens, ComponentKind::Conductance)
    }

    /// Inductor of `henries` between `pin1` and `pin2`.
    #[must_use]
    pub fn inductor(pin1: usize, pin2: usize, henries: Scalar) -> Self {
        Self::new(pin1, pin2, henries, ComponentKind::Inductor)
    }

    /// Capacitor of `farads` between `pin1` and `pin2`.
    #[must_use]
    pub fn capacitor(pin1: usize, pin2: usize, farads: Scalar) -> Self {
        Self::new(pin1, pin2, farads, ComponentKind::Capacitor)
    }

    /// Builds a component from a reader record.
    pub fn from_record(record: &ComponentRecord) -> Result<Self> {
        let kind = ComponentKind::from_symbol(&record.kind)?;
        Ok(Self::new(record.pin1, record.pin2, record.value, kind))
    }

    /// First terminal node.
    #[must_use]
    pub fn pin1(&self) -> usize {
        self.pin1
    }

    /// Second terminal node.
    #[must_use]
    pub fn pin2(&self) -> usize {
        self.pin2
    }

    /// Element value in SI base units.
    #[must_use]
    pub fn value(&self) -> Scalar {
        match self.model {
            ComponentModel::Fixed(m) => m.value(),
            ComponentModel::Reactive(m) => m.value(),
        }
    }

    /// Element kind.
    #[must_use]
    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// Element model variant.
    #[must_use]
    pub fn model(&self) -> &ComponentModel {
        &self.model
    }

    /// Cascade ordering key.
    #[must_use]
    pub fn in_node(&self) -> usize {
        self.in_node
    }

    /// Shunt or series placement.
    #[must_use]
    pub fn placement(&self) -> Placement {
        Placement::of(self.pin1, self.pin2)
    }

    /// True when the element bridges two non-reference nodes.
    #[must_use]
    pub fn is_series(&self) -> bool {
        self.placement() == Placement::Series
    }

    /// Chain matrix of the element at `frequency` (Hz).
    pub fn chain_matrix(&self, frequency: Scalar) -> Result<ChainMatrix> {
        self.model.chain_matrix(self.placement(), frequency)
    }
}

impl TryFrom<&ComponentRecord> for Component {
    type Error = CircuitError;

    fn try_from(record: &ComponentRecord) -> Result<Self> {
        Self::from_record(record)
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n1={} n2={} {}={}", self.pin1, self.pin2, self.kind, self.value())
    }
}
