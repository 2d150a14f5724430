//! SI magnitude prefixes and unit-string interpretation.
//!
//! This is the single prefix table of the crate. Netlist readers use
//! [`parse_prefixed_value`] to expand values such as `4.7k`, and result writers use
//! [`UnitSpec`] to decide between decibel and rectangular presentation and to rescale
//! prefixed units such as `mV`.

use std::fmt;

/// Marker that selects decibel/phase presentation inside a unit string.
pub const DECIBEL_MARKER: &str = "dB";

/// Supported SI magnitude prefixes.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prefix {
    /// `p`, 10⁻¹².
    Pico,
    /// `n`, 10⁻⁹.
    Nano,
    /// `u`, 10⁻⁶.
    Micro,
    /// `m`, 10⁻³.
    Milli,
    /// `k`, 10³.
    Kilo,
    /// `M`, 10⁶.
    Mega,
    /// `G`, 10⁹.
    Giga,
}

impl Prefix {
    /// Every prefix in ascending order of magnitude.
    pub const ALL: [Prefix; 7] = [
        Prefix::Pico,
        Prefix::Nano,
        Prefix::Micro,
        Prefix::Milli,
        Prefix::Kilo,
        Prefix::Mega,
        Prefix::Giga,
    ];

    /// Looks up a prefix by its (case-sensitive) symbol.
    #[must_use]
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'p' => Some(Self::Pico),
            'n' => Some(Self::Nano),
            'u' => Some(Self::Micro),
            'm' => Some(Self::Milli),
            'k' => Some(Self::Kilo),
            'M' => Some(Self::Mega),
            'G' => Some(Self::Giga),
            _ => None,
        }
    }

    /// Symbol used in netlists and unit strings.
    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Self::Pico => 'p',
            Self::Nano => 'n',
            Self::Micro => 'u',
            Self::Milli => 'm',
            Self::Kilo => 'k',
            Self::Mega => 'M',
            Self::Giga => 'G',
        }
    }

    /// Base-10 exponent of the prefix.
    #[must_use]
    pub fn exponent(self) -> i32 {
        match self {
            Self::Pico => -12,
            Self::Nano => -9,
            Self::Micro => -6,
            Self::Milli => -3,
            Self::Kilo => 3,
            Self::Mega => 6,
            Self::Giga => 9,
        }
    }

    /// Multiplicative factor `10^exponent`.
    #[must_use]
    pub fn factor(self) -> f64 {
        10f64.powi(self.exponent())
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Parses a numeric literal with an optional trailing magnitude prefix.
///
/// `"50"`, `"1e-6"`, `"4.7k"` and `"10n"` are all accepted. Returns `None` for anything else.
#[must_use]
pub fn parse_prefixed_value(text: &str) -> Option<f64> {
    let text = text.trim();
    if let Ok(v) = text.parse::<f64>() {
        return Some(v);
    }
    let last = text.chars().last()?;
    let prefix = Prefix::from_symbol(last)?;
    let mantissa = &text[..text.len() - last.len_utf8()];
    mantissa
        .parse::<f64>()
        .ok()
        .map(|m| m * prefix.factor())
}

/// Interpretation of a requested output unit such as `V`, `mA`, `dBV` or `dBmW`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UnitSpec {
    /// Whether decibel magnitude and phase are requested.
    pub decibel: bool,
    /// Magnitude prefix, if the unit starts with one followed by a base unit.
    pub prefix: Option<Prefix>,
    /// Remaining base unit (e.g. `V`, `Ohms`). May be empty.
    pub base: String,
}

impl UnitSpec {
    /// Interprets a unit string.
    ///
    /// A leading prefix symbol only counts as a prefix when a base unit follows it, so a bare
    /// `m` is read as a base unit.
    #[must_use]
    pub fn parse(unit: &str) -> Self {
        let unit = unit.trim();
        let decibel = unit.contains(DECIBEL_MARKER);
        let rest = unit.replacen(DECIBEL_MARKER, "", 1);
        let mut chars = rest.chars();
        let (prefix, base) = match (chars.next(), chars.as_str()) {
            (Some(c), tail) if !tail.is_empty() => match Prefix::from_symbol(c) {
                Some(p) => (Some(p), tail.to_owned()),
                None => (None, rest.clone()),
            },
            _ => (None, rest.clone()),
        };
        Self { decibel, prefix, base }
    }

    /// Factor a raw SI value is divided by to express it in this unit.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.prefix.map_or(1.0, Prefix::factor)
    }
}

impl fmt::Display for UnitSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.decibel {
            f.write_str(DECIBEL_MARKER)?;
        }
        if let Some(p) = self.prefix {
            write!(f, "{p}")?;
        }
        f.write_str(&self.base)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn prefix_table_round_trips_symbols() {
        for p in Prefix::ALL {
            assert_eq!(Prefix::from_symbol(p.symbol()), Some(p));
        }
        assert_eq!(Prefix::from_symbol('x'), None);
    }

    #[test]
    fn prefixed_values_expand() {
        assert_relative_eq!(parse_prefixed_value("4.7k").unwrap(), 4_700.0, max_relative = 1e-12);
        assert_relative_eq!(parse_prefixed_value("10n").unwrap(), 1.0e-8, max_relative = 1e-12);
        assert_relative_eq!(parse_prefixed_value("1e-6").unwrap(), 1.0e-6, max_relative = 1e-12);
        assert_relative_eq!(parse_prefixed_value(" 50 ").unwrap(), 50.0);
        assert!(parse_prefixed_value("error").is_none());
        assert!(parse_prefixed_value("").is_none());
        assert!(parse_prefixed_value("k").is_none());
    }

    #[test]
    fn unit_spec_reads_decibel_and_prefix() {
        let u = UnitSpec::parse("dBmV");
        assert!(u.decibel);
        assert_eq!(u.prefix, Some(Prefix::Milli));
        assert_eq!(u.base, "V");
        assert_eq!(u.to_string(), "dBmV");

        let u = UnitSpec::parse("kOhms");
        assert!(!u.decibel);
        assert_eq!(u.prefix, Some(Prefix::Kilo));
        assert_relative_eq!(u.scale(), 1.0e3);

        let u = UnitSpec::parse("Ohms");
        assert_eq!(u.prefix, None);
        assert_eq!(u.base, "Ohms");
    }

    #[test]
    fn bare_prefix_symbol_is_a_base_unit() {
        let u = UnitSpec::parse("m");
        assert_eq!(u.prefix, None);
        assert_eq!(u.base, "m");
        assert_relative_eq!(u.scale(), 1.0);
        assert_eq!(UnitSpec::parse(""), UnitSpec::default());
    }
}
