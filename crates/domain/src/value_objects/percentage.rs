use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A percentage stored as a fraction of one.
///
/// Inputs arrive as human-scale percentages (e.g. `55` for 55%); every
/// engine works with the fraction. Converting exactly once at the boundary
/// keeps the `/100` out of the arithmetic loops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Percentage(Decimal);

impl Percentage {
    pub const ZERO: Self = Self(Decimal::ZERO);
    pub const ONE_HUNDRED: Self = Self(Decimal::ONE);

    /// Builds from a human-scale percent value (`55` → 55%).
    #[must_use]
    pub fn from_percent(pct: Decimal) -> Self {
        Self(pct / Decimal::ONE_HUNDRED)
    }

    /// Builds directly from a fraction of one (`0.55` → 55%).
    #[must_use]
    pub fn from_fraction(fraction: Decimal) -> Self {
        Self(fraction)
    }

    /// The fraction-of-one value used in arithmetic.
    #[must_use]
    pub fn fraction(&self) -> Decimal {
        self.0
    }

    /// The human-scale percent value.
    #[must_use]
    pub fn percent(&self) -> Decimal {
        self.0 * Decimal::ONE_HUNDRED
    }

    /// The complement, `1 - self`, as a fraction.
    #[must_use]
    pub fn complement(&self) -> Decimal {
        Decimal::ONE - self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_percent_fraction_roundtrip() {
        let p = Percentage::from_percent(dec!(55));
        assert_eq!(p.fraction(), dec!(0.55));
        assert_eq!(p.percent(), dec!(55));
    }

    #[test]
    fn test_complement() {
        let p = Percentage::from_percent(dec!(40));
        assert_eq!(p.complement(), dec!(0.60));
    }

    #[test]
    fn test_boundary_values() {
        assert_eq!(Percentage::from_percent(dec!(0)).fraction(), Decimal::ZERO);
        assert_eq!(Percentage::from_percent(dec!(100)).fraction(), Decimal::ONE);
    }
}
