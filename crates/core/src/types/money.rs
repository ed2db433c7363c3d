//! Monetary amounts in Brazilian reais using decimal arithmetic.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Currency symbol printed in front of every rendered amount.
pub const CURRENCY_SYMBOL: &str = "R$";

/// A monetary amount in BRL.
///
/// Prices are captured as given; whether an amount may be negative is a
/// catalog validation concern, not a property of the type.
///
/// ```
/// use ipizza_core::Money;
/// use rust_decimal::Decimal;
///
/// let price = Money::new(Decimal::new(2550, 2));
/// assert_eq!(price.to_string(), "R$ 25.50");
/// assert_eq!(price.times(2).amount_str(), "51.00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Zero reais.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Wrap a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Whole reais, e.g. `Money::from_reais(40)` is R$ 40.00.
    #[must_use]
    pub fn from_reais(reais: u32) -> Self {
        Self(Decimal::from(reais))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether the amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// The amount multiplied by a quantity.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }

    /// The amount with exactly two decimal digits and a period separator,
    /// rounding half away from zero (`"12.50"`).
    #[must_use]
    pub fn amount_str(&self) -> String {
        let mut rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(2);
        rounded.to_string()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{CURRENCY_SYMBOL} {}", self.amount_str())
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_str_pads_whole_numbers() {
        assert_eq!(Money::from_reais(40).amount_str(), "40.00");
        assert_eq!(Money::ZERO.amount_str(), "0.00");
    }

    #[test]
    fn test_amount_str_rounds_half_away_from_zero() {
        assert_eq!(Money::new(Decimal::new(12345, 3)).amount_str(), "12.35");
        assert_eq!(Money::new(Decimal::new(12344, 3)).amount_str(), "12.34");
    }

    #[test]
    fn test_display_uses_currency_symbol() {
        assert_eq!(Money::new(Decimal::new(650, 2)).to_string(), "R$ 6.50");
    }

    #[test]
    fn test_times_and_sum() {
        let total: Money = [Money::from_reais(25).times(2), Money::from_reais(45)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::from_reais(95));
    }

    #[test]
    fn test_is_negative() {
        assert!(Money::new(Decimal::new(-1, 2)).is_negative());
        assert!(!Money::ZERO.is_negative());
        assert!(!Money::from_reais(3).is_negative());
    }

    #[test]
    fn test_deserialize_accepts_numbers_and_strings() {
        let from_number: Money = serde_json::from_str("25").unwrap();
        let from_string: Money = serde_json::from_str("\"25.00\"").unwrap();
        assert_eq!(from_number, from_string);
    }
}
