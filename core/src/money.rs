//! Monetary amounts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// Money amount in cents (to avoid floating point issues)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero amount
    pub const ZERO: Self = Self(0);

    /// Creates a new money amount from cents
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Creates a new money amount from whole currency units, saturating at the `i64` bounds
    #[must_use]
    pub const fn from_units(units: i64) -> Self {
        Self(units.saturating_mul(100))
    }

    /// Returns the value in cents
    #[must_use]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns true when the amount is below zero
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Subtraction floored at zero
    #[must_use]
    pub const fn saturating_sub_to_zero(self, rhs: Self) -> Self {
        let diff = self.0.saturating_sub(rhs.0);
        if diff < 0 { Self(0) } else { Self(diff) }
    }

    /// Addition, `None` on overflow
    #[must_use]
    pub const fn checked_add(self, rhs: Self) -> Option<Self> {
        match self.0.checked_add(rhs.0) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// Subtraction, `None` on overflow
    #[must_use]
    pub const fn checked_sub(self, rhs: Self) -> Option<Self> {
        match self.0.checked_sub(rhs.0) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// Multiplication by a quantity, `None` on overflow
    #[must_use]
    pub fn checked_mul(self, quantity: i32) -> Option<Self> {
        self.0.checked_mul(i64::from(quantity)).map(Self)
    }

    /// Sum of `amounts`, `None` if any partial sum overflows
    pub fn checked_sum(amounts: impl IntoIterator<Item = Self>) -> Option<Self> {
        amounts
            .into_iter()
            .try_fold(Self::ZERO, Self::checked_add)
    }

    /// Returns the value in currency units (as floating point)
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // i64 to f64 precision loss is acceptable for display
    pub fn units(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

// The operators saturate at the `i64` bounds. Use the `checked_*` methods
// where an overflow must be reported.
impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl Mul<i32> for Money {
    type Output = Self;

    fn mul(self, rhs: i32) -> Self {
        Self(self.0.saturating_mul(i64::from(rhs)))
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.units())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic() {
        let price = Money::from_cents(1250);
        assert_eq!((price * 3).cents(), 3750);
        assert_eq!((price + Money::from_units(1)).cents(), 1350);
        assert_eq!(Money::from_cents(100).saturating_sub_to_zero(price), Money::ZERO);
    }

    #[test]
    fn test_checked_arithmetic_reports_overflow() {
        let near_max = Money::from_cents(i64::MAX - 10);
        assert_eq!(near_max.checked_add(Money::from_cents(10)), Some(Money::from_cents(i64::MAX)));
        assert_eq!(near_max.checked_add(Money::from_cents(11)), None);
        assert_eq!(near_max.checked_mul(2), None);
        assert_eq!(Money::from_cents(i64::MIN).checked_sub(Money::from_cents(1)), None);
        assert_eq!(Money::from_cents(250).checked_mul(4), Some(Money::from_cents(1000)));
        assert_eq!(Money::checked_sum([near_max, Money::from_cents(20)]), None);
        assert_eq!(
            Money::checked_sum([Money::from_cents(1), Money::from_cents(2)]),
            Some(Money::from_cents(3))
        );
    }

    #[test]
    fn test_operators_saturate() {
        let max = Money::from_cents(i64::MAX);
        assert_eq!(max + Money::from_cents(1), max);
        assert_eq!(max * 3, max);
        assert_eq!(Money::from_cents(i64::MIN) - Money::from_cents(1), Money::from_cents(i64::MIN));
        assert_eq!(Money::from_units(i64::MAX), max);
        assert_eq!(
            Money::from_cents(i64::MIN).saturating_sub_to_zero(Money::from_cents(i64::MAX)),
            Money::ZERO
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1999).to_string(), "19.99");
    }

    #[test]
    fn test_sum() {
        let total: Money = [Money::from_cents(1), Money::from_cents(2)].into_iter().sum();
        assert_eq!(total.cents(), 3);
    }
}
