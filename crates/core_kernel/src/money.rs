//! Money types with precise decimal arithmetic
//!
//! All portal amounts are US dollars. Amounts use rust_decimal so that
//! invoice totals never pick up floating-point error.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Neg, Sub};
use thiserror::Error;

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Overflow during calculation")]
    Overflow,
}

/// A US dollar amount
///
/// Stored with 4 decimal places internally so that intermediate
/// rate calculations keep their precision; invoice lines round to cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money {
    amount: Decimal,
}

impl Money {
    /// Creates a new Money value
    pub fn new(amount: Decimal) -> Self {
        Self {
            amount: amount.round_dp(4),
        }
    }

    /// Creates Money from an integer amount of cents
    pub fn from_cents(cents: i64) -> Self {
        Self::new(Decimal::new(cents, 2))
    }

    /// Creates a zero amount
    pub fn zero() -> Self {
        Self { amount: dec!(0) }
    }

    /// Returns the amount
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is positive
    pub fn is_positive(&self) -> bool {
        self.amount.is_sign_positive() && !self.amount.is_zero()
    }

    /// Returns true if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Rounds to whole cents, half away from zero
    pub fn round_to_cents(&self) -> Self {
        Self {
            amount: self
                .amount
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        }
    }

    /// Checked addition
    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        self.amount
            .checked_add(other.amount)
            .map(Self::new)
            .ok_or(MoneyError::Overflow)
    }

    /// Checked subtraction
    pub fn checked_sub(&self, other: &Money) -> Result<Money, MoneyError> {
        self.amount
            .checked_sub(other.amount)
            .map(Self::new)
            .ok_or(MoneyError::Overflow)
    }

    /// Multiplies by a scalar (e.g. hours or a period count)
    pub fn multiply(&self, factor: Decimal) -> Self {
        Self::new(self.amount * factor)
    }

    /// Divides by a scalar
    pub fn divide(&self, divisor: Decimal) -> Result<Self, MoneyError> {
        if divisor.is_zero() {
            return Err(MoneyError::DivisionByZero);
        }
        Ok(Self::new(self.amount / divisor))
    }

    /// Clamps negative amounts to zero
    pub fn non_negative(self) -> Money {
        if self.is_negative() { Money::zero() } else { self }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cents = self.round_to_cents().amount;
        if cents.is_sign_negative() && !cents.is_zero() {
            write!(f, "-${:.2}", cents.abs())
        } else {
            write!(f, "${:.2}", cents)
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.amount + other.amount)
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.amount - other.amount)
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.amount)
    }
}

impl Mul<Decimal> for Money {
    type Output = Self;

    fn mul(self, factor: Decimal) -> Self {
        self.multiply(factor)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

/// A percentage rate (e.g. an invoice discount)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate {
    /// The rate as a decimal (e.g., 0.05 for 5%)
    value: Decimal,
}

impl Rate {
    /// Creates a rate from a decimal value (e.g., 0.05 for 5%)
    pub fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Creates a rate from a percentage (e.g., 5.0 for 5%)
    pub fn from_percentage(percentage: Decimal) -> Self {
        Self {
            value: percentage / dec!(100),
        }
    }

    /// Returns the rate as a decimal
    pub fn as_decimal(&self) -> Decimal {
        self.value
    }

    /// Returns the rate as a percentage
    pub fn as_percentage(&self) -> Decimal {
        self.value * dec!(100)
    }

    /// Applies this rate to a money amount, rounded to cents
    pub fn apply(&self, money: &Money) -> Money {
        money.multiply(self.value).round_to_cents()
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage().round_dp(4).normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_cents() {
        let m = Money::from_cents(10050);
        assert_eq!(m.amount(), dec!(100.50));
    }

    #[test]
    fn test_money_arithmetic() {
        let a = Money::new(dec!(100.00));
        let b = Money::new(dec!(50.00));

        assert_eq!((a + b).amount(), dec!(150.00));
        assert_eq!((a - b).amount(), dec!(50.00));
        assert_eq!((-a).amount(), dec!(-100.00));
    }

    #[test]
    fn test_round_to_cents_half_away_from_zero() {
        assert_eq!(Money::new(dec!(10.125)).round_to_cents().amount(), dec!(10.13));
        assert_eq!(Money::new(dec!(-10.125)).round_to_cents().amount(), dec!(-10.13));
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::new(dec!(1234.5)).to_string(), "$1234.50");
        assert_eq!(Money::new(dec!(-50)).to_string(), "-$50.00");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_divide_by_zero() {
        assert_eq!(
            Money::new(dec!(10)).divide(Decimal::ZERO),
            Err(MoneyError::DivisionByZero)
        );
    }

    #[test]
    fn test_sum() {
        let total: Money = vec![Money::from_cents(100), Money::from_cents(250)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::from_cents(350));
    }

    #[test]
    fn test_rate_apply() {
        let rate = Rate::from_percentage(dec!(10));
        assert_eq!(rate.apply(&Money::new(dec!(99.99))).amount(), dec!(10.00));
        assert_eq!(rate.to_string(), "10%");
    }
}
