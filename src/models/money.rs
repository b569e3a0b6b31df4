//! Money type for representing currency amounts
//!
//! Amounts are whole cents in an i64, so arithmetic never touches floating
//! point. Only US dollars are supported.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use thiserror::Error;

/// Largest amount [`Money::parse`] accepts, in cents ($10 trillion)
pub const MAX_PARSED_CENTS: i64 = 1_000_000_000_000_000;

/// A dollar amount stored as cents
///
/// Arithmetic saturates at the i64 bounds instead of overflowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use billbank::models::Money;
    /// let amount = Money::from_cents(1050); // $10.50
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn from_dollars_cents(dollars: i64, cents: i64) -> Self {
        Self(dollars * 100 + cents)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole dollars, truncated toward zero
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// The cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// `percent` percent of this amount, rounded half away from zero
    ///
    /// # Examples
    /// ```
    /// use billbank::models::Money;
    /// assert_eq!(Money::from_cents(1050).percentage(10).cents(), 105);
    /// ```
    pub fn percentage(&self, percent: i64) -> Self {
        let scaled = self.0.saturating_mul(percent);
        let half = if scaled < 0 { -50 } else { 50 };
        Self(scaled.saturating_add(half) / 100)
    }

    /// Characters that can appear in an amount as it is typed
    pub fn is_amount_char(c: char) -> bool {
        c.is_ascii_digit() || matches!(c, '.' | '-' | '$')
    }

    /// Parse a dollar amount
    ///
    /// Accepts `12`, `12.`, `12.5`, `12.50`, `.2`, with an optional leading `-`
    /// and/or `$`. More than two fraction digits is [`MoneyParseError::TooPrecise`];
    /// anything beyond [`MAX_PARSED_CENTS`] is [`MoneyParseError::TooLarge`].
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let input = s.trim();
        let invalid = || MoneyParseError::InvalidFormat(input.to_string());

        let (negative, rest) = match input.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, input),
        };
        let rest = rest.strip_prefix('$').unwrap_or(rest);

        let (whole, fraction) = match rest.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (rest, None),
        };

        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if !all_digits(whole) {
            return Err(invalid());
        }

        let dollars: i64 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|_| MoneyParseError::TooLarge(input.to_string()))?
        };

        let cents: i64 = match fraction {
            None if whole.is_empty() => return Err(invalid()),
            None => 0,
            Some("") if whole.is_empty() => return Err(invalid()),
            Some("") => 0,
            Some(fraction) => {
                if !all_digits(fraction) {
                    return Err(invalid());
                }
                if fraction.len() > 2 {
                    return Err(MoneyParseError::TooPrecise(input.to_string()));
                }
                let value: i64 = fraction.parse().map_err(|_| invalid())?;
                if fraction.len() == 1 {
                    value * 10
                } else {
                    value
                }
            }
        };

        let total = dollars
            .checked_mul(100)
            .and_then(|d| d.checked_add(cents))
            .filter(|total| *total <= MAX_PARSED_CENTS)
            .ok_or_else(|| MoneyParseError::TooLarge(input.to_string()))?;

        Ok(Self(if negative { -total } else { total }))
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-${}.{:02}", self.dollars().abs(), self.cents_part())
        } else {
            write!(f, "${}.{:02}", self.dollars(), self.cents_part())
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Why an amount string was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    #[error("'{0}' is not a valid dollar amount")]
    InvalidFormat(String),

    #[error("'{0}' is too precise; round to cents")]
    TooPrecise(String),

    #[error("'{0}' is too large")]
    TooLarge(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1050).to_string(), "$10.50");
        assert_eq!(Money::from_cents(0).to_string(), "$0.00");
        assert_eq!(Money::from_cents(-1050).to_string(), "-$10.50");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::from_cents(-5).to_string(), "-$0.05");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((-a).cents(), -1000);

        let mut c = a;
        c -= b;
        c += Money::from_dollars_cents(1, 1);
        assert_eq!(c.cents(), 601);
    }

    #[test]
    fn test_parse_whole_and_fractional() {
        assert_eq!(Money::parse("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse("0.05").unwrap().cents(), 5);
        assert_eq!(Money::parse(".2").unwrap().cents(), 20);
        assert_eq!(Money::parse(".75").unwrap().cents(), 75);
        assert_eq!(Money::parse("$10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("-$1.5").unwrap().cents(), -150);
        assert_eq!(Money::parse("5.").unwrap().cents(), 500);
        assert_eq!(Money::parse("$12.").unwrap().cents(), 1200);
    }

    #[test]
    fn test_parse_sums_like_a_ledger() {
        let total: Money = ["1.20", ".2", ".1", "7.20", "5.32", "2.1", ".75", "8.50"]
            .iter()
            .map(|s| Money::parse(s).unwrap())
            .sum();
        assert_eq!(total.to_string(), "$25.37");
    }

    #[test]
    fn test_parse_too_precise() {
        assert_eq!(
            Money::parse("1.234").unwrap_err(),
            MoneyParseError::TooPrecise("1.234".into())
        );
        assert!(matches!(
            Money::parse(".001"),
            Err(MoneyParseError::TooPrecise(_))
        ));
    }

    #[test]
    fn test_parse_invalid() {
        for input in ["", "abc", "1.2.3", "$.", ".", "-.", "$", "-", "1,000", "1e5", "--1", "1.a"] {
            assert!(
                matches!(Money::parse(input), Err(MoneyParseError::InvalidFormat(_))),
                "{:?} should be invalid",
                input
            );
        }
    }

    #[test]
    fn test_percentage() {
        assert_eq!(Money::from_cents(1000).percentage(15).cents(), 150);
        assert_eq!(Money::from_cents(105).percentage(50).cents(), 53);
        assert_eq!(Money::from_cents(-105).percentage(50).cents(), -53);
        assert_eq!(Money::from_cents(333).percentage(0).cents(), 0);
    }

    #[test]
    fn test_is_amount_char() {
        for c in "0123456789.-$".chars() {
            assert!(Money::is_amount_char(c));
        }
        for c in "a ,e+".chars() {
            assert!(!Money::is_amount_char(c));
        }
    }

    #[test]
    fn test_sum_and_serialization() {
        let total: Money = vec![Money::from_cents(100), Money::from_cents(250)]
            .into_iter()
            .sum();
        assert_eq!(total.cents(), 350);

        let json = serde_json::to_string(&total).unwrap();
        assert_eq!(json, "350");
        assert_eq!(serde_json::from_str::<Money>(&json).unwrap(), total);
    }

    #[test]
    fn test_parse_too_large() {
        assert_eq!(
            Money::parse("10000000000000").unwrap().cents(),
            MAX_PARSED_CENTS
        );
        assert_eq!(
            Money::parse("-10000000000000").unwrap().cents(),
            -MAX_PARSED_CENTS
        );
        for input in ["10000000000000.01", "92233720368547758.07", "-99999999999999999999"] {
            assert!(
                matches!(Money::parse(input), Err(MoneyParseError::TooLarge(_))),
                "{:?} should be too large",
                input
            );
        }
    }

    #[test]
    fn test_arithmetic_saturates() {
        let max = Money::from_cents(i64::MAX);
        assert_eq!((max + Money::from_cents(1)).cents(), i64::MAX);
        assert_eq!((Money::from_cents(i64::MIN) - Money::from_cents(1)).cents(), i64::MIN);
        assert_eq!((-Money::from_cents(i64::MIN)).cents(), i64::MAX);

        let mut total = max;
        total += max;
        assert_eq!(total, max);
        let total: Money = [max, max, Money::from_cents(5)].into_iter().sum();
        assert_eq!(total, max);
    }
}
