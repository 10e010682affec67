//! Type-safe price representation using decimal arithmetic.
//!
//! All catalog prices are euros. Amounts are kept as [`Decimal`] so cart
//! totals never accumulate binary floating point error, but they are stored
//! as plain JSON numbers to stay compatible with data written by earlier
//! versions of the storefront.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative")]
    Negative,
    /// The input is not a decimal number.
    #[error("price must be a number: {0}")]
    NotANumber(String),
}

/// A non-negative amount in euros.
///
/// ## Examples
///
/// ```
/// use nordora_core::Price;
///
/// let price = Price::from_cents(39_999).unwrap();
/// assert_eq!(price.to_string(), "399.99€");
/// assert_eq!(price.times(2).to_string(), "799.98€");
/// assert!("-1".parse::<Price>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` if the amount is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        Ok(Self(amount))
    }

    /// Create a price from a whole number of cents.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` if `cents` is below zero.
    pub fn from_cents(cents: i64) -> Result<Self, PriceError> {
        Self::new(Decimal::new(cents, 2))
    }

    /// Whether the price is strictly greater than zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Price of `quantity` units.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(
            self.0
                .checked_mul(Decimal::from(quantity))
                .unwrap_or(Decimal::MAX),
        )
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.checked_add(rhs.0).unwrap_or(Decimal::MAX))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}€", self.0)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches('€').trim();
        let amount =
            Decimal::from_str(trimmed).map_err(|_| PriceError::NotANumber(s.to_owned()))?;
        Self::new(amount)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = rust_decimal::serde::float::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(Price::from_cents(2000).unwrap().to_string(), "20.00€");
        assert_eq!(Price::ZERO.to_string(), "0.00€");
    }

    #[test]
    fn test_negative_rejected() {
        assert_eq!(Price::from_cents(-1), Err(PriceError::Negative));
        assert!(matches!(
            "-3.5".parse::<Price>(),
            Err(PriceError::Negative)
        ));
    }

    #[test]
    fn test_parse_accepts_euro_suffix() {
        let price: Price = "12.50 €".parse().unwrap();
        assert_eq!(price, Price::from_cents(1250).unwrap());
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(
            "twelve".parse::<Price>(),
            Err(PriceError::NotANumber(_))
        ));
    }

    #[test]
    fn test_sum_and_times() {
        let prices = [
            Price::from_cents(3000).unwrap().times(1),
            Price::from_cents(2000).unwrap().times(3),
        ];
        let total: Price = prices.into_iter().sum();
        assert_eq!(total, Price::from_cents(9000).unwrap());
    }

    #[test]
    fn test_json_number_round_trip() {
        let price = Price::from_cents(39_999).unwrap();
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "399.99");
        let back: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(back, price);
    }

    #[test]
    fn test_json_negative_rejected() {
        assert!(serde_json::from_str::<Price>("-10").is_err());
    }

    #[test]
    fn test_is_positive() {
        assert!(!Price::ZERO.is_positive());
        assert!(Price::from_cents(1).unwrap().is_positive());
    }
}
