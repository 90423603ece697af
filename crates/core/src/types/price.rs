//! Type-safe price representation.
//!
//! Prices are stored as an integer number of cents, which is what the
//! `product.price` column holds. Arithmetic that can leave the integer
//! domain (line totals, cart subtotals) goes through [`rust_decimal`].

use core::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// A non-negative price in cents.
///
/// ```
/// use voltio_core::Price;
///
/// let price = Price::from_cents(28_999_00);
/// assert_eq!(price.to_string(), "$28999.00");
/// assert_eq!(Price::parse("289.99"), Some(Price::from_cents(28_999)));
/// assert_eq!(Price::parse("not a number"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    /// The zero price.
    pub const ZERO: Self = Self(0);

    /// Create a price from a number of cents.
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Get the underlying number of cents.
    #[must_use]
    pub const fn as_cents(&self) -> i64 {
        self.0
    }

    /// Convert to a `Decimal` in currency units (e.g. `289.99`).
    #[must_use]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Price of `quantity` units as a `Decimal`.
    #[must_use]
    pub fn line_total(&self, quantity: u32) -> Decimal {
        self.to_decimal() * Decimal::from(quantity)
    }

    /// Parse a user-supplied decimal string into a price.
    ///
    /// Returns `None` for anything that is not a non-negative number;
    /// callers treat that as "no constraint", never as an error.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let value: Decimal = input.trim().parse().ok()?;
        if value.is_sign_negative() {
            return None;
        }
        let cents = (value * Decimal::new(100, 0)).round().to_i64()?;
        Some(Self(cents))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.to_decimal())
    }
}

#[cfg(feature = "sqlite")]
impl ::sqlx::Type<::sqlx::Sqlite> for Price {
    fn type_info() -> ::sqlx::sqlite::SqliteTypeInfo {
        <i64 as ::sqlx::Type<::sqlx::Sqlite>>::type_info()
    }

    fn compatible(ty: &::sqlx::sqlite::SqliteTypeInfo) -> bool {
        <i64 as ::sqlx::Type<::sqlx::Sqlite>>::compatible(ty)
    }
}

#[cfg(feature = "sqlite")]
impl<'r> ::sqlx::Decode<'r, ::sqlx::Sqlite> for Price {
    fn decode(
        value: ::sqlx::sqlite::SqliteValueRef<'r>,
    ) -> Result<Self, ::sqlx::error::BoxDynError> {
        let cents = <i64 as ::sqlx::Decode<::sqlx::Sqlite>>::decode(value)?;
        Ok(Self(cents))
    }
}

#[cfg(feature = "sqlite")]
impl<'q> ::sqlx::Encode<'q, ::sqlx::Sqlite> for Price {
    fn encode_by_ref(
        &self,
        buf: &mut <::sqlx::Sqlite as ::sqlx::Database>::ArgumentBuffer<'q>,
    ) -> Result<::sqlx::encode::IsNull, ::sqlx::error::BoxDynError> {
        <i64 as ::sqlx::Encode<::sqlx::Sqlite>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!(Price::parse("289.99"), Some(Price::from_cents(28_999)));
        assert_eq!(Price::parse("0"), Some(Price::ZERO));
        assert_eq!(Price::parse(" 1500 "), Some(Price::from_cents(150_000)));
    }

    #[test]
    fn test_parse_rejects_negative_and_garbage() {
        assert_eq!(Price::parse("-5"), None);
        assert_eq!(Price::parse("abc"), None);
        assert_eq!(Price::parse(""), None);
    }

    #[test]
    fn test_line_total() {
        let price = Price::from_cents(1_999);
        assert_eq!(price.line_total(3), Decimal::new(5_997, 2));
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::from_cents(89_900).to_string(), "$899.00");
        assert_eq!(Price::ZERO.to_string(), "$0.00");
    }
}
