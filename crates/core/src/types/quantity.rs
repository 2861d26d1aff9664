//! Stock quantities using decimal arithmetic.
//!
//! The backend stores stock as `DECIMAL(10, 2)`, so quantities are parsed
//! into [`Decimal`] and checked against that column before they are sent.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a quantity from user input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    /// The input string is empty.
    #[error("quantity cannot be empty")]
    Empty,
    /// The input is not a number.
    #[error("'{0}' is not a valid number")]
    NotANumber(String),
    /// Stock values must be zero or greater.
    #[error("quantity must be a non-negative number")]
    Negative,
    /// Stock adjustments must be strictly greater than zero.
    #[error("Quantity must be a positive number.")]
    NotPositive,
    /// More decimal places than the backend stores.
    #[error("quantity must have at most {max} decimal places")]
    TooPrecise {
        /// Maximum decimal places.
        max: u32,
    },
    /// Larger than the backend column can hold.
    #[error("quantity must be less than {max}")]
    TooLarge {
        /// Exclusive upper bound.
        max: Decimal,
    },
}

/// A non-negative stock level.
///
/// ## Constraints
///
/// - Zero or greater
/// - At most 2 decimal places
/// - At most 8 integer digits (fits `DECIMAL(10, 2)`)
///
/// ## Examples
///
/// ```
/// use stockroom_core::StockQuantity;
///
/// assert!(StockQuantity::parse("12").is_ok());
/// assert!(StockQuantity::parse(" 0.5 ").is_ok());
///
/// assert!(StockQuantity::parse("").is_err());
/// assert!(StockQuantity::parse("-1").is_err());
/// assert!(StockQuantity::parse("ten").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct StockQuantity(Decimal);

impl StockQuantity {
    /// Decimal places stored by the backend.
    pub const MAX_SCALE: u32 = 2;

    /// Exclusive upper bound for a `DECIMAL(10, 2)` column.
    pub const UPPER_BOUND: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

    /// Zero stock.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Parse a `StockQuantity` from user input.
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, not a number, negative, has
    /// more than two decimal places or does not fit the backend column.
    pub fn parse(s: &str) -> Result<Self, QuantityError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(QuantityError::Empty);
        }

        let value = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|_| QuantityError::NotANumber(trimmed.to_owned()))?;

        Self::try_from_decimal(value)
    }

    /// Validate an already-parsed decimal.
    ///
    /// # Errors
    ///
    /// Same rules as [`StockQuantity::parse`].
    pub fn try_from_decimal(value: Decimal) -> Result<Self, QuantityError> {
        if value < Decimal::ZERO {
            return Err(QuantityError::Negative);
        }

        let value = value.normalize();
        if value.scale() > Self::MAX_SCALE {
            return Err(QuantityError::TooPrecise {
                max: Self::MAX_SCALE,
            });
        }

        if value >= Self::UPPER_BOUND {
            return Err(QuantityError::TooLarge {
                max: Self::UPPER_BOUND,
            });
        }

        Ok(Self(value))
    }

    /// Returns the underlying decimal.
    #[must_use]
    pub const fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Returns true for a zero quantity.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for StockQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StockQuantity {
    type Err = QuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<Decimal> for StockQuantity {
    type Error = QuantityError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::try_from_decimal(value)
    }
}

impl From<StockQuantity> for Decimal {
    fn from(quantity: StockQuantity) -> Self {
        quantity.0
    }
}

/// A strictly positive quantity used to add or remove stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct AdjustmentQuantity(Decimal);

impl AdjustmentQuantity {
    /// Parse an `AdjustmentQuantity` from user input.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::NotPositive`] for zero or negative input, and
    /// the [`StockQuantity::parse`] errors otherwise.
    pub fn parse(s: &str) -> Result<Self, QuantityError> {
        let quantity = StockQuantity::parse(s).map_err(|e| match e {
            QuantityError::Negative => QuantityError::NotPositive,
            other => other,
        })?;

        if quantity.is_zero() {
            return Err(QuantityError::NotPositive);
        }

        Ok(Self(quantity.as_decimal()))
    }

    /// Validate an already-parsed decimal.
    ///
    /// # Errors
    ///
    /// Same rules as [`AdjustmentQuantity::parse`].
    pub fn try_from_decimal(value: Decimal) -> Result<Self, QuantityError> {
        if value <= Decimal::ZERO {
            return Err(QuantityError::NotPositive);
        }
        StockQuantity::try_from_decimal(value).map(|q| Self(q.as_decimal()))
    }

    /// Returns the underlying decimal.
    #[must_use]
    pub const fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for AdjustmentQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<Decimal> for AdjustmentQuantity {
    type Error = QuantityError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::try_from_decimal(value)
    }
}

impl From<AdjustmentQuantity> for Decimal {
    fn from(quantity: AdjustmentQuantity) -> Self {
        quantity.0
    }
}

impl FromStr for AdjustmentQuantity {
    type Err = QuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
