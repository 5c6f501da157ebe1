//! Monetary amounts carried as decimal text.
//!
//! Prices are stored exactly as they were submitted (`"450"`, `"10.00"`,
//! `"5.5"`). Nothing rounds or re-formats a stored price; the text is parsed
//! into a [`Decimal`] only when a caller needs to validate or do arithmetic.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when interpreting a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The text is empty or whitespace.
    #[error("price cannot be empty")]
    Empty,
    /// The text is not a decimal number.
    #[error("price must be a decimal number (got {0:?})")]
    NotANumber(String),
    /// The amount is below zero.
    #[error("price cannot be negative")]
    Negative,
    /// Arithmetic on the amount left the representable range.
    #[error("amount is too large")]
    Overflow,
}

/// A price in the store's base currency unit, kept as decimal text.
///
/// ## Examples
///
/// ```
/// use frosteva_core::Price;
/// use rust_decimal::Decimal;
///
/// let price = Price::new("10.00");
/// assert_eq!(price.as_str(), "10.00");
/// assert_eq!(price.amount().unwrap(), Decimal::new(10, 0));
///
/// assert!(Price::new("ten").amount().is_err());
/// assert_eq!(Price::from_amount(Decimal::new(255, 1)).as_str(), "25.50");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(String);

impl Price {
    /// Wrap price text verbatim, without validation.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Format an amount with exactly two decimal places (e.g. order totals).
    #[must_use]
    pub fn from_amount(amount: Decimal) -> Self {
        Self(format!("{:.2}", amount.round_dp(2)))
    }

    /// Parse the text as a non-negative decimal amount.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is empty, not a decimal number, or negative.
    pub fn amount(&self) -> Result<Decimal, PriceError> {
        let trimmed = self.0.trim();
        if trimmed.is_empty() {
            return Err(PriceError::Empty);
        }

        let amount =
            Decimal::from_str(trimmed).map_err(|_| PriceError::NotANumber(self.0.clone()))?;

        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }

        Ok(amount)
    }

    /// Returns the price text as submitted.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for Price {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Price {
    fn from(text: String) -> Self {
        Self(text)
    }
}
