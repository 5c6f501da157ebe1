//! Stock levels carried as integer text.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when interpreting a [`Stock`] level.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StockError {
    /// The text is empty or whitespace.
    #[error("stock cannot be empty")]
    Empty,
    /// The text is not a non-negative whole number.
    #[error("stock must be a non-negative whole number (got {0:?})")]
    NotACount(String),
}

/// Units on hand, stored as the text the administrator entered.
///
/// A product is purchasable while its stock is above zero. Text that does not
/// parse as a count is treated as out of stock.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stock(String);

impl Stock {
    /// At or below this many units the back office flags the product.
    pub const LOW_STOCK_THRESHOLD: u32 = 10;

    /// Wrap stock text verbatim, without validation.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Parse the text as a unit count.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is empty or not a non-negative integer.
    pub fn count(&self) -> Result<u32, StockError> {
        let trimmed = self.0.trim();
        if trimmed.is_empty() {
            return Err(StockError::Empty);
        }
        trimmed
            .parse::<u32>()
            .map_err(|_| StockError::NotACount(self.0.clone()))
    }

    /// Whether at least one unit is available.
    #[must_use]
    pub fn is_in_stock(&self) -> bool {
        self.count().is_ok_and(|n| n > 0)
    }

    /// Whether the level is at or below [`Self::LOW_STOCK_THRESHOLD`].
    #[must_use]
    pub fn is_low(&self) -> bool {
        self.count().is_ok_and(|n| n <= Self::LOW_STOCK_THRESHOLD)
    }

    /// Returns the stock text as submitted.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Stock {
    fn default() -> Self {
        Self::new("100")
    }
}

impl fmt::Display for Stock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for Stock {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}
