//! Service error types.

use core::fmt;

use serde::Serialize;
use thiserror::Error;

use frosteva_core::{CartError, OrderStatus, Price};

use crate::db::RepositoryError;

/// A single rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Wire name of the field, e.g. `price` or `items[1].quantity`.
    pub field: String,
    pub message: String,
}

/// Every problem found while validating one payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// A single-field failure.
    #[must_use]
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self(vec![FieldError {
            field: field.into(),
            message: message.into(),
        }])
    }

    pub(crate) fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// The rejected fields.
    #[must_use]
    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `field` was rejected.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Errors that can occur in catalog and order services.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Input failed structural validation; nothing was stored.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// The cart could not be priced.
    #[error("cart error: {0}")]
    Cart(#[from] CartError),

    /// The strict lifecycle does not allow this status change.
    #[error("cannot move order from {from} to {to}")]
    Transition { from: OrderStatus, to: OrderStatus },

    /// Submitted order total disagrees with the line items.
    #[error("order total {submitted} does not match computed total {computed}")]
    TotalMismatch { submitted: Price, computed: Price },

    /// Repository/storage error.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}
