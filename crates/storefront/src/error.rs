//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers return `Result<T, AppError>`.
//!
//! Every error body is JSON:
//!
//! ```json
//! { "error": "validation failed: price: is required", "fields": [{ "field": "price", "message": "is required" }] }
//! ```
//!
//! `fields` is present only for validation failures.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use frosteva_core::{OrderStatus, Price};

use crate::db::RepositoryError;
use crate::services::{ServiceError, ValidationErrors};

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Payload failed validation.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Status change not allowed from the order's current status.
    #[error("cannot move order from {from} to {to}")]
    Conflict { from: OrderStatus, to: OrderStatus },

    /// Submitted total disagrees with the computed one.
    #[error("order total {submitted} does not match computed total {computed}")]
    TotalMismatch { submitted: Price, computed: Price },

    /// Storage failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(errors) => Self::Validation(errors),
            ServiceError::Cart(err) => Self::BadRequest(err.to_string()),
            ServiceError::Transition { from, to } => Self::Conflict { from, to },
            ServiceError::TotalMismatch {
                submitted,
                computed,
            } => Self::TotalMismatch {
                submitted,
                computed,
            },
            ServiceError::Repository(err) => Self::Database(err),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::TotalMismatch { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<&'a ValidationErrors>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Database(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = self.status();
        // Don't leak storage details to clients
        let error = match &self {
            Self::Database(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };
        let fields = match &self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        };

        (status, Json(ErrorBody { error, fields })).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
