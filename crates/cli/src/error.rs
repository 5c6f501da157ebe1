//! CLI error types.

use reqwest::StatusCode;
use thiserror::Error;

use frosteva_core::UnknownStatus;
use frosteva_storefront::seed::SeedError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// The storefront could not be reached or sent an unreadable response.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The storefront rejected the request.
    #[error("storefront returned {status}: {message}")]
    Api { status: StatusCode, message: String },

    /// Status argument is outside the vocabulary.
    #[error(transparent)]
    InvalidStatus(#[from] UnknownStatus),

    /// Catalog file could not be read.
    #[error("cannot read {path}: {source}")]
    ReadFile {
        path: String,
        source: std::io::Error,
    },

    /// Catalog file is not a product array.
    #[error(transparent)]
    Catalog(#[from] SeedError),

    /// One or more catalog entries failed validation.
    #[error("{0} catalog entries are invalid")]
    InvalidCatalog(usize),

    /// Writing output failed.
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),
}
