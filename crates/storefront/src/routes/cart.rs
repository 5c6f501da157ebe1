//! Cart route handlers.
//!
//! The cart lives in the shopper's browser; the server only prices it.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Deserialize;
use tracing::instrument;

use frosteva_core::{CartLine, CartQuote};

use crate::error::Result;
use crate::state::AppState;

/// Request body for a cart quote.
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub items: Vec<CartLine>,
}

/// Price cart lines against the current catalog.
#[instrument(skip(state, payload))]
pub async fn quote(
    State(state): State<AppState>,
    payload: std::result::Result<Json<QuoteRequest>, JsonRejection>,
) -> Result<Json<CartQuote>> {
    let Json(request) = payload?;
    Ok(Json(state.catalog().quote_cart(&request.items).await?))
}
