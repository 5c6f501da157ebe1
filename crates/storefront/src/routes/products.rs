//! Product route handlers.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use tracing::instrument;

use frosteva_core::{Product, ProductId};

use super::parse_id;
use crate::error::{AppError, Result};
use crate::services::ProductForm;
use crate::state::AppState;

/// List every product.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    Ok(Json(state.catalog().list_products().await?))
}

/// Show one product.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>> {
    let id: ProductId = parse_id(&id, "product")?;
    state
        .catalog()
        .get_product(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

/// Create a product.
#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ProductForm>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>)> {
    let Json(form) = payload?;
    let product = state.catalog().create_product(form).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Merge a partial update into a product.
#[instrument(skip(state, payload))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<ProductForm>, JsonRejection>,
) -> Result<Json<Product>> {
    let id: ProductId = parse_id(&id, "product")?;
    let Json(form) = payload?;
    state
        .catalog()
        .update_product(id, form)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

/// Delete a product.
#[instrument(skip(state))]
pub async fn destroy(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    let id: ProductId = parse_id(&id, "product")?;
    if state.catalog().delete_product(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("product {id}")))
    }
}
