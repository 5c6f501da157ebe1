//! Order route handlers.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use tracing::instrument;

use frosteva_core::{Order, OrderId};

use super::parse_id;
use crate::error::{AppError, Result};
use crate::services::{OrderForm, StatusForm};
use crate::state::AppState;

/// List every order, newest first.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Order>>> {
    Ok(Json(state.orders().list_orders().await?))
}

/// Show one order.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Order>> {
    let id: OrderId = parse_id(&id, "order")?;
    state
        .orders()
        .get_order(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))
}

/// Place an order from checkout.
#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<OrderForm>, JsonRejection>,
) -> Result<(StatusCode, Json<Order>)> {
    let Json(form) = payload?;
    let order = state.orders().create_order(form).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// Change an order's status.
#[instrument(skip(state, payload))]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<StatusForm>, JsonRejection>,
) -> Result<Json<Order>> {
    let id: OrderId = parse_id(&id, "order")?;
    let Json(form) = payload?;
    state
        .orders()
        .update_status(id, form)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))
}
