//! Back-office route handlers.

use axum::{Json, extract::State};
use chrono::Utc;
use tracing::instrument;

use crate::error::Result;
use crate::services::DashboardSummary;
use crate::state::AppState;

/// Dashboard figures as of now.
#[instrument(skip(state))]
pub async fn summary(State(state): State<AppState>) -> Result<Json<DashboardSummary>> {
    Ok(Json(state.orders().dashboard_summary(Utc::now()).await?))
}
