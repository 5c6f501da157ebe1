//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                - Liveness check
//!
//! # Catalog
//! GET    /api/products          - All products, insertion order
//! GET    /api/products/{id}     - One product
//! POST   /api/products          - Create product
//! PATCH  /api/products/{id}     - Partial update
//! DELETE /api/products/{id}     - Delete product (204, or 404 if absent)
//!
//! # Checkout
//! POST   /api/cart/quote        - Price cart lines against the catalog
//! POST   /api/orders            - Place order
//!
//! # Back office
//! GET    /api/orders            - All orders, newest first
//! GET    /api/orders/{id}       - One order
//! PATCH  /api/orders/{id}       - Change status
//! GET    /api/admin/summary     - Dashboard figures
//! ```
//!
//! Path ids that are not valid UUIDs are answered with 404, the same as an
//! id that was never issued.

pub mod admin;
pub mod cart;
pub mod orders;
pub mod products;

use std::str::FromStr;
use std::time::Duration;

use axum::{
    Router,
    http::{Method, header},
    middleware,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::error::AppError;
use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route(
            "/{id}",
            get(products::show)
                .patch(products::update)
                .delete(products::destroy),
        )
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index).post(orders::create))
        .route("/{id}", get(orders::show).patch(orders::update_status))
}

/// Create all API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/products", product_routes())
        .nest("/api/orders", order_routes())
        .route("/api/cart/quote", post(cart::quote))
        .route("/api/admin/summary", get(admin::summary))
}

/// Build the complete application: routes, health check, and middleware.
///
/// Sentry layers are added by the binary so tests can drive this router
/// without a Sentry client.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>, latency: Duration, span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .layer(cors)
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running.
async fn health() -> &'static str {
    "ok"
}

/// Parse a path id, treating malformed ids as unknown.
fn parse_id<T: FromStr>(raw: &str, what: &str) -> Result<T, AppError> {
    raw.parse()
        .map_err(|_| AppError::NotFound(format!("{what} {raw}")))
}
