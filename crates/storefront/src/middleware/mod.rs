//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, transaction)
//! 2. CORS (the browser storefront and back office call the API cross-origin)
//! 3. `TraceLayer` (one `http_request` span per request)
//! 4. Request ID (record/propagate `x-request-id`)

pub mod request_id;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
