//! Integration test harness for the Frosteva storefront.
//!
//! Tests drive the real router in-process with `tower::ServiceExt::oneshot`;
//! no socket is bound.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p frosteva-integration-tests
//! ```

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tower::ServiceExt;

use frosteva_storefront::config::StorefrontConfig;
use frosteva_storefront::routes;
use frosteva_storefront::seed;
use frosteva_storefront::services::{TotalPolicy, TransitionPolicy};
use frosteva_storefront::state::AppState;

/// A response with its body read.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Decode the body as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the body is not valid JSON for `T`.
    #[must_use]
    pub fn json<T: DeserializeOwned>(&self) -> T {
        match serde_json::from_slice(&self.body) {
            Ok(value) => value,
            Err(e) => panic!(
                "invalid JSON body ({e}): {}",
                String::from_utf8_lossy(&self.body)
            ),
        }
    }

    /// The body as text.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// An in-process storefront.
pub struct TestApp {
    state: AppState,
}

impl TestApp {
    /// Empty catalog, permissive transitions, trusted totals.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(StorefrontConfig::default())
    }

    /// Empty catalog with the given order policies.
    #[must_use]
    pub fn with_policies(transitions: TransitionPolicy, totals: TotalPolicy) -> Self {
        Self::with_config(StorefrontConfig {
            transitions,
            totals,
            ..StorefrontConfig::default()
        })
    }

    /// Empty catalog with the given configuration.
    #[must_use]
    pub fn with_config(config: StorefrontConfig) -> Self {
        Self {
            state: AppState::new(&config),
        }
    }

    /// Default configuration with the bundled catalog loaded.
    ///
    /// # Panics
    ///
    /// Panics if the bundled catalog fails to load.
    pub async fn seeded() -> Self {
        let app = Self::new();
        if let Err(e) = seed::load_bundled_catalog(app.state.catalog()).await {
            panic!("bundled catalog failed to load: {e}");
        }
        app
    }

    fn router(&self) -> Router {
        routes::app(self.state.clone())
    }

    /// Send a request with an optional JSON body.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read.
    pub async fn request(&self, method: Method, uri: &str, body: Option<&Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        };
        let request = request.unwrap_or_else(|e| panic!("bad request {uri}: {e}"));

        let response = match self.router().oneshot(request).await {
            Ok(response) => response,
            Err(e) => match e {},
        };
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap_or_else(|e| panic!("unreadable body from {uri}: {e}"));

        TestResponse {
            status,
            headers,
            body: body.to_vec(),
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: &Value) -> TestResponse {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: &Value) -> TestResponse {
        self.request(Method::PATCH, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request(Method::DELETE, uri, None).await
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// A complete, valid product payload.
#[must_use]
pub fn product_payload(name: &str, price: &str) -> Value {
    serde_json::json!({
        "name": name,
        "description": format!("{name} from Frosteva"),
        "price": price,
        "category": "Dairy",
        "imageUrl": "/images/frosteva_ghee_250g_bilingual_packaging.png",
        "stock": "50",
    })
}

/// A complete, valid checkout payload.
#[must_use]
pub fn order_payload(items: &Value, total: &str) -> Value {
    serde_json::json!({
        "customerName": "Asha Gurung",
        "customerEmail": "asha@example.com",
        "customerPhone": "9800000000",
        "customerAddress": "Lakeside, Pokhara",
        "items": items,
        "total": total,
        "status": "pending",
    })
}
