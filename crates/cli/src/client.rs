//! Minimal client for the storefront JSON API.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::CliError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Error body returned by the storefront.
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Storefront API client.
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the storefront at `base_url`.
    pub fn new(base_url: &str) -> Result<Self, CliError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `GET` a JSON resource.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, CliError> {
        tracing::debug!(path, "GET");
        let response = self.client.get(self.url(path)).send().await?;
        decode(response).await
    }

    /// `PATCH` a JSON body and decode the response.
    pub async fn patch<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, CliError> {
        tracing::debug!(path, "PATCH");
        let response = self.client.patch(self.url(path)).json(body).send().await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, CliError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text).map_or(text, |body| body.error);
    Err(CliError::Api { status, message })
}
