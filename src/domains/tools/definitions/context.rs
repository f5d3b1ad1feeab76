//! Runtime context shared by every Mercury tool.

use std::fmt;
use std::sync::Arc;

use reqwest::Method;

use crate::core::api::{
    ApiRequest, ClientError, HttpClient, IdempotencyKey, RawResponse, RequestBuilder,
};

/// Default upstream root for the Mercury banking API.
pub const DEFAULT_BASE_URL: &str = "https://api.mercury.com/api/v1";

/// Read-only state bound into every Mercury tool: the API token, the
/// upstream root URL and the network client.
///
/// Built once at startup and shared through `Arc`. `Debug` never prints the
/// token.
#[derive(Clone)]
pub struct MercuryContext {
    api_key: String,
    base_url: String,
    client: Arc<dyn HttpClient>,
}

impl MercuryContext {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        client: Arc<dyn HttpClient>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Authenticated read request for `segments` under the base URL.
    pub fn get(&self, segments: &[&str]) -> RequestBuilder {
        RequestBuilder::new(Method::GET, &self.base_url, segments).bearer_auth(&self.api_key)
    }

    /// Authenticated mutating request carrying `key`.
    pub fn post(&self, segments: &[&str], key: IdempotencyKey) -> RequestBuilder {
        RequestBuilder::new(Method::POST, &self.base_url, segments)
            .bearer_auth(&self.api_key)
            .idempotency_key(key)
    }

    pub async fn send(&self, request: ApiRequest) -> Result<RawResponse, ClientError> {
        self.client.send(request).await
    }
}

impl fmt::Debug for MercuryContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MercuryContext")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
