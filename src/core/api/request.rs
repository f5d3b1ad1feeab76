//! Outbound request construction.
//!
//! Requests are assembled in a fixed order so that the same validated input
//! always produces byte-identical URLs, headers and bodies.

use reqwest::Method;
use reqwest::header::{
    ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, InvalidHeaderValue,
};
use serde::Serialize;
use thiserror::Error;

use super::idempotency::IdempotencyKey;

/// Header carrying the idempotency key on mutating requests.
pub const IDEMPOTENCY_KEY: HeaderName = HeaderName::from_static("idempotency-key");

const APPLICATION_JSON: &str = "application/json";

/// Errors raised while assembling a request, before anything is sent.
#[derive(Debug, Error)]
pub enum RequestError {
    /// A header value contained characters not allowed in HTTP headers.
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] InvalidHeaderValue),

    /// The query string could not be encoded.
    #[error("failed to encode query string: {0}")]
    Query(#[from] serde_urlencoded::ser::Error),

    /// The JSON body could not be serialized.
    #[error("failed to serialize request body: {0}")]
    Body(#[from] serde_json::Error),
}

/// A fully built upstream request.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    method: Method,
    url: String,
    headers: HeaderMap,
    body: Option<String>,
    idempotency_key: Option<IdempotencyKey>,
}

impl ApiRequest {
    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Serialized JSON body, present on mutating requests only.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn idempotency_key(&self) -> Option<&IdempotencyKey> {
        self.idempotency_key.as_ref()
    }

    /// Whether the request changes upstream state.
    pub fn is_mutating(&self) -> bool {
        self.idempotency_key.is_some()
    }
}

// ============================================================================
// Query string
// ============================================================================

/// Ordered query parameters.
///
/// Parameters keep the order in which they were added; absent and empty
/// values are never added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(&'static str, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `name` only if `value` is present and not its type's empty value.
    pub fn param<V: QueryValue>(mut self, name: &'static str, value: Option<V>) -> Self {
        if let Some(value) = value.and_then(QueryValue::into_query_value) {
            self.pairs.push((name, value));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Render as `?a=1&b=2`, or an empty string when nothing was appended.
    pub fn to_query_string(&self) -> Result<String, RequestError> {
        if self.pairs.is_empty() {
            return Ok(String::new());
        }
        Ok(format!("?{}", serde_urlencoded::to_string(&self.pairs)?))
    }
}

/// Values that can appear in a query string.
///
/// Returns `None` for the type's empty value (`0`, `""`), which is omitted.
pub trait QueryValue {
    fn into_query_value(self) -> Option<String>;
}

impl QueryValue for String {
    fn into_query_value(self) -> Option<String> {
        (!self.is_empty()).then_some(self)
    }
}

impl QueryValue for &str {
    fn into_query_value(self) -> Option<String> {
        (!self.is_empty()).then(|| self.to_string())
    }
}

impl QueryValue for u32 {
    fn into_query_value(self) -> Option<String> {
        (self != 0).then(|| self.to_string())
    }
}

impl QueryValue for u64 {
    fn into_query_value(self) -> Option<String> {
        (self != 0).then(|| self.to_string())
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`ApiRequest`].
///
/// Header and body errors are deferred until [`RequestBuilder::build`], so the
/// builder can be chained without intermediate `?`.
#[derive(Debug)]
pub struct RequestBuilder {
    method: Method,
    url: String,
    query: Query,
    headers: HeaderMap,
    body: Option<String>,
    idempotency_key: Option<IdempotencyKey>,
    error: Option<RequestError>,
}

impl RequestBuilder {
    /// Start a request to `base_url` followed by the percent-encoded `segments`.
    pub fn new(method: Method, base_url: &str, segments: &[&str]) -> Self {
        let mut url = base_url.trim_end_matches('/').to_string();
        for segment in segments {
            url.push('/');
            url.push_str(&urlencoding::encode(segment));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));

        Self {
            method,
            url,
            query: Query::new(),
            headers,
            body: None,
            idempotency_key: None,
            error: None,
        }
    }

    /// Set the `authorization: Bearer <token>` header.
    pub fn bearer_auth(mut self, token: &str) -> Self {
        match HeaderValue::from_str(&format!("Bearer {}", token)) {
            Ok(mut value) => {
                value.set_sensitive(true);
                self.headers.insert(AUTHORIZATION, value);
            }
            Err(e) => self.fail(e.into()),
        }
        self
    }

    pub fn query(mut self, query: Query) -> Self {
        self.query = query;
        self
    }

    /// Attach the idempotency key header.
    pub fn idempotency_key(mut self, key: IdempotencyKey) -> Self {
        match HeaderValue::from_str(key.as_str()) {
            Ok(value) => {
                self.headers.insert(IDEMPOTENCY_KEY, value);
                self.idempotency_key = Some(key);
            }
            Err(e) => self.fail(e.into()),
        }
        self
    }

    /// Serialize `body` as the JSON payload.
    pub fn json<T: Serialize>(mut self, body: &T) -> Self {
        match serde_json::to_string(body) {
            Ok(body) => {
                self.headers
                    .insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
                self.body = Some(body);
            }
            Err(e) => self.fail(e.into()),
        }
        self
    }

    pub fn build(self) -> Result<ApiRequest, RequestError> {
        if let Some(error) = self.error {
            return Err(error);
        }

        let url = format!("{}{}", self.url, self.query.to_query_string()?);

        Ok(ApiRequest {
            method: self.method,
            url,
            headers: self.headers,
            body: self.body,
            idempotency_key: self.idempotency_key,
        })
    }

    fn fail(&mut self, error: RequestError) {
        // Keep the first error; later steps may fail as a consequence.
        if self.error.is_none() {
            self.error = Some(error);
        }
    }
}
