//! Upstream response normalization.
//!
//! Every upstream outcome, whether a status/body pair or a transport
//! failure, is collapsed into either a JSON payload or one [`ApiError`].

use serde_json::{Value, json};
use thiserror::Error;

use super::client::{ClientError, RawResponse};
use super::idempotency::IdempotencyKey;
use super::request::{ApiRequest, RequestError};

/// Permission message used when an operation does not provide its own.
pub const DEFAULT_FORBIDDEN_MESSAGE: &str =
    "Permission error: Your API token doesn't have permission to perform this operation.";

/// Classified upstream failure.
///
/// The `Display` output is the human-readable message shown to the calling
/// agent.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP 400.
    #[error("Invalid request parameters: {0}")]
    BadRequest(String),

    /// HTTP 401. The upstream body is deliberately not echoed.
    #[error(
        "Authentication error: Invalid or expired API token. Check your API token permissions."
    )]
    Unauthorized,

    /// HTTP 403, with an operation-specific explanation.
    #[error("{0}")]
    Forbidden(&'static str),

    /// HTTP 409 on a mutating call.
    #[error(
        "The idempotency key {0} is already in use. This request has already been processed."
    )]
    Conflict(IdempotencyKey),

    /// Any other non-2xx status.
    #[error("HTTP error! status: {status} - {body}")]
    Upstream { status: u16, body: String },

    /// No response was obtained.
    #[error("{0}")]
    Transport(#[from] ClientError),

    /// A 2xx response whose body is not valid JSON.
    #[error("Failed to parse response body: {0}")]
    Parse(#[source] serde_json::Error),

    /// The request could not be built.
    #[error("Failed to build request: {0}")]
    Request(#[from] RequestError),
}

impl ApiError {
    /// Short failure class, used as a structured logging field.
    pub fn class(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::Unauthorized => "auth",
            Self::Forbidden(_) => "permission",
            Self::Conflict(_) => "conflict",
            Self::Upstream { .. } => "upstream",
            Self::Transport(_) => "transport",
            Self::Parse(_) => "parse",
            Self::Request(_) => "request",
        }
    }
}

/// Interprets the outcome of one upstream call.
#[derive(Debug, Clone)]
pub struct ResponseNormalizer {
    idempotency_key: Option<IdempotencyKey>,
    forbidden_message: &'static str,
}

impl Default for ResponseNormalizer {
    fn default() -> Self {
        Self {
            idempotency_key: None,
            forbidden_message: DEFAULT_FORBIDDEN_MESSAGE,
        }
    }
}

impl ResponseNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizer for `request`, carrying its idempotency key if it has one.
    pub fn for_request(request: &ApiRequest) -> Self {
        Self {
            idempotency_key: request.idempotency_key().cloned(),
            ..Self::default()
        }
    }

    pub fn with_idempotency_key(mut self, key: IdempotencyKey) -> Self {
        self.idempotency_key = Some(key);
        self
    }

    /// Override the message returned for HTTP 403.
    pub fn with_forbidden_message(mut self, message: &'static str) -> Self {
        self.forbidden_message = message;
        self
    }

    pub fn normalize(&self, outcome: Result<RawResponse, ClientError>) -> Result<Value, ApiError> {
        let response = outcome?;

        if response.is_success() {
            let value: Value = serde_json::from_str(&response.body).map_err(ApiError::Parse)?;
            return Ok(self.attach_key(value));
        }

        let RawResponse { status, body } = response;
        Err(match (status, &self.idempotency_key) {
            (400, _) => ApiError::BadRequest(body),
            (401, _) => ApiError::Unauthorized,
            (403, _) => ApiError::Forbidden(self.forbidden_message),
            (409, Some(key)) => ApiError::Conflict(key.clone()),
            _ => ApiError::Upstream { status, body },
        })
    }

    /// Echo the idempotency key back inside a successful payload.
    fn attach_key(&self, value: Value) -> Value {
        let Some(key) = &self.idempotency_key else {
            return value;
        };

        match value {
            Value::Object(mut map) => {
                map.insert("idempotency_key".to_string(), json!(key.as_str()));
                Value::Object(map)
            }
            other => json!({
                "data": other,
                "idempotency_key": key.as_str(),
            }),
        }
    }
}
