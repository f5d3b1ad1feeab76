//! Upstream API plumbing shared by every tool.
//!
//! - `request`: deterministic request construction (path, query, headers, body)
//! - `idempotency`: idempotency keys for mutating calls
//! - `client`: the network client contract and its `reqwest` implementation
//! - `response`: status/body normalization into a payload or a classified error

pub mod client;
pub mod idempotency;
pub mod request;
pub mod response;

pub use client::{ClientError, HttpClient, RawResponse, ReqwestClient};
pub use idempotency::IdempotencyKey;
pub use request::{ApiRequest, IDEMPOTENCY_KEY, Query, QueryValue, RequestBuilder, RequestError};
pub use response::{ApiError, DEFAULT_FORBIDDEN_MESSAGE, ResponseNormalizer};
