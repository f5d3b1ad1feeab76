//! Test doubles for tool tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rmcp::model::JsonObject;
use serde_json::Value;

use super::context::MercuryContext;
use crate::core::api::{ApiRequest, ClientError, HttpClient, RawResponse};

pub const TEST_TOKEN: &str = "test-token";
pub const TEST_BASE_URL: &str = "https://api.mercury.test/api/v1";

/// `HttpClient` that records every request and answers with a canned reply.
pub struct RecordingClient {
    reply: Result<RawResponse, String>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl RecordingClient {
    pub fn reply(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(RawResponse::new(status, body)),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn ok(body: &str) -> Arc<Self> {
        Self::reply(200, body)
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(message.to_string()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> ApiRequest {
        self.requests().pop().expect("no request was sent")
    }

    /// Body of the last request, parsed as JSON.
    pub fn last_body(&self) -> Value {
        let request = self.last_request();
        serde_json::from_str(request.body().expect("request has no body")).unwrap()
    }
}

#[async_trait]
impl HttpClient for RecordingClient {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ClientError> {
        self.requests.lock().unwrap().push(request);
        self.reply.clone().map_err(ClientError::new)
    }
}

/// Context wired to `client` with a fixed token and base URL.
pub fn context(client: Arc<RecordingClient>) -> Arc<MercuryContext> {
    Arc::new(MercuryContext::new(TEST_TOKEN, TEST_BASE_URL, client))
}

/// Tool arguments from a JSON object literal.
pub fn args(value: Value) -> Option<JsonObject> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}
