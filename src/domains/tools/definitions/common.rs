//! Common utilities shared across Mercury tools.
//!
//! Every tool ends the same way: send the built request, normalize the
//! response, and turn any failure into an `Error <action>: <message>` result.

use serde_json::Value;
use tracing::error;

use super::context::MercuryContext;
use crate::core::api::{
    ApiError, ApiRequest, DEFAULT_FORBIDDEN_MESSAGE, RequestError, ResponseNormalizer,
};
use crate::domains::tools::result::InvocationResult;

/// How one upstream operation reports itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    /// Verb phrase used in failure messages, e.g. `sending money`.
    action: &'static str,
    /// Message returned for HTTP 403.
    forbidden: &'static str,
}

impl Operation {
    pub const fn new(action: &'static str) -> Self {
        Self {
            action,
            forbidden: DEFAULT_FORBIDDEN_MESSAGE,
        }
    }

    pub const fn forbidden_message(self, forbidden: &'static str) -> Self {
        Self {
            action: self.action,
            forbidden,
        }
    }

    pub fn action(&self) -> &'static str {
        self.action
    }

    /// Send `request` and fold the outcome into an [`InvocationResult`].
    pub async fn run(
        &self,
        context: &MercuryContext,
        request: Result<ApiRequest, RequestError>,
    ) -> InvocationResult {
        match self.execute(context, request).await {
            Ok(value) => InvocationResult::success(value),
            Err(e) => {
                error!(class = e.class(), "Error {}: {}", self.action, e);
                InvocationResult::failure(format!("Error {}: {}", self.action, e))
            }
        }
    }

    async fn execute(
        &self,
        context: &MercuryContext,
        request: Result<ApiRequest, RequestError>,
    ) -> Result<Value, ApiError> {
        let request = request?;
        let normalizer =
            ResponseNormalizer::for_request(&request).with_forbidden_message(self.forbidden);
        normalizer.normalize(context.send(request).await)
    }
}
