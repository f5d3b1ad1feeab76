//! Uniform tool invocation results.

use rmcp::model::{CallToolResult, Content};
use serde_json::Value;

/// What a tool handler hands back to the client.
///
/// Handlers never raise: every upstream or input problem ends up here as a
/// `Failure` with a readable message.
#[derive(Debug, Clone, PartialEq)]
pub enum InvocationResult {
    Success { content: Value },
    Failure { message: String },
}

impl InvocationResult {
    pub fn success(content: Value) -> Self {
        Self::Success { content }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    pub fn content(&self) -> Option<&Value> {
        match self {
            Self::Success { content } => Some(content),
            Self::Failure { .. } => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { message } => Some(message),
        }
    }
}

impl From<InvocationResult> for CallToolResult {
    fn from(result: InvocationResult) -> Self {
        match result {
            InvocationResult::Success { content } => {
                CallToolResult::success(vec![Content::text(content.to_string())])
            }
            InvocationResult::Failure { message } => {
                CallToolResult::error(vec![Content::text(message)])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_renders_json_text() {
        let result: CallToolResult = InvocationResult::success(json!({"accounts": []})).into();
        assert_eq!(result.is_error, Some(false));
        let text = result.content[0].as_text().unwrap();
        assert_eq!(text.text, r#"{"accounts":[]}"#);
    }

    #[test]
    fn test_failure_is_flagged() {
        let failure = InvocationResult::failure("Error sending money: nope");
        assert!(failure.is_error());
        assert_eq!(failure.message(), Some("Error sending money: nope"));
        assert!(failure.content().is_none());

        let result: CallToolResult = failure.into();
        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            result.content[0].as_text().unwrap().text,
            "Error sending money: nope"
        );
    }
}
