//! Error types and handling for the MCP server.
//!
//! This module defines a unified error type for startup and transport
//! failures. Failures inside a tool invocation never reach it; they are
//! reported to the client as tool results.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// The tool registry could not be assembled.
    #[error("Tool registry error: {0}")]
    Registry(#[from] crate::domains::tools::RegistryError),

    /// The upstream HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Client(#[from] super::api::ClientError),

    /// The transport failed to start or stopped abnormally.
    #[error("Transport error: {0}")]
    Transport(#[from] super::transport::TransportError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::RegistryError;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::config("missing key").to_string(),
            "Configuration error: missing key"
        );
        let err: Error = RegistryError::duplicate_name("send_money").into();
        assert_eq!(
            err.to_string(),
            "Tool registry error: Duplicate tool name: send_money"
        );
    }
}
