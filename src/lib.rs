//! Mercury MCP Server Library
//!
//! This crate exposes the Mercury banking API to Model Context Protocol
//! clients as a fixed set of tools.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the Mercury HTTP client layer,
//!   the MCP server and its transports
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: the tool framework (schemas, binding, registry) and the
//!     Mercury tool definitions
//!
//! # Example
//!
//! ```rust,no_run
//! use mercury_mcp_server::{core::Config, core::McpServer, core::TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let transport = TransportService::new(config.transport.clone());
//!     let server = McpServer::new(config)?;
//!     transport.run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
