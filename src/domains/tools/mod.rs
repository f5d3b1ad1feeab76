//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are callable operations that MCP clients invoke by name.
//!
//! ## Architecture
//!
//! - `schema.rs` - Input schemas derived from parameter types, and the validator
//! - `definition.rs` - `ToolSpec`, `ToolDefinition` and context binding
//! - `registry.rs` - Central tool registry and dispatch
//! - `result.rs` - The uniform invocation result
//! - `error.rs` - Tool-specific error types
//! - `definitions/` - Mercury tool implementations (one file per tool)
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` with a unit struct implementing `ToolSpec`
//! 2. Derive `JsonSchema` on its parameter struct and write the handler
//! 3. Add it to `definitions::mercury_tools`
//!
//! **No need to modify `server.rs`!** Listing and dispatch go through the registry.

pub mod definition;
pub mod definitions;
mod error;
mod registry;
mod result;
pub mod schema;

pub use definition::{BoundTool, HandlerFuture, ToolDefinition, ToolSpec};
pub use error::{DispatchError, FieldIssue, RegistryError, SchemaError, ValidationError};
pub use registry::ToolRegistry;
pub use result::InvocationResult;
pub use schema::ParamsSchema;
