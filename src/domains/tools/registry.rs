//! Tool Registry - central registration and dispatch for all tools.
//!
//! The registry owns the bound tools served by this process. Both the rmcp
//! handler (STDIO) and the JSON-RPC endpoint (HTTP) list and call tools
//! through it.

use std::collections::HashMap;

use rmcp::model::{JsonObject, Tool};
use tracing::{info, warn};

use super::definition::BoundTool;
use super::error::{DispatchError, RegistryError};
use super::result::InvocationResult;

// ============================================================================
// Tool Registry
// ============================================================================

/// Name-indexed collection of bound tools, kept in registration order.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: Vec<BoundTool>,
    index: HashMap<&'static str, usize>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tool. Names must be unique.
    pub fn register(&mut self, tool: BoundTool) -> Result<(), RegistryError> {
        if self.index.contains_key(tool.name()) {
            return Err(RegistryError::duplicate_name(tool.name()));
        }
        self.index.insert(tool.name(), self.tools.len());
        self.tools.push(tool);
        Ok(())
    }

    /// Build a registry from `tools`, failing on the first duplicate name.
    pub fn from_tools(tools: impl IntoIterator<Item = BoundTool>) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for tool in tools {
            registry.register(tool)?;
        }
        Ok(registry)
    }

    pub fn get(&self, name: &str) -> Option<&BoundTool> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        self.tools.iter().map(BoundTool::name).collect()
    }

    /// Get all tools as Tool models (metadata).
    pub fn tools(&self) -> Vec<Tool> {
        self.tools.iter().map(BoundTool::to_tool).collect()
    }

    /// Dispatch a tool call by name.
    ///
    /// Unknown names and invalid input are reported as [`DispatchError`];
    /// anything that happens once the handler runs is an [`InvocationResult`].
    pub async fn invoke(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<InvocationResult, DispatchError> {
        let Some(tool) = self.get(name) else {
            warn!("Unknown tool requested: {}", name);
            return Err(DispatchError::unknown_tool(name));
        };

        info!("Invoking tool: {}", name);
        let result = tool.invoke(arguments).await.map_err(|e| {
            warn!("Rejected input for tool {}: {}", name, e);
            e
        })?;

        if result.is_error() {
            info!("Tool {} finished with an error result", name);
        }
        Ok(result)
    }
}
