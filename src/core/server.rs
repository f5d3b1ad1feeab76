//! MCP Server implementation and lifecycle management.
//!
//! The server owns the tool registry and answers MCP `tools/list` and
//! `tools/call` by delegating to it. Every transport goes through the same
//! registry.
//!
//! **Adding a new tool does NOT require modifying this file!** See
//! `domains::tools::definitions::mercury_tools`.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    model::{
        CallToolRequestParam, CallToolResult, JsonObject, ListToolsResult, PaginatedRequestParam,
        ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
};
use tracing::{info, instrument};

use super::api::ReqwestClient;
use super::config::Config;
use super::error::Result;
use crate::domains::tools::definitions::{MercuryContext, mercury_tools};
use crate::domains::tools::{DispatchError, ToolRegistry};

/// Instructions advertised to clients during `initialize`.
pub const INSTRUCTIONS: &str = "Mercury banking tools. Read accounts, cards, treasury, transactions, statements and payment recipients, add recipients, and move money. Mutating tools accept an optional idempotency_key; one is generated when omitted and returned with the result. Prefer request_send_money unless the user confirms their IP is whitelisted for send_money.";

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Bound tools served by this instance.
    registry: Arc<ToolRegistry>,
}

impl McpServer {
    /// Create the server from configuration.
    ///
    /// Fails if no API key is configured, the HTTP client cannot be built, or
    /// two tools share a name.
    pub fn new(config: Config) -> Result<Self> {
        let api_key = config.mercury.require_api_key()?;
        let client = ReqwestClient::new(config.mercury.timeout())?;
        let context = Arc::new(MercuryContext::new(
            api_key,
            config.mercury.base_url.clone(),
            Arc::new(client),
        ));

        let registry = ToolRegistry::from_tools(mercury_tools(context)?)?;
        info!("Registered {} tools", registry.len());

        Ok(Self::with_registry(config, registry))
    }

    /// Create a server around an already assembled registry.
    pub fn with_registry(config: Config, registry: ToolRegistry) -> Self {
        Self {
            config: Arc::new(config),
            registry: Arc::new(registry),
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    // ========================================================================
    // Transport-independent entry points
    // ========================================================================

    /// List all available tools.
    pub fn list_tools(&self) -> Vec<Tool> {
        self.registry.tools()
    }

    /// Call a tool by name.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> std::result::Result<CallToolResult, DispatchError> {
        let result = self.registry.invoke(name, arguments).await?;
        Ok(result.into())
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult {
            tools: self.registry.tools(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, request, _context), fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        McpServer::call_tool(self, &request.name, request.arguments)
            .await
            .map_err(|e| McpError::invalid_params(e.to_string(), None))
    }
}
