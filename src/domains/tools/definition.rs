//! Context-bound tool definitions.
//!
//! A [`ToolDefinition`] pairs a name and a description with a handler that
//! needs some context `C` (credentials, a client) to run. Its [`ParamsSchema`]
//! is derived from the handler's parameter type. A definition cannot be
//! invoked directly. It has to be [bound](ToolDefinition::bind) to a context
//! first, which yields a [`BoundTool`]:
//!
//! ```compile_fail
//! use mercury_mcp_server::domains::tools::ToolSpec;
//! use mercury_mcp_server::domains::tools::definitions::GetBankAccountsTool;
//!
//! let definition = GetBankAccountsTool::definition().unwrap();
//! let _ = definition.invoke(None);
//! ```

use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;
use rmcp::model::{JsonObject, Tool};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::{SchemaError, ValidationError};
use super::result::InvocationResult;
use super::schema::ParamsSchema;

/// Future returned by every tool handler.
pub type HandlerFuture = BoxFuture<'static, InvocationResult>;

type ContextHandler<C> =
    Arc<dyn Fn(JsonObject, Arc<C>) -> Result<HandlerFuture, ValidationError> + Send + Sync>;

type BoundHandler = Arc<dyn Fn(JsonObject) -> Result<HandlerFuture, ValidationError> + Send + Sync>;

// ============================================================================
// ToolSpec
// ============================================================================

/// Static description of one tool.
///
/// Implementors are unit structs; [`ToolSpec::definition`] turns them into a
/// [`ToolDefinition`] ready to be bound.
pub trait ToolSpec: 'static {
    /// What the handler needs at call time.
    type Context: Send + Sync + 'static;

    /// Typed, validated parameters. Their derived schema is the tool's
    /// input schema.
    type Params: DeserializeOwned + JsonSchema + Send + 'static;

    const NAME: &'static str;
    const DESCRIPTION: &'static str;

    fn handle(params: Self::Params, context: Arc<Self::Context>) -> HandlerFuture;

    fn definition() -> Result<ToolDefinition<Self::Context>, SchemaError>
    where
        Self: Sized,
    {
        ToolDefinition::new(Self::NAME, Self::DESCRIPTION, Self::handle)
    }
}

// ============================================================================
// ToolDefinition
// ============================================================================

/// A tool awaiting its context.
pub struct ToolDefinition<C> {
    name: &'static str,
    description: &'static str,
    schema: ParamsSchema,
    handler: ContextHandler<C>,
}

impl<C: Send + Sync + 'static> ToolDefinition<C> {
    /// Build a definition from a typed handler.
    ///
    /// Input reaching `handler` has already passed the schema derived from
    /// `P` and been deserialized into it.
    pub fn new<P, F>(
        name: &'static str,
        description: &'static str,
        handler: F,
    ) -> Result<Self, SchemaError>
    where
        P: DeserializeOwned + JsonSchema + Send + 'static,
        F: Fn(P, Arc<C>) -> HandlerFuture + Send + Sync + 'static,
    {
        let handler: ContextHandler<C> = Arc::new(move |input, context| {
            let params = serde_json::from_value::<P>(Value::Object(input))
                .map_err(ValidationError::from_deserialize)?;
            Ok(handler(params, context))
        });

        Ok(Self {
            name,
            description,
            schema: ParamsSchema::of::<P>()?,
            handler,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn schema(&self) -> &ParamsSchema {
        &self.schema
    }

    /// Attach `context`, producing an invocable tool.
    ///
    /// The definition is left untouched and can be bound again, to the same
    /// or another context.
    pub fn bind(&self, context: Arc<C>) -> BoundTool {
        let handler = Arc::clone(&self.handler);
        BoundTool {
            name: self.name,
            description: self.description,
            schema: self.schema.clone(),
            handler: Arc::new(move |input| handler(input, Arc::clone(&context))),
        }
    }
}

impl<C> Clone for ToolDefinition<C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            description: self.description,
            schema: self.schema.clone(),
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<C> fmt::Debug for ToolDefinition<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDefinition")
            .field("name", &self.name)
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// BoundTool
// ============================================================================

/// A tool with its context attached. The context type is erased so tools
/// with different needs can share one registry.
#[derive(Clone)]
pub struct BoundTool {
    name: &'static str,
    description: &'static str,
    schema: ParamsSchema,
    handler: BoundHandler,
}

impl BoundTool {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn schema(&self) -> &ParamsSchema {
        &self.schema
    }

    /// Tool metadata as advertised in `tools/list`.
    pub fn to_tool(&self) -> Tool {
        Tool::new(self.name, self.description, self.schema.advertised())
    }

    /// Validate `input` and run the handler.
    ///
    /// The handler is never entered when validation fails.
    pub async fn invoke(&self, input: Option<JsonObject>) -> Result<InvocationResult, ValidationError> {
        let validated = self.schema.validate(input)?;
        let future = (self.handler)(validated)?;
        Ok(future.await)
    }
}

impl fmt::Debug for BoundTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundTool")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
