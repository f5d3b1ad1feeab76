//! Tool-specific error types.

use std::fmt;

use thiserror::Error;

/// One rejected input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: String,
    pub reason: String,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Input rejected before any handler ran.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid arguments: {}", describe(.issues))]
pub struct ValidationError {
    issues: Vec<FieldIssue>,
}

fn describe(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    pub fn new(issues: Vec<FieldIssue>) -> Self {
        Self { issues }
    }

    /// A validation error for a single field.
    pub fn field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(vec![FieldIssue::new(field, reason)])
    }

    /// Wrap a deserialization failure of already-validated input.
    pub fn from_deserialize(error: serde_json::Error) -> Self {
        Self::field("input", error.to_string())
    }

    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    /// Names of the offending fields.
    pub fn fields(&self) -> Vec<&str> {
        self.issues.iter().map(|i| i.field.as_str()).collect()
    }
}

/// A parameter type whose derived schema could not be compiled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid input schema for field {field}: {reason}")]
pub struct SchemaError {
    field: String,
    reason: String,
}

impl SchemaError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }
}

/// Errors raised while assembling a registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A tool with the same name is already registered.
    #[error("Duplicate tool name: {0}")]
    DuplicateName(String),

    /// A tool definition could not be built.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl RegistryError {
    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicateName(name.into())
    }
}

/// Errors raised by the dispatcher before a handler produces a result.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No tool with this name is registered.
    #[error("Tool not found: {0}")]
    UnknownTool(String),

    /// The input did not match the tool's schema.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl DispatchError {
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_lists_every_field() {
        let err = ValidationError::new(vec![
            FieldIssue::new("account_id", "missing required field"),
            FieldIssue::new("status", "expected one of: pending, sent"),
        ]);
        assert_eq!(
            err.to_string(),
            "Invalid arguments: account_id: missing required field; status: expected one of: pending, sent"
        );
        assert_eq!(err.fields(), vec!["account_id", "status"]);
    }

    #[test]
    fn test_dispatch_error_messages() {
        assert_eq!(
            DispatchError::unknown_tool("nope").to_string(),
            "Tool not found: nope"
        );
        let err: DispatchError = ValidationError::field("id", "expected a string").into();
        assert_eq!(err.to_string(), "Invalid arguments: id: expected a string");
    }

    #[test]
    fn test_schema_error_surfaces_through_registry_error() {
        let err: RegistryError = SchemaError::new("amount", "bad keyword").into();
        assert_eq!(
            err.to_string(),
            "Invalid input schema for field amount: bad keyword"
        );
    }
}
