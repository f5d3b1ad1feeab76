//! Tool input schemas derived from parameter types.
//!
//! Parameter structs derive `JsonSchema`. The derived schema is what clients
//! see in `tools/list`, and the same derivation, compiled once per field,
//! gates raw input before it is deserialized.

use std::fmt;
use std::sync::Arc;

use jsonschema::Validator;
use rmcp::handler::server::tool::schema_for_type;
use rmcp::model::JsonObject;
use schemars::JsonSchema;
use schemars::generate::SchemaSettings;
use serde_json::Value;
use tracing::debug;

use super::error::{FieldIssue, SchemaError, ValidationError};

/// One top-level property and its compiled validator.
struct FieldRule {
    name: String,
    required: bool,
    integer: bool,
    validator: Validator,
}

/// Input schema of one tool, derived from its parameter type.
#[derive(Clone)]
pub struct ParamsSchema {
    advertised: Arc<JsonObject>,
    fields: Arc<[FieldRule]>,
}

impl ParamsSchema {
    /// Derive and compile the schema of `P`.
    pub fn of<P: JsonSchema + 'static>() -> Result<Self, SchemaError> {
        // Inlined so each property validates on its own, without `$ref`s.
        let generator = SchemaSettings::draft2020_12()
            .with(|settings| settings.inline_subschemas = true)
            .into_generator();
        let root = serde_json::to_value(generator.into_root_schema_for::<P>())
            .map_err(|e| SchemaError::new("(root)", e.to_string()))?;

        let required: Vec<&str> = root
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        let mut fields = Vec::new();
        if let Some(properties) = root.get("properties").and_then(Value::as_object) {
            for (name, schema) in properties {
                let validator = jsonschema::options()
                    .should_validate_formats(true)
                    .build(schema)
                    .map_err(|e| SchemaError::new(name.as_str(), e.to_string()))?;
                fields.push(FieldRule {
                    name: name.clone(),
                    required: required.contains(&name.as_str()),
                    integer: accepts_integer(schema),
                    validator,
                });
            }
        }

        Ok(Self {
            advertised: Arc::new(schema_for_type::<P>()),
            fields: fields.into(),
        })
    }

    /// The JSON Schema advertised in `tools/list`.
    pub fn advertised(&self) -> Arc<JsonObject> {
        Arc::clone(&self.advertised)
    }

    /// Declared property names.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Validate raw input.
    ///
    /// Returns only the declared fields that were supplied. Explicit `null`s
    /// count as absent. Every offending field is reported, sorted by name.
    pub fn validate(&self, input: Option<JsonObject>) -> Result<JsonObject, ValidationError> {
        let mut input = input.unwrap_or_default();
        let mut validated = JsonObject::new();
        let mut issues = Vec::new();

        for rule in self.fields.iter() {
            match input.remove(&rule.name) {
                None | Some(Value::Null) => {
                    if rule.required {
                        issues.push(FieldIssue::new(&rule.name, "missing required field"));
                    }
                }
                Some(value) => {
                    let value = if rule.integer {
                        coerce_whole_float(value)
                    } else {
                        value
                    };
                    let errors: Vec<String> = rule
                        .validator
                        .iter_errors(&value)
                        .map(|e| e.to_string())
                        .collect();
                    if errors.is_empty() {
                        validated.insert(rule.name.clone(), value);
                    } else {
                        issues.push(FieldIssue::new(&rule.name, errors.join(", ")));
                    }
                }
            }
        }

        if !input.is_empty() {
            debug!(
                "Ignoring undeclared input fields: {:?}",
                input.keys().collect::<Vec<_>>()
            );
        }

        if issues.is_empty() {
            Ok(validated)
        } else {
            issues.sort_by(|a, b| a.field.cmp(&b.field));
            Err(ValidationError::new(issues))
        }
    }
}

impl fmt::Debug for ParamsSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamsSchema")
            .field("fields", &self.field_names())
            .finish_non_exhaustive()
    }
}

fn accepts_integer(schema: &Value) -> bool {
    let direct = match schema.get("type") {
        Some(Value::String(kind)) => kind == "integer",
        Some(Value::Array(kinds)) => kinds.iter().any(|k| k == "integer"),
        _ => false,
    };
    direct
        || schema
            .get("anyOf")
            .and_then(Value::as_array)
            .is_some_and(|variants| variants.iter().any(accepts_integer))
}

/// `10.0` becomes `10`; anything else is left for the validator to judge.
fn coerce_whole_float(value: Value) -> Value {
    if !value.is_f64() {
        return value;
    }
    match value.as_f64() {
        Some(n) if n.fract() == 0.0 && n >= 0.0 && n <= u64::MAX as f64 => Value::from(n as u64),
        Some(n) if n.fract() == 0.0 && n < 0.0 && n >= i64::MIN as f64 => Value::from(n as i64),
        _ => value,
    }
}
