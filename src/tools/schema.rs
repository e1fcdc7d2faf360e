//! Parameter schema helpers: builders for the JSON Schema documents the
//! tools publish, and the validation applied before a tool runs.

use crate::error::{PaykitError, Result};
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

/// Upper bound on validation messages reported for one call.
const MAX_REPORTED_ERRORS: usize = 5;

/// A tool's parameter schema compiled once for repeated validation.
pub struct ParameterSchema {
    tool: &'static str,
    validator: jsonschema::Validator,
}

impl ParameterSchema {
    pub fn compile(tool: &'static str, schema: &Value) -> Result<Self> {
        let validator = jsonschema::validator_for(schema).map_err(|e| {
            PaykitError::Configuration(format!("parameter schema for {} is invalid: {}", tool, e))
        })?;
        Ok(Self { tool, validator })
    }

    /// Check `args` against the schema, collecting the first few violations.
    pub fn check(&self, args: &Value) -> Result<()> {
        if self.validator.is_valid(args) {
            return Ok(());
        }
        let messages: Vec<String> = self
            .validator
            .iter_errors(args)
            .take(MAX_REPORTED_ERRORS)
            .map(|e| e.to_string())
            .collect();
        Err(PaykitError::validation(self.tool, messages.join("; ")))
    }
}

/// Hosts send `null` for a call without arguments.
pub fn normalize_args(args: Value) -> Value {
    match args {
        Value::Null => Value::Object(Map::new()),
        other => other,
    }
}

/// Decode validated arguments into a typed request.
pub fn parse_args<T: DeserializeOwned>(tool: &str, args: Value) -> Result<T> {
    serde_json::from_value(normalize_args(args))
        .map_err(|e| PaykitError::validation(tool, e.to_string()))
}

// ---------------------------------------------------------------------------
// Schema builders
// ---------------------------------------------------------------------------

pub fn string(description: &str) -> Value {
    json!({ "type": "string", "description": description })
}

pub fn non_empty_string(description: &str) -> Value {
    json!({ "type": "string", "minLength": 1, "description": description })
}

pub fn string_enum(values: &[&str], description: &str) -> Value {
    json!({ "type": "string", "enum": values, "description": description })
}

pub fn literal(value: &str, description: &str) -> Value {
    json!({ "type": "string", "const": value, "description": description })
}

pub fn usd_amount(description: &str) -> Value {
    json!({ "type": "number", "exclusiveMinimum": 0, "description": description })
}

pub fn usd_currency() -> Value {
    literal("USD", "Currency code (always USD)")
}

/// Closed object schema: unknown properties are rejected.
pub fn object(properties: Vec<(&str, Value)>, required: &[&str]) -> Value {
    let properties: Map<String, Value> = properties
        .into_iter()
        .map(|(name, schema)| (name.to_string(), schema))
        .collect();
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false,
    })
}
