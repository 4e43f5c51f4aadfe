use jsonschema::JSONSchema;
use serde_json::Value;

use crate::error::ConfigError;

/// Validate the custom entity fields before submission.
///
/// The name must be non-blank and the schema must satisfy
/// [`validate_inline_schema`]. Returns the parsed schema.
pub fn validate_custom_entity(name: &str, schema: &str) -> Result<Value, ConfigError> {
    if name.trim().is_empty() {
        return Err(ConfigError::EntityNameMissing);
    }
    validate_inline_schema(schema)
}

/// Validate an inline JSON schema for a custom entity.
///
/// This checks, in order:
/// - the text is not blank
/// - it parses as JSON
/// - the document is an object with an object-valued `properties` field
/// - it compiles as a JSON Schema
pub fn validate_inline_schema(schema: &str) -> Result<Value, ConfigError> {
    if schema.trim().is_empty() {
        return Err(ConfigError::SchemaMissing);
    }

    let parsed: Value =
        serde_json::from_str(schema).map_err(|err| ConfigError::SchemaMalformed(err.to_string()))?;

    let Some(object) = parsed.as_object() else {
        return Err(ConfigError::SchemaNotObject);
    };

    if !matches!(object.get("properties"), Some(Value::Object(_))) {
        return Err(ConfigError::SchemaMissingProperties);
    }

    if let Err(err) = JSONSchema::compile(&parsed) {
        return Err(ConfigError::SchemaInvalid(err.to_string()));
    }

    Ok(parsed)
}

/// Validate a schema override attached to a catalog entity.
///
/// Overrides are optional; when present they only have to be valid JSON.
pub fn validate_override_schema(schema: &str) -> Result<(), ConfigError> {
    if schema.trim().is_empty() {
        return Ok(());
    }
    serde_json::from_str::<Value>(schema)
        .map(|_| ())
        .map_err(|err| ConfigError::SchemaMalformed(err.to_string()))
}
