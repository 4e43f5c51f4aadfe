use thiserror::Error;

/// Form field a configuration error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigField {
    CustomEntityName,
    InlineSchema,
}

/// Configuration errors detected before a request is submitted.
///
/// Each variant is reported next to the field returned by [`ConfigError::field`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Please provide a custom entity name")]
    EntityNameMissing,
    #[error("Schema is required for custom entities")]
    SchemaMissing,
    #[error("Invalid JSON: {0}")]
    SchemaMalformed(String),
    #[error("Schema must be a valid JSON object")]
    SchemaNotObject,
    #[error("Schema must have a \"properties\" field")]
    SchemaMissingProperties,
    #[error("Schema is not a valid JSON Schema: {0}")]
    SchemaInvalid(String),
}

impl ConfigError {
    /// Field the error should be displayed against.
    pub fn field(&self) -> ConfigField {
        match self {
            ConfigError::EntityNameMissing => ConfigField::CustomEntityName,
            _ => ConfigField::InlineSchema,
        }
    }
}

/// Core error type shared across Datamint crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The configuration cannot be submitted.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    /// A payload could not be encoded or decoded.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results returned by Datamint crates.
pub type Result<T> = std::result::Result<T, Error>;
