//! Core contracts for Datamint.
//!
//! This crate owns the request configurator: the generation domain model,
//! scenario management, typed presets, derivation of the outbound request
//! payload, custom-entity validation and the session that orders submits
//! against backend responses.

pub mod config;
pub mod error;
pub mod preset;
pub mod request;
pub mod result;
pub mod scenario;
pub mod session;
pub mod types;
pub mod validation;

pub use config::GeneratorConfig;
pub use error::{ConfigError, ConfigField, Error, Result};
pub use preset::{ConfigPreset, ConfigPresetBuilder};
pub use request::{GenerationRequest, derive_hints};
pub use result::{
    GenerationMetadata, GenerationResult, HealthReport, HealthStatus, SchemaField, SchemaInfo,
};
pub use scenario::{Scenario, ScenarioPatch, ScenarioSummary, normalize_scenario_name};
pub use session::{Session, Submission};
pub use types::{
    CUSTOM_ENTITY, DEFAULT_COUNT, Domain, ENTITIES, GenerationOptions, GenerationPath,
    MAX_COUNT, MIN_COUNT, OptionKey, OutputFormat,
};
pub use validation::{validate_custom_entity, validate_inline_schema, validate_override_schema};
