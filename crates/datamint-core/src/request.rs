use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::scenario::Scenario;
use crate::types::{Domain, GenerationOptions, GenerationPath, OutputFormat};

/// Outbound request payload derived from the configurator state.
///
/// Built fresh on every submit and never mutated afterwards. Optional
/// fields are omitted from the wire payload entirely when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub domain: Domain,
    pub entity: String,
    pub count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenarios: Option<Vec<Scenario>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hints: Option<Vec<String>>,
    pub output_format: OutputFormat,
    pub options: GenerationOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_schema: Option<String>,
}

impl GenerationRequest {
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn hints(&self) -> &[String] {
        self.hints.as_deref().unwrap_or(&[])
    }
}

/// Derive the ordered routing hints for a configuration snapshot.
///
/// Order: path hints, then option hints (`learn_from_history`, `edge_case`,
/// `production_like`), then `realistic` when context is present and the
/// path accepts context.
pub fn derive_hints(
    path: GenerationPath,
    options: &GenerationOptions,
    context: &str,
) -> Vec<String> {
    let mut hints: Vec<String> = path.hints().iter().map(|h| h.to_string()).collect();

    if options.learn_from_history {
        hints.push("learn_from_history".to_string());
    }
    if options.defect_triggering {
        hints.push("edge_case".to_string());
    }
    if options.production_like {
        hints.push("production_like".to_string());
    }

    if !context.is_empty() && path.accepts_context() {
        hints.push("realistic".to_string());
    }

    hints
}
