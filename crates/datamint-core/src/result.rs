use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Backend response for a generation request, consumed as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub success: bool,
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub record_count: u64,
    #[serde(default)]
    pub metadata: GenerationMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Generation metadata reported by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationMetadata {
    #[serde(default)]
    pub generation_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm_tokens_used: Option<u64>,
    #[serde(default)]
    pub generation_time_ms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coherence_score: Option<f64>,
    /// Scenario name to generated count, in backend order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario_counts: Option<Map<String, Value>>,
}

impl GenerationMetadata {
    /// Scenario counts in backend order; non-numeric counts read as zero.
    pub fn scenario_counts(&self) -> Vec<(String, u64)> {
        self.scenario_counts
            .iter()
            .flat_map(|counts| counts.iter())
            .map(|(name, count)| (name.clone(), count.as_u64().unwrap_or(0)))
            .collect()
    }
}

/// Field description inside a schema catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaField {
    pub name: String,
    #[serde(default, rename = "type")]
    pub field_type: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub description: Option<String>,
}

/// Entry of the backend schema catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaInfo {
    pub name: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub fields: Vec<SchemaField>,
}

/// Overall backend health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

impl HealthStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::Degraded => "degraded",
            HealthStatus::Unhealthy => "unhealthy",
        }
    }
}

/// Health snapshot of the backend and its components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    /// Raw service status string as reported (or `unreachable`).
    pub service_status: String,
    pub components: BTreeMap<String, String>,
}

impl HealthReport {
    pub fn unreachable() -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            service_status: "unreachable".to_string(),
            components: BTreeMap::new(),
        }
    }
}
