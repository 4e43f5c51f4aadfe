use serde::Deserialize;
use serde_json::{Map, Value};

use datamint_core::{
    GenerationMetadata, GenerationResult, HealthReport, HealthStatus, SchemaInfo,
};

use crate::error::{Result, TransportError};

/// Generate envelope as sent by the backend. Accepts both the camelCase
/// HTTP shape and the snake_case gRPC-JSON shape.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateEnvelope {
    #[serde(default)]
    success: bool,
    #[serde(default, alias = "request_id")]
    request_id: Option<String>,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default, alias = "record_count")]
    record_count: Option<u64>,
    #[serde(default)]
    metadata: Option<MetadataEnvelope>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MetadataEnvelope {
    #[serde(default, alias = "generation_path")]
    generation_path: Option<String>,
    #[serde(default, alias = "llm_tokens_used")]
    llm_tokens_used: Option<u64>,
    #[serde(default, alias = "generation_time_ms")]
    generation_time_ms: Option<f64>,
    #[serde(default, alias = "coherence_score")]
    coherence_score: Option<f64>,
    #[serde(default, alias = "scenario_counts")]
    scenario_counts: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct SchemasEnvelope {
    #[serde(default)]
    schemas: Vec<SchemaInfo>,
}

#[derive(Debug, Deserialize)]
struct HealthEnvelope {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    components: Option<Map<String, Value>>,
}

/// Decode a generate response body.
///
/// `data` arriving as a JSON-encoded string is parsed; a missing `data`
/// field becomes an empty list.
pub fn decode_generate(body: &str) -> Result<GenerationResult> {
    let envelope: GenerateEnvelope =
        serde_json::from_str(body).map_err(|err| TransportError::Envelope(err.to_string()))?;
    let metadata = envelope.metadata.unwrap_or_default();

    Ok(GenerationResult {
        success: envelope.success,
        request_id: envelope.request_id.unwrap_or_default(),
        data: normalize_data(envelope.data),
        record_count: envelope.record_count.unwrap_or(0),
        metadata: GenerationMetadata {
            generation_path: metadata.generation_path,
            llm_tokens_used: metadata.llm_tokens_used,
            generation_time_ms: metadata.generation_time_ms,
            coherence_score: metadata.coherence_score,
            scenario_counts: metadata.scenario_counts,
        },
        error: envelope.error.filter(|message| !message.is_empty()),
    })
}

/// Parse string payloads that contain JSON; other strings stay as leaves.
pub fn normalize_data(data: Option<Value>) -> Value {
    match data {
        None | Some(Value::Null) => Value::Array(Vec::new()),
        Some(Value::String(text)) if text.is_empty() => Value::Array(Vec::new()),
        Some(Value::String(text)) => serde_json::from_str(&text).unwrap_or(Value::String(text)),
        Some(other) => other,
    }
}

pub fn decode_schemas(body: &str) -> Result<Vec<SchemaInfo>> {
    let envelope: SchemasEnvelope =
        serde_json::from_str(body).map_err(|err| TransportError::Envelope(err.to_string()))?;
    Ok(envelope.schemas)
}

/// Map a health body onto a report. A body that is not a health envelope
/// (a proxy error page, say) is reported as unreachable.
pub fn decode_health(body: &str) -> HealthReport {
    let envelope = match serde_json::from_str::<HealthEnvelope>(body) {
        Ok(envelope) => envelope,
        Err(err) => {
            tracing::debug!(event = "health_body_unreadable", error = %err);
            return HealthReport::unreachable();
        }
    };

    let service_status = envelope.status.unwrap_or_default();
    let status = if service_status == "healthy" {
        HealthStatus::Healthy
    } else {
        HealthStatus::Degraded
    };
    let components = envelope
        .components
        .unwrap_or_default()
        .into_iter()
        .map(|(name, value)| {
            let status = match value {
                Value::String(text) => text,
                other => other.to_string(),
            };
            (name, status)
        })
        .collect();

    HealthReport {
        status,
        service_status,
        components,
    }
}
