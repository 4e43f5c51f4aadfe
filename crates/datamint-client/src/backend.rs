use async_trait::async_trait;

use datamint_core::{GenerationRequest, GenerationResult, HealthReport, SchemaInfo};

use crate::error::Result;

/// Operations offered by a data-generation backend.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Submit a request and return the backend's result envelope.
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult>;

    /// List the schema catalog, optionally filtered by domain.
    async fn list_schemas(&self, domain: Option<&str>) -> Result<Vec<SchemaInfo>>;

    /// Report backend health. Never fails; an unreachable backend is
    /// reported as unhealthy.
    async fn health_check(&self) -> HealthReport;
}
