use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use datamint_core::{GenerationRequest, GenerationResult, HealthReport, SchemaInfo};

use crate::backend::GenerationBackend;
use crate::error::{Result, TransportError};
use crate::wire::{decode_generate, decode_health, decode_schemas};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8091";

/// HTTP client for the backend's `/generate`, `/schemas` and `/health`
/// endpoints.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| TransportError::Client(err.to_string()))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read_body(&self, url: &str, response: reqwest::Response) -> Result<String> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| self.unreachable(url, err))?;
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    fn unreachable(&self, url: &str, err: reqwest::Error) -> TransportError {
        TransportError::Unreachable {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}

#[async_trait]
impl GenerationBackend for HttpBackend {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        let url = self.url("/generate");
        let correlation_id = Uuid::new_v4();
        tracing::info!(
            event = "generate_request",
            %correlation_id,
            url = %url,
            entity = %request.entity,
            count = request.count,
        );

        let response = self
            .client
            .post(&url)
            .header("x-request-id", correlation_id.to_string())
            .json(request)
            .send()
            .await
            .map_err(|err| self.unreachable(&url, err))?;
        let body = self.read_body(&url, response).await.inspect_err(|err| {
            tracing::warn!(event = "generate_failed", %correlation_id, error = %err);
        })?;

        let result = decode_generate(&body)?;
        tracing::info!(
            event = "generate_response",
            %correlation_id,
            request_id = %result.request_id,
            success = result.success,
            records = result.record_count,
        );
        Ok(result)
    }

    async fn list_schemas(&self, domain: Option<&str>) -> Result<Vec<SchemaInfo>> {
        let url = self.url("/schemas");
        let mut builder = self.client.get(&url);
        if let Some(domain) = domain {
            builder = builder.query(&[("domain", domain)]);
        }
        let response = builder
            .send()
            .await
            .map_err(|err| self.unreachable(&url, err))?;
        let body = self.read_body(&url, response).await?;
        let schemas = decode_schemas(&body)?;
        tracing::debug!(event = "schemas_listed", count = schemas.len(), domain = ?domain);
        Ok(schemas)
    }

    async fn health_check(&self) -> HealthReport {
        let url = self.url("/health");
        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(event = "health_unreachable", url = %url, error = %err);
                return HealthReport::unreachable();
            }
        };
        match response.text().await {
            Ok(body) => decode_health(&body),
            Err(err) => {
                tracing::warn!(event = "health_unreachable", url = %url, error = %err);
                HealthReport::unreachable()
            }
        }
    }
}
