use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::AnalysisResult,
    protocol::{AnalyzeRequest, ServiceStatus},
};
use tracing::{debug, info};

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod samples;
pub mod session;
pub mod view;

pub use config::{load_settings, ClientSettings};
pub use error::{AnalysisError, ConfigError};
pub use orchestrator::{
    PendingRequest, RequestOrchestrator, RequestPhase, RequestState, Resolution,
};
pub use samples::{SampleOutOfRange, SampleSelector, INCIDENT_SAMPLES};
pub use session::{AnalysisSession, CompletedRequest, InFlightRequest};

/// The external service that extracts offence tags and ranks legal sections.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalysisResult, AnalysisError>;
    async fn status(&self) -> Result<ServiceStatus, AnalysisError>;
}

/// HTTP client for the analysis service (`POST /analyze`, `GET /`).
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    http: Client,
    base_url: String,
}

impl AnalysisClient {
    pub fn new(settings: &ClientSettings) -> Result<Self, AnalysisError> {
        let http = Client::builder()
            .timeout(settings.request_timeout())
            .build()?;
        Ok(Self::with_http_client(http, settings.api_base_url.clone()))
    }

    /// `base_url` should be like `http://127.0.0.1:8000`; a trailing slash is dropped.
    pub fn with_http_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl AnalysisBackend for AnalysisClient {
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalysisResult, AnalysisError> {
        let url = format!("{}/analyze", self.base_url);
        debug!(url = %url, "posting incident text");

        let res = self.http.post(&url).json(request).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(AnalysisError::Status {
                status: status.as_u16(),
            });
        }

        let body = res.bytes().await?;
        let result = AnalysisResult::from_slice(&body)?;
        info!(
            tags = result.tag_count(),
            sections = result.section_count(),
            "analysis response parsed"
        );
        Ok(result)
    }

    async fn status(&self) -> Result<ServiceStatus, AnalysisError> {
        let url = format!("{}/", self.base_url);
        let res = self.http.get(&url).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(AnalysisError::Status {
                status: status.as_u16(),
            });
        }
        let body = res.bytes().await?;
        let service_status: ServiceStatus = serde_json::from_slice(&body)
            .map_err(|err| AnalysisError::Malformed(err.into()))?;
        Ok(service_status)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
