//! HTTP client for the deployment-trigger backend.

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::error::{ApiError, Result};
use crate::models::{DeployRequest, DeployResult, ErrorBody, HealthStatus, PipelineStatus};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client for the deployment-trigger endpoint.
///
/// Owns a single `reqwest::Client`; cheap to clone.
#[derive(Debug, Clone)]
pub struct DeployApi {
    client: Client,
    base_url: String,
}

impl DeployApi {
    /// Create a new client with the given base URL and request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Transport)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        })
    }

    /// Create a new client with the default timeout.
    pub fn with_url(base_url: impl Into<String>) -> Result<Self> {
        Self::new(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Base URL this client talks to, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Trigger a deployment pipeline for the given username.
    ///
    /// Issues one `POST /api/deploy` with body `{"username": ...}`. A 2xx
    /// response is parsed as [`DeployResult`]; a non-2xx response becomes
    /// [`ApiError::Rejected`] carrying the server's `detail` message when
    /// the body has one. A 2xx response with an unparseable body is a
    /// transport failure, not a rejection.
    pub async fn trigger(&self, username: &str) -> Result<DeployResult> {
        let url = format!("{}/api/deploy", self.base_url);
        debug!(url = %url, "triggering deployment");

        let response = self
            .client
            .post(&url)
            .json(&DeployRequest {
                username: username.to_owned(),
            })
            .send()
            .await
            .map_err(ApiError::Transport)?;

        let status = response.status();
        if status.is_success() {
            let result: DeployResult = response.json().await.map_err(ApiError::Transport)?;
            debug!(pipeline_id = %result.pipeline_id, "deployment triggered");
            Ok(result)
        } else {
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .map(|body| body.detail);
            debug!(status = %status, detail = ?detail, "deployment rejected");
            Err(ApiError::Rejected { status, detail })
        }
    }

    /// Check whether the backend is up.
    pub async fn health(&self) -> Result<HealthStatus> {
        let url = format!("{}/health", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ApiError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Rejected {
                status,
                detail: None,
            });
        }

        response.json().await.map_err(ApiError::Transport)
    }

    /// Fetch the current status of a triggered pipeline.
    pub async fn pipeline_status(&self, pipeline_id: &str) -> Result<PipelineStatus> {
        let url = format!("{}/api/status/{}", self.base_url, pipeline_id);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ApiError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .map(|body| body.detail);
            return Err(ApiError::Rejected { status, detail });
        }

        response.json().await.map_err(ApiError::Transport)
    }
}
