use serde::{Deserialize, Serialize};

/// Body of the deployment-trigger request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployRequest {
    pub username: String,
}

/// Successful response from the deployment-trigger endpoint
///
/// `pipeline_url` is genuinely optional: the backend may omit it and
/// callers must not assume its presence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployResult {
    pub message: String,
    pub pipeline_id: String,
    #[serde(default)]
    pub pipeline_url: Option<String>,
}

/// Error body returned by the backend on a structured rejection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: String,
}

/// Response from the backend health endpoint
///
/// The backend reports extra fields (service name, token configuration);
/// only the status string matters to clients and the rest is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Response from the pipeline status endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineStatus {
    pub pipeline_id: String,
    pub status: String,
    pub message: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub stopped_at: Option<String>,
}

impl PipelineStatus {
    /// Whether the pipeline has reached a state it cannot leave
    ///
    /// Unknown status strings are treated as still in progress so that
    /// new backend states degrade to "keep polling" rather than a wrong
    /// terminal verdict.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self.status.as_str(), "success" | "failed" | "canceled")
    }
}
