mod client;
mod error;
mod models;

pub use client::DeployApi;
pub use reqwest::StatusCode;
pub use error::{ApiError, Result};
pub use models::{DeployRequest, DeployResult, HealthStatus, PipelineStatus};
