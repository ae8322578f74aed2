use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors produced by the deployment API client
///
/// Structured rejections (the backend answered with a non-success status)
/// are kept distinct from transport failures (the backend could not be
/// reached, or its response could not be parsed). Callers map the two to
/// different user-facing messages.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Backend answered with a non-2xx status
    #[error("deployment rejected ({status}): {}", detail.as_deref().unwrap_or("no detail"))]
    Rejected {
        status: StatusCode,
        /// Server-provided `detail` message, surfaced verbatim when present
        detail: Option<String>,
    },

    /// Request failed in flight or the response body was malformed
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}
