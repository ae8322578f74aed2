use launchpad_api::DeployResult;

/// Minimum trimmed length for a name to be accepted.
pub const MIN_NAME_CHARS: usize = 2;

/// Shown when local validation fails; no network call is made in that case.
pub const VALIDATION_MESSAGE: &str = "Por favor ingresa un nombre válido (mínimo 2 caracteres)";

/// Shown when the backend rejects the request without a `detail` message.
pub const REJECTION_FALLBACK_MESSAGE: &str = "Error al iniciar deployment";

/// Shown when the backend could not be reached or answered garbage.
pub const CONNECTION_ERROR_MESSAGE: &str = "Error de conexión con el servidor de deployments";

/// Lifecycle of one submission attempt.
///
/// Exactly one variant is active at any time; transitions through
/// [`Controller`](crate::Controller) are the only way to change it, which
/// keeps combinations like "loading and errored at once" unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState {
    /// No attempt has been made yet.
    #[default]
    Idle,
    /// A request is in flight; the submit control should be disabled.
    Submitting,
    /// The backend accepted the request and started a pipeline.
    Succeeded(DeployResult),
    /// The attempt ended with a user-visible error message.
    Failed(String),
}

impl RequestState {
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    /// Whether the attempt has finished, successfully or not.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded(_) | Self::Failed(_))
    }
}

/// Validity rule for the submitted name.
///
/// Trimming is only part of the check: a valid name is still sent to the
/// backend exactly as typed.
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    name.trim().chars().count() >= MIN_NAME_CHARS
}
