//! Request-lifecycle state machine for the deployment form.

use chrono::{DateTime, Utc};
use launchpad_api::{ApiError, DeployApi, DeployResult};
use tracing::{debug, info, warn};

use crate::state::{
    is_valid_name, RequestState, CONNECTION_ERROR_MESSAGE, REJECTION_FALLBACK_MESSAGE,
    VALIDATION_MESSAGE,
};

/// Correlation token for one in-flight submission.
///
/// Carries the generation number of the controller state that started it;
/// outcomes from a superseded generation are discarded instead of being
/// applied onto a newer state.
#[derive(Debug, Clone)]
pub struct Attempt {
    generation: u64,
    username: String,
    started_at: DateTime<Utc>,
}

impl Attempt {
    /// Name to submit, exactly as the user typed it.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}

/// Mediates between user input, the deployment-trigger endpoint, and the
/// displayed outcome.
///
/// The machine is split into synchronous transitions ([`start_submit`] and
/// [`resolve`]) plus the async [`submit`] driver, so the transition logic is
/// testable without I/O and event-loop front ends can drive the pieces
/// themselves.
///
/// Transitions: `Idle --submit(valid)--> Submitting --success--> Succeeded`;
/// `Submitting --failure--> Failed`; `Idle --submit(invalid)--> Failed`.
/// Terminal states are re-entrant: a new submit starts a fresh attempt.
///
/// [`start_submit`]: Controller::start_submit
/// [`resolve`]: Controller::resolve
/// [`submit`]: Controller::submit
#[derive(Debug, Default)]
pub struct Controller {
    state: RequestState,
    generation: u64,
}

impl Controller {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current request state.
    #[must_use]
    pub fn state(&self) -> &RequestState {
        &self.state
    }

    /// Whether an attempt is in flight; front ends disable the submit
    /// control while this holds.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.state.is_submitting()
    }

    /// Begin a submission attempt.
    ///
    /// Invalid input transitions directly to `Failed` and returns `None`;
    /// no network call must be made. Valid input transitions to
    /// `Submitting` and returns the [`Attempt`] whose request the caller
    /// issues. Either way the generation advances, so the outcome of any
    /// previously in-flight attempt becomes stale.
    pub fn start_submit(&mut self, name: &str) -> Option<Attempt> {
        self.generation += 1;

        if !is_valid_name(name) {
            debug!(generation = self.generation, "rejected invalid name");
            self.state = RequestState::Failed(VALIDATION_MESSAGE.to_owned());
            return None;
        }

        info!(generation = self.generation, "submitting deployment request");
        self.state = RequestState::Submitting;
        Some(Attempt {
            generation: self.generation,
            username: name.to_owned(),
            started_at: Utc::now(),
        })
    }

    /// Apply the outcome of an attempt's network call.
    ///
    /// Returns whether the outcome was applied. A stale attempt (the
    /// controller has started a newer one since) is discarded so a late
    /// response never overwrites a newer state.
    pub fn resolve(
        &mut self,
        attempt: &Attempt,
        outcome: Result<DeployResult, ApiError>,
    ) -> bool {
        if attempt.generation != self.generation {
            debug!(
                stale = attempt.generation,
                current = self.generation,
                "discarding outcome of superseded attempt"
            );
            return false;
        }

        let elapsed_ms = (Utc::now() - attempt.started_at).num_milliseconds();
        self.state = match outcome {
            Ok(result) => {
                info!(
                    generation = attempt.generation,
                    pipeline_id = %result.pipeline_id,
                    elapsed_ms,
                    "deployment triggered"
                );
                RequestState::Succeeded(result)
            }
            Err(ApiError::Rejected { status, detail }) => {
                warn!(generation = attempt.generation, %status, elapsed_ms, "deployment rejected");
                RequestState::Failed(
                    detail.unwrap_or_else(|| REJECTION_FALLBACK_MESSAGE.to_owned()),
                )
            }
            Err(ApiError::Transport(err)) => {
                warn!(generation = attempt.generation, error = %err, elapsed_ms, "deployment request failed");
                RequestState::Failed(CONNECTION_ERROR_MESSAGE.to_owned())
            }
        };
        true
    }

    /// Validate, issue the trigger request, and settle into a terminal
    /// state. Exactly one POST is made for valid input, none otherwise.
    pub async fn submit(&mut self, api: &DeployApi, name: &str) -> &RequestState {
        let Some(attempt) = self.start_submit(name) else {
            return &self.state;
        };

        let outcome = api.trigger(attempt.username()).await;
        self.resolve(&attempt, outcome);
        &self.state
    }
}
