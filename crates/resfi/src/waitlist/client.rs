use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::form::FormState;
use super::goals::Goal;

/// Fallback when the collaborator rejects a submission without a structured
/// `detail` field.
pub const GENERIC_REJECTION_MESSAGE: &str = "Failed to join waitlist. Please try again.";

/// Fallback when the collaborator cannot be reached at all.
pub const CONNECTIVITY_MESSAGE: &str =
    "Unable to reach the waitlist service. Please check your connection and try again.";

/// Normalized wire payload for the waitlist collaborator.
///
/// Email is lowercased and the goal map is flattened into one boolean per
/// enumerated goal, matching the collaborator's expected shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitlistPayload {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub debt: bool,
    #[serde(default)]
    pub loan: bool,
    #[serde(default)]
    pub savings: bool,
    #[serde(default)]
    pub automate: bool,
}

impl WaitlistPayload {
    pub fn from_form(form: &FormState) -> Self {
        Self {
            email: form.email.trim().to_lowercase(),
            first_name: form.first_name.trim().to_string(),
            last_name: form.last_name.trim().to_string(),
            debt: form.goals.is_selected(Goal::Debt),
            loan: form.goals.is_selected(Goal::Loan),
            savings: form.goals.is_selected(Goal::Savings),
            automate: form.goals.is_selected(Goal::Automate),
        }
    }

    pub const fn goal(&self, goal: Goal) -> bool {
        match goal {
            Goal::Debt => self.debt,
            Goal::Loan => self.loan,
            Goal::Savings => self.savings,
            Goal::Automate => self.automate,
        }
    }
}

/// Failure vocabulary the controller consumes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// The collaborator answered and turned the entry down (e.g. duplicate
    /// email). Carries the user-facing message verbatim.
    #[error("{0}")]
    Rejected(String),
    /// Pure transport fault; the collaborator never answered.
    #[error("{0}")]
    Transport(String),
}

impl SubmitError {
    pub fn message(&self) -> &str {
        match self {
            SubmitError::Rejected(message) | SubmitError::Transport(message) => message,
        }
    }
}

/// Sole boundary crossing to the external waitlist-registration collaborator.
///
/// Implementations make no idempotency promise: re-invoking with the same
/// payload after a failure is a new, independent attempt, and duplicate
/// detection is entirely the collaborator's job (keyed by lowercase email).
#[async_trait]
pub trait WaitlistClient: Send + Sync {
    /// Returns the collaborator's success message, or the mapped failure.
    async fn submit(&self, payload: WaitlistPayload) -> Result<String, SubmitError>;
}

#[derive(Debug, Deserialize)]
struct SubmissionAck {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// HTTP adapter posting the payload to `{base_url}/api/waitlist`.
///
/// No client-side timeout is configured; the collaborator's own bound
/// governs an in-flight call.
#[derive(Debug, Clone)]
pub struct HttpWaitlistClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpWaitlistClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            http: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/api/waitlist", self.base_url)
    }
}

#[async_trait]
impl WaitlistClient for HttpWaitlistClient {
    async fn submit(&self, payload: WaitlistPayload) -> Result<String, SubmitError> {
        let response = self
            .http
            .post(self.endpoint())
            .json(&payload)
            .send()
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, "waitlist request could not be sent");
                SubmitError::Transport(CONNECTIVITY_MESSAGE.to_string())
            })?;

        let status = response.status();
        if status.is_success() {
            let ack: SubmissionAck = response.json().await.map_err(|err| {
                tracing::warn!(error = %err, "waitlist service returned a malformed success body");
                SubmitError::Rejected(GENERIC_REJECTION_MESSAGE.to_string())
            })?;
            Ok(ack.message)
        } else {
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.detail);
            tracing::warn!(%status, "waitlist service rejected the submission");
            Err(SubmitError::Rejected(
                detail.unwrap_or_else(|| GENERIC_REJECTION_MESSAGE.to_string()),
            ))
        }
    }
}
