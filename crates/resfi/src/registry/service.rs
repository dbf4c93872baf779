use std::sync::Arc;

use async_trait::async_trait;

use super::repository::{RepositoryError, WaitlistEntry, WaitlistRepository};
use crate::waitlist::{SubmitError, WaitlistClient, WaitlistPayload, GENERIC_REJECTION_MESSAGE};

/// Success message returned to every accepted submission.
pub const WELCOME_MESSAGE: &str = "Thank you for joining our waitlist!";

/// Detail string for the duplicate-email rejection.
pub const DUPLICATE_EMAIL_DETAIL: &str = "This email address is already on the waitlist";

/// Detail string for storage faults the visitor cannot do anything about.
pub const PROCESSING_ERROR_DETAIL: &str =
    "An error occurred while processing your request. Please try again later.";

/// Registration service composing normalization, duplicate rejection, and
/// storage behind [`WaitlistRepository`].
pub struct WaitlistService<R> {
    repository: Arc<R>,
}

impl<R> Clone for WaitlistService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("{DUPLICATE_EMAIL_DETAIL}")]
    Duplicate,
    #[error("email, first name, and last name are required")]
    MissingField,
    #[error(transparent)]
    Repository(RepositoryError),
}

impl<R> WaitlistService<R>
where
    R: WaitlistRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Accept one submission. Emails are lowercased before the duplicate
    /// check so `A@X.com` and `a@x.com` key the same entry.
    pub fn register(&self, payload: WaitlistPayload) -> Result<WaitlistEntry, RegistrationError> {
        let mut payload = payload;
        payload.email = payload.email.trim().to_lowercase();
        payload.first_name = payload.first_name.trim().to_string();
        payload.last_name = payload.last_name.trim().to_string();

        if payload.email.is_empty() || payload.first_name.is_empty() || payload.last_name.is_empty()
        {
            return Err(RegistrationError::MissingField);
        }

        let entry = self.repository.insert(payload).map_err(|err| match err {
            RepositoryError::Duplicate => RegistrationError::Duplicate,
            other => RegistrationError::Repository(other),
        })?;

        tracing::info!(email = %entry.email, id = entry.id, "added entry to waitlist");
        Ok(entry)
    }

    pub fn entries(&self) -> Result<Vec<WaitlistEntry>, RegistrationError> {
        self.repository.all().map_err(RegistrationError::Repository)
    }

    pub fn count(&self) -> Result<usize, RegistrationError> {
        self.repository
            .count()
            .map_err(RegistrationError::Repository)
    }
}

/// In-process adapter so a [`crate::waitlist::SubmissionController`] can run
/// straight against the registry (demos, tests) without an HTTP hop.
#[async_trait]
impl<R> WaitlistClient for WaitlistService<R>
where
    R: WaitlistRepository + 'static,
{
    async fn submit(&self, payload: WaitlistPayload) -> Result<String, SubmitError> {
        match self.register(payload) {
            Ok(_) => Ok(WELCOME_MESSAGE.to_string()),
            Err(err @ (RegistrationError::Duplicate | RegistrationError::MissingField)) => {
                Err(SubmitError::Rejected(err.to_string()))
            }
            Err(RegistrationError::Repository(err)) => {
                tracing::error!(error = %err, "waitlist storage fault during in-process submit");
                Err(SubmitError::Rejected(GENERIC_REJECTION_MESSAGE.to_string()))
            }
        }
    }
}
