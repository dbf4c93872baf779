use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::waitlist::WaitlistPayload;

/// Stored waitlist record. Uniqueness is keyed by the lowercase email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitlistEntry {
    pub id: u64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub debt: bool,
    pub loan: bool,
    pub savings: bool,
    pub automate: bool,
    pub created_at: DateTime<Utc>,
}

impl WaitlistEntry {
    /// Build the stored record from an accepted payload. The caller has
    /// already normalized the email.
    pub fn from_payload(id: u64, payload: WaitlistPayload, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            email: payload.email,
            first_name: payload.first_name,
            last_name: payload.last_name,
            debt: payload.debt,
            loan: payload.loan,
            savings: payload.savings,
            automate: payload.automate,
            created_at,
        }
    }
}

/// Storage abstraction so the registration service never depends on a
/// concrete backend; swap in a real database or a test double freely.
pub trait WaitlistRepository: Send + Sync {
    /// Persist a normalized payload, assigning id and timestamp. Must reject
    /// a second entry with the same email.
    fn insert(&self, payload: WaitlistPayload) -> Result<WaitlistEntry, RepositoryError>;
    fn all(&self) -> Result<Vec<WaitlistEntry>, RepositoryError>;
    fn count(&self) -> Result<usize, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("entry already exists")]
    Duplicate,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
