//! Server side of the waitlist: storage abstraction, registration service,
//! and the HTTP routes the landing page posts to.

pub mod repository;
pub mod router;
pub mod service;

pub use repository::{RepositoryError, WaitlistEntry, WaitlistRepository};
pub use router::waitlist_router;
pub use service::{
    RegistrationError, WaitlistService, DUPLICATE_EMAIL_DETAIL, PROCESSING_ERROR_DETAIL,
    WELCOME_MESSAGE,
};
