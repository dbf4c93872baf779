//! Waitlist submission subsystem backing the landing page form.
//!
//! One `SubmissionController` instance backs one rendered form. The
//! presentation shell owns layout and styling only: it reads the current
//! `SubmissionStatus` and `FormState` each render tick, forwards field edits
//! and goal toggles back to the controller, and drains the notification
//! queue for transient toasts.

pub mod client;
pub mod controller;
pub mod form;
pub mod goals;
pub mod notify;
pub mod validate;

pub use client::{
    HttpWaitlistClient, SubmitError, WaitlistClient, WaitlistPayload, CONNECTIVITY_MESSAGE,
    GENERIC_REJECTION_MESSAGE,
};
pub use controller::{SubmissionController, SubmissionStatus, RESET_DELAY};
pub use form::FormState;
pub use goals::{Goal, GoalSelection};
pub use notify::{Notification, NotificationLevel, NotificationQueue, Notifier};
pub use validate::{validate, ValidationError};
