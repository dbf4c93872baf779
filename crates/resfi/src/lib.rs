//! Core crate for the ResFi.ai landing page waitlist.
//!
//! The `waitlist` module holds the client-side submission subsystem (form
//! state, validation, and the submit lifecycle); `registry` is the server
//! side the submission subsystem talks to.

pub mod config;
pub mod error;
pub mod registry;
pub mod telemetry;
pub mod waitlist;
