// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `nclogin` Core
//!
//! Core types, models, and pure policy for the `nclogin` login flow.
//!
//! Nothing in this crate performs I/O. It provides:
//!
//! - Domain models (login session, credentials) and the wire shapes they
//!   are decoded from
//! - Server address normalization and endpoint construction
//! - The adaptive poll interval policy
//! - Error types
//!
//! ## Key Types
//!
//! - [`LoginSession`] - Poll token, poll endpoint and browser login URL
//! - [`Credentials`] - Server URL, login name and app password
//! - [`ServerAddress`] - A normalized server base URL
//! - [`PollInterval`] - Adaptive wait between timer-driven polls

pub mod error;
pub mod interval;
pub mod models;
pub mod server;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{Credentials, InitiateResponse, LoginSession, PollInfo};

pub use interval::PollInterval;
pub use server::{LOGIN_PATH, ServerAddress};
