// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `nclogin` Flow
//!
//! Browser-delegated login: start a login session on the server, show the
//! user a URL to open, and poll until they finish logging in.
//!
//! ## Components
//!
//! - [`initiator::SessionInitiator`] - One-shot handshake yielding a [`LoginSession`]
//! - [`scheduler::PollScheduler`] - Adaptive-interval poll loop with debounce
//! - [`trigger::TriggerSource`] - Turns input lines into "poll now" requests
//! - [`gate::CompletionGate`] - Delivers exactly one terminal result
//! - [`flow::LoginFlow`] - Wires the above together under one cancellation scope
//!
//! ## HTTP
//!
//! - [`api::LoginApi`] - The two requests of the flow
//! - [`client::HttpLoginApi`] - reqwest implementation with an explicit client
//!
//! [`LoginSession`]: nclogin_core::LoginSession

pub mod api;
pub mod client;
pub mod error;
pub mod flow;
pub mod gate;
pub mod initiator;
pub mod prompt;
pub mod scheduler;
pub mod settings;
pub mod trigger;

#[cfg(test)]
mod testing;

// Re-export key types at crate root

pub use api::{LoginApi, PollStatus};
pub use client::HttpLoginApi;
pub use error::{AuthError, Stage};
pub use flow::{LoginFlow, authenticate};
pub use gate::{AuthResult, CompletionGate, GateWaiter};
pub use initiator::SessionInitiator;
pub use prompt::Prompter;
pub use scheduler::{PollScheduler, SchedulerExit};
pub use settings::{DEFAULT_SCHEME, FlowSettings, FlowSettingsBuilder};
pub use trigger::{InputAction, RESERVED_COMMAND, TriggerExit, TriggerSource};

// Re-export the cancellation scope type callers pass in
pub use tokio_util::sync::CancellationToken;

// Re-export core types that appear in this crate's API
pub use nclogin_core::{Credentials, LoginSession};
