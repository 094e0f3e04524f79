//! Domain models for `nclogin`.
//!
//! ## Submodules
//!
//! - [`session`] - Login session obtained from the initiation handshake
//! - [`credentials`] - The app credentials delivered by a successful poll

mod credentials;
mod session;

pub use credentials::Credentials;
pub use session::{InitiateResponse, LoginSession, PollInfo};
