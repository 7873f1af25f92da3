//! Wiring of the coordinator and the worker into a runnable whole.

pub mod config;
mod error;
pub mod local;
pub mod session;

pub use config::{Mode, SessionConfig};
pub use error::{Result, SessionError};
pub use session::SessionOutcome;
