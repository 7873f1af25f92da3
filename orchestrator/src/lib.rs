//! The coordinator role: drives the training and inference schedule over the
//! mailbox and presents the results.

pub mod configs;
mod coordinator;
pub mod error;
mod events;

pub use configs::TrainingConfig;
pub use coordinator::Coordinator;
pub use error::{OrchestratorError, Result};
pub use events::{Summary, TrainingEvent};
