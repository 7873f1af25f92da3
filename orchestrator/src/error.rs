use std::fmt;

use comms::CommsErr;

/// The orchestrator module's result type.
pub type Result<T> = std::result::Result<T, OrchestratorError>;

/// All errors that can occur in the orchestrator.
#[derive(Debug)]
pub enum OrchestratorError {
    /// Invalid configuration, caught before anything is submitted.
    InvalidConfig(String),
    /// The mailbox failed or was cancelled.
    Comms(CommsErr),
}

impl fmt::Display for OrchestratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Self::Comms(e) => write!(f, "mailbox error: {e}"),
        }
    }
}

impl std::error::Error for OrchestratorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Comms(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CommsErr> for OrchestratorError {
    fn from(e: CommsErr) -> Self {
        Self::Comms(e)
    }
}
