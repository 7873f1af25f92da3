use std::{error::Error, fmt, io};

use orchestrator::OrchestratorError;
use tokio::task::JoinError;
use worker::WorkerErr;

/// The result type of the session and local runners.
pub type Result<T> = std::result::Result<T, SessionError>;

/// Failures of a whole run, wrapping the ones of each role.
#[derive(Debug)]
pub enum SessionError {
    InvalidConfig(String),
    Io(io::Error),
    Json(serde_json::Error),
    Worker(WorkerErr),
    Orchestrator(OrchestratorError),
    Join(JoinError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Self::Io(e) => write!(f, "io error: {e}"),
            Self::Json(e) => write!(f, "malformed config: {e}"),
            Self::Worker(e) => write!(f, "worker failed: {e}"),
            Self::Orchestrator(e) => write!(f, "coordinator failed: {e}"),
            Self::Join(e) => write!(f, "role thread failed: {e}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidConfig(_) => None,
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Worker(e) => Some(e),
            Self::Orchestrator(e) => Some(e),
            Self::Join(e) => Some(e),
        }
    }
}

impl From<io::Error> for SessionError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<WorkerErr> for SessionError {
    fn from(e: WorkerErr) -> Self {
        Self::Worker(e)
    }
}

impl From<OrchestratorError> for SessionError {
    fn from(e: OrchestratorError) -> Self {
        Self::Orchestrator(e)
    }
}

impl From<JoinError> for SessionError {
    fn from(e: JoinError) -> Self {
        Self::Join(e)
    }
}
