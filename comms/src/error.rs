use std::{
    error::Error,
    fmt::{self, Display},
};

/// The result type used in the entire comms module.
pub type Result<T> = std::result::Result<T, CommsErr>;

/// The comms module's error type.
///
/// Polling never times out, so the only way a wait ends without the awaited
/// value is an external cancellation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommsErr {
    Cancelled,
    UnexpectedRequest { expected: &'static str, got: u64 },
    MissingAnnouncement,
}

impl Display for CommsErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommsErr::Cancelled => write!(f, "polling was cancelled"),
            CommsErr::UnexpectedRequest { expected, got } => {
                write!(f, "expected a {expected} request, got word {got}")
            }
            CommsErr::MissingAnnouncement => {
                write!(f, "the worker signalled readiness without sharing anything")
            }
        }
    }
}

impl Error for CommsErr {}
