use std::result;
use thiserror::Error;

/// Lookup failures surfaced to callers. The offending name is echoed
/// verbatim, untrimmed, so empty and whitespace-only names round-trip
/// into the error text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("No such job '{0}'")]
    NoSuchJob(String),
    #[error("No such view '{0}'")]
    NoSuchView(String),
}

/// Rejected state transitions and setup operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("No such job '{0}'")]
    NoSuchJob(String),
    #[error("job '{0}' already exists")]
    JobExists(String),
    #[error("view '{0}' already exists")]
    ViewExists(String),
    #[error("job is already waiting in the queue")]
    AlreadyQueued,
    #[error("a build is already in progress")]
    AlreadyRunning,
    #[error("no build is in progress")]
    NotRunning,
}

pub type LookupResult<T> = result::Result<T, LookupError>;
pub type StateResult<T> = result::Result<T, StateError>;
