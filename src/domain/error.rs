use thiserror::Error;

/// Failure taxonomy for car management operations.
///
/// `NotFound` and `Validation` are client-facing; `Storage` is a server
/// fault carrying the underlying message for diagnostics. Notification
/// delivery failures never appear here: the service logs and swallows
/// them, so they cannot change an operation's outcome.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("car not found: id {0}")]
    NotFound(i64),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("storage failure: {0}")]
    Storage(#[from] anyhow::Error),
}
