use thiserror::Error;

/// Errors produced by the session subsystem.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Cookie value is malformed or its signature does not verify.
    #[error("invalid session token")]
    InvalidToken,

    /// Session teardown could not complete.
    #[error("session teardown failed: {0}")]
    Teardown(String),
}
