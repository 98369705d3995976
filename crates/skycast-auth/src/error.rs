use crate::validation::FieldError;
use thiserror::Error;

/// Errors produced by the authentication subsystem.
#[derive(Debug, Error)]
pub enum AuthError {
    /// One or more signup fields violated the validation rules.
    /// Every violated rule is reported, not just the first.
    #[error("validation failed: {} field error(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("Username already taken.")]
    DuplicateUsername,

    #[error("Email already registered.")]
    DuplicateEmail,

    /// Bad credentials. The message is deliberately generic: callers must not
    /// reveal whether the username or the password was wrong.
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("password hashing failed: {0}")]
    Hashing(String),

    /// Credential file unreadable, unwritable, or unparsable.
    #[error("credential store error: {0}")]
    Storage(String),
}

pub type AuthResult<T> = Result<T, AuthError>;

impl AuthError {
    pub(crate) fn storage_io(context: &str, err: std::io::Error) -> Self {
        AuthError::Storage(format!("{}: {}", context, err))
    }
}
