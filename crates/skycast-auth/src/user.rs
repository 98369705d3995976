//! User record model

use serde::{Deserialize, Serialize};

/// A registered user as persisted in the credential store.
///
/// Records are immutable once created: the store supports load and append
/// only, no update or delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique username, stored trimmed and HTML-escaped
    pub username: String,
    /// Unique email, stored trimmed and lowercased
    pub email: String,
    /// Bcrypt hash of the password (salt embedded in the hash string)
    pub password_hash: String,
    /// Creation timestamp, UTC milliseconds
    #[serde(default)]
    pub created_at: i64,
}

impl User {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}
