//! Credential store: durable collection of registered users.
//!
//! The file-backed implementation keeps all records in a single JSON array
//! (`users.json`). `append` re-reads the file, checks uniqueness against that
//! freshly loaded state, and rewrites the file atomically, all under an async
//! mutex — two concurrent signups cannot both pass the uniqueness check.

use crate::error::{AuthError, AuthResult};
use crate::user::User;
use std::io::ErrorKind;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Abstraction over user persistence for the signup and login flows.
#[async_trait::async_trait]
pub trait CredentialStore: Send + Sync {
    /// Return all registered users. A store that does not exist yet is empty,
    /// not an error; an unreadable or unparsable store is `AuthError::Storage`.
    async fn load(&self) -> AuthResult<Vec<User>>;

    /// Find a user by exact username match.
    async fn find_by_username(&self, username: &str) -> AuthResult<Option<User>>;

    /// Append a new user record. Fails with `DuplicateUsername` or
    /// `DuplicateEmail` if either value is already registered.
    async fn append(&self, user: User) -> AuthResult<()>;
}

/// JSON-file credential store.
pub struct FileCredentialStore {
    path: PathBuf,
    /// Serializes load + uniqueness check + rewrite (single-writer discipline)
    write_lock: Mutex<()>,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_users(&self) -> AuthResult<Vec<User>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(AuthError::storage_io("failed to read credential file", e)),
        };

        serde_json::from_str(&content)
            .map_err(|e| AuthError::Storage(format!("credential file is not valid JSON: {}", e)))
    }

    /// Replace the credential file contents atomically: write a temp file in
    /// the same directory, then rename it over the target.
    async fn write_users(&self, users: &[User]) -> AuthResult<()> {
        let json = serde_json::to_string_pretty(users)
            .map_err(|e| AuthError::Storage(format!("failed to serialize users: {}", e)))?;

        let path = self.path.clone();
        tokio::task::spawn_blocking(move || {
            let dir = path.parent().unwrap_or_else(|| Path::new("."));
            std::fs::create_dir_all(dir)
                .map_err(|e| AuthError::storage_io("failed to create data directory", e))?;

            let mut tmp = tempfile::NamedTempFile::new_in(dir)
                .map_err(|e| AuthError::storage_io("failed to create temp file", e))?;
            tmp.write_all(json.as_bytes())
                .map_err(|e| AuthError::storage_io("failed to write credential file", e))?;
            tmp.as_file()
                .sync_all()
                .map_err(|e| AuthError::storage_io("failed to sync credential file", e))?;
            tmp.persist(&path)
                .map_err(|e| AuthError::Storage(format!("failed to replace credential file: {}", e)))?;
            Ok(())
        })
        .await
        .map_err(|e| AuthError::Storage(format!("Task join error: {}", e)))?
    }
}

#[async_trait::async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self) -> AuthResult<Vec<User>> {
        self.read_users().await
    }

    async fn find_by_username(&self, username: &str) -> AuthResult<Option<User>> {
        let users = self.read_users().await?;
        Ok(users.into_iter().find(|u| u.username == username))
    }

    async fn append(&self, user: User) -> AuthResult<()> {
        let _guard = self.write_lock.lock().await;

        // Uniqueness runs against the state read under the lock, immediately
        // before the rewrite. Username first, then email.
        let mut users = self.read_users().await?;
        if users.iter().any(|u| u.username == user.username) {
            return Err(AuthError::DuplicateUsername);
        }
        if users.iter().any(|u| u.email == user.email) {
            return Err(AuthError::DuplicateEmail);
        }

        users.push(user);
        self.write_users(&users).await
    }
}
