//! Server-side session table.
//!
//! An explicit store mapping session id → {username, expiry}, injected into
//! request handlers rather than living in ambient framework state. Expiry is
//! evaluated lazily when a session is presented; there is no background
//! sweep.

use crate::error::SessionError;
use crate::token::TokenSigner;
use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;

/// An active session bound to a username.
///
/// The username is a weak reference into the credential store, not an
/// ownership relation.
#[derive(Debug, Clone)]
pub struct Session {
    pub username: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// The authenticated principal attached to request extensions by the
/// session guard.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub username: String,
}

/// In-memory session store with signed tokens.
pub struct SessionStore {
    signer: TokenSigner,
    ttl: Duration,
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    /// # Arguments
    /// * `secret` - Token-signing secret (externally supplied, no default)
    /// * `ttl_hours` - Session expiry relative to login
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            signer: TokenSigner::new(secret),
            ttl: Duration::hours(ttl_hours),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Create a session for a freshly authenticated user.
    ///
    /// Returns the signed token to be set as the cookie value.
    pub fn create(&self, username: &str) -> String {
        let (id, token) = self.signer.issue();
        let session = Session {
            username: username.to_string(),
            expires_at: Utc::now() + self.ttl,
        };
        self.sessions.write().insert(id, session);
        token
    }

    /// Resolve a presented token to an active session.
    ///
    /// Returns `None` for bad signatures, unknown ids, and expired sessions.
    /// Expired entries are evicted here, at access time.
    pub fn authenticate(&self, token: &str) -> Option<Session> {
        let id = self.signer.verify(token).ok()?;

        let mut sessions = self.sessions.write();
        match sessions.get(&id) {
            Some(session) if !session.is_expired() => Some(session.clone()),
            Some(_) => {
                sessions.remove(&id);
                None
            }
            None => None,
        }
    }

    /// Destroy the session a token refers to.
    ///
    /// Idempotent: destroying an unknown or already-destroyed session is not
    /// an error, and neither is a token that fails verification (the cookie
    /// is cleared by the caller regardless).
    pub fn destroy(&self, token: &str) -> Result<(), SessionError> {
        if let Ok(id) = self.signer.verify(token) {
            self.sessions.write().remove(&id);
        }
        Ok(())
    }

    /// Number of live entries, counting not-yet-evicted expired sessions.
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    #[cfg(test)]
    fn with_ttl(secret: &str, ttl: Duration) -> Self {
        Self {
            signer: TokenSigner::new(secret),
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_then_authenticate() {
        let store = SessionStore::new("test-secret", 24);
        let token = store.create("alice");

        let session = store.authenticate(&token).expect("session should be live");
        assert_eq!(session.username, "alice");
        assert!(!session.is_expired());
    }

    #[test]
    fn test_unknown_token_rejected() {
        let store = SessionStore::new("test-secret", 24);
        assert!(store.authenticate("garbage").is_none());

        // Properly signed by a different store instance with another secret
        let other = SessionStore::new("another-secret", 24);
        let token = other.create("alice");
        assert!(store.authenticate(&token).is_none());
    }

    #[test]
    fn test_destroy_removes_session() {
        let store = SessionStore::new("test-secret", 24);
        let token = store.create("alice");

        store.destroy(&token).unwrap();
        assert!(store.authenticate(&token).is_none());
        assert!(store.is_empty());

        // Idempotent
        store.destroy(&token).unwrap();
    }

    #[test]
    fn test_expired_session_evicted_on_access() {
        let store = SessionStore::with_ttl("test-secret", Duration::hours(-1));
        let token = store.create("alice");
        assert_eq!(store.len(), 1);

        assert!(store.authenticate(&token).is_none());
        assert!(store.is_empty(), "expired entry should be evicted lazily");
    }

    #[test]
    fn test_sessions_are_independent() {
        let store = SessionStore::new("test-secret", 24);
        let alice = store.create("alice");
        let bob = store.create("bob");

        store.destroy(&alice).unwrap();
        assert!(store.authenticate(&alice).is_none());
        assert_eq!(store.authenticate(&bob).unwrap().username, "bob");
    }
}
