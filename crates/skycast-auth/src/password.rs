// Password hashing and verification module

use crate::error::{AuthError, AuthResult};
use bcrypt::{hash, verify, DEFAULT_COST};
use std::sync::OnceLock;

/// Bcrypt cost factor for password hashing.
/// Higher values = more secure but slower. Default: 12.
pub const BCRYPT_COST: u32 = DEFAULT_COST;

/// Input the process-wide dummy hash is derived from. Never a valid login:
/// dummy verification always reports failure.
const DUMMY_HASH_INPUT: &str = "skycast.dummy.credential";

/// Dummy bcrypt hash, computed once per process (cost fixed on first use).
static DUMMY_HASH: OnceLock<String> = OnceLock::new();

/// Hash a password using bcrypt.
///
/// Runs on the blocking thread pool to avoid stalling the async runtime.
///
/// # Arguments
/// * `password` - Plain text password to hash
/// * `cost` - Optional bcrypt cost (defaults to BCRYPT_COST)
///
/// # Errors
/// Returns `AuthError::Hashing` if bcrypt fails
pub async fn hash_password(password: &str, cost: Option<u32>) -> AuthResult<String> {
    let password = password.to_string();
    let cost = cost.unwrap_or(BCRYPT_COST);

    tokio::task::spawn_blocking(move || {
        hash(password, cost).map_err(|e| AuthError::Hashing(e.to_string()))
    })
    .await
    .map_err(|e| AuthError::Hashing(format!("Task join error: {}", e)))?
}

/// Verify a password against a bcrypt hash.
///
/// Runs on the blocking thread pool to avoid stalling the async runtime.
///
/// # Returns
/// `Ok(true)` if the password matches, `Ok(false)` if not
///
/// # Errors
/// Returns `AuthError::Hashing` if bcrypt verification fails
pub async fn verify_password(password: &str, hash: &str) -> AuthResult<bool> {
    let password = password.to_string();
    let hash = hash.to_string();

    tokio::task::spawn_blocking(move || {
        verify(password, &hash).map_err(|e| AuthError::Hashing(e.to_string()))
    })
    .await
    .map_err(|e| AuthError::Hashing(format!("Task join error: {}", e)))?
}

/// Compute the dummy hash ahead of the first login attempt.
///
/// Called once during server bootstrap; without it the first unknown-user
/// login would pay hash plus verify and stand out in response timing.
pub async fn warm_dummy_hash(cost: u32) -> AuthResult<()> {
    tokio::task::spawn_blocking(move || {
        let dummy = DUMMY_HASH.get_or_init(|| hash(DUMMY_HASH_INPUT, cost).unwrap_or_default());
        if dummy.is_empty() {
            return Err(AuthError::Hashing("dummy hash unavailable".to_string()));
        }
        Ok(())
    })
    .await
    .map_err(|e| AuthError::Hashing(format!("Task join error: {}", e)))?
}

/// Run a bcrypt verification against a fixed dummy hash.
///
/// Called on login when the username does not exist, so that the unknown-user
/// path costs one bcrypt verification just like the known-user path and
/// response timing does not reveal whether a username is registered.
///
/// Always returns `Ok(false)`.
pub async fn verify_dummy_password(password: &str, cost: u32) -> AuthResult<bool> {
    let password = password.to_string();

    tokio::task::spawn_blocking(move || {
        let dummy = DUMMY_HASH.get_or_init(|| {
            hash(DUMMY_HASH_INPUT, cost).unwrap_or_default()
        });
        if dummy.is_empty() {
            // Hashing the fixed input failed; nothing left to compare against.
            return Err(AuthError::Hashing("dummy hash unavailable".to_string()));
        }
        verify(password, dummy)
            .map(|_| false)
            .map_err(|e| AuthError::Hashing(e.to_string()))
    })
    .await
    .map_err(|e| AuthError::Hashing(format!("Task join error: {}", e)))?
}
