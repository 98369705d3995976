//! Signed session tokens.
//!
//! A token is `{id}.{signature}` where `id` is 32 CSPRNG bytes hex-encoded
//! and `signature` is HMAC-SHA256 of the id under the server's session
//! secret. The store only ever sees ids whose signature verified, so a
//! forged cookie cannot probe the session table.

use crate::error::SessionError;
use hmac::{Hmac, Mac};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Length of the random session id in bytes (64 hex chars on the wire).
const SESSION_ID_BYTES: usize = 32;

/// Issues and verifies signed session tokens.
#[derive(Clone)]
pub struct TokenSigner {
    key: Vec<u8>,
}

impl TokenSigner {
    pub fn new(secret: &str) -> Self {
        Self {
            key: secret.as_bytes().to_vec(),
        }
    }

    /// Generate a fresh session id and its signed wire form.
    ///
    /// Returns `(id, token)`; the id keys the session table, the token goes
    /// into the cookie.
    pub fn issue(&self) -> (String, String) {
        let mut bytes = [0u8; SESSION_ID_BYTES];
        OsRng.fill_bytes(&mut bytes);
        let id = hex::encode(bytes);
        let token = format!("{}.{}", id, self.sign(&id));
        (id, token)
    }

    /// Verify a token from a cookie and return the embedded session id.
    ///
    /// # Errors
    /// Returns `SessionError::InvalidToken` on malformed input or signature
    /// mismatch. Verification is constant-time.
    pub fn verify(&self, token: &str) -> Result<String, SessionError> {
        let (id, signature) = token.split_once('.').ok_or(SessionError::InvalidToken)?;
        if id.is_empty() || signature.is_empty() {
            return Err(SessionError::InvalidToken);
        }

        let signature = hex::decode(signature).map_err(|_| SessionError::InvalidToken)?;

        let mut mac = HmacSha256::new_from_slice(&self.key).map_err(|_| SessionError::InvalidToken)?;
        mac.update(id.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| SessionError::InvalidToken)?;

        Ok(id.to_string())
    }

    fn sign(&self, id: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(&self.key).expect("HMAC accepts any key length");
        mac.update(id.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}
