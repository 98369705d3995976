//! Signup request model

use super::login_request::{validate_password_length, validate_username_length};
use serde::Deserialize;

/// Maximum email length per RFC 5321
const MAX_EMAIL_LENGTH: usize = 254;

/// Signup form body. Length caps here only bound the request size; the
/// actual validation rules live in `skycast_auth::validation`.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(deserialize_with = "validate_username_length")]
    pub username: String,
    #[serde(deserialize_with = "validate_email_length")]
    pub email: String,
    #[serde(deserialize_with = "validate_password_length")]
    pub password: String,
}

fn validate_email_length<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    if s.len() > MAX_EMAIL_LENGTH {
        return Err(serde::de::Error::custom(format!(
            "email exceeds maximum length of {} characters",
            MAX_EMAIL_LENGTH
        )));
    }
    Ok(s)
}
