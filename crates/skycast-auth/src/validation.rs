//! Signup input validation and normalization.
//!
//! All rules are evaluated; a failing submission reports every violated rule,
//! not just the first. Usernames are trimmed and HTML-escaped before storage,
//! emails are trimmed and lowercased. Passwords are checked on the raw input
//! and never normalized.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Simplified RFC 5322 shape: one '@', no whitespace, dotted domain.
const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is valid"))
}

/// A single violated validation rule, reported to the client.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Raw, untrusted signup fields as submitted by the client.
#[derive(Debug, Clone)]
pub struct SignupInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Length policy for signup validation, taken from `AuthSettings`.
#[derive(Debug, Clone, Copy)]
pub struct ValidationPolicy {
    pub min_username_length: usize,
    pub min_password_length: usize,
    pub max_password_length: usize,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            min_username_length: 3,
            min_password_length: 6,
            max_password_length: 72,
        }
    }
}

/// Signup fields after validation and normalization, safe to store.
/// The password is still plaintext; it is hashed by the caller.
#[derive(Debug, Clone)]
pub struct ValidatedSignup {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Validate and normalize raw signup input.
///
/// # Errors
/// Returns the full list of violated rules if any field fails.
pub fn validate_signup(
    input: &SignupInput,
    policy: &ValidationPolicy,
) -> Result<ValidatedSignup, Vec<FieldError>> {
    let mut errors = Vec::new();

    let username = input.username.trim();
    if username.chars().count() < policy.min_username_length {
        errors.push(FieldError::new(
            "username",
            format!(
                "Username must be at least {} characters long",
                policy.min_username_length
            ),
        ));
    }

    let email = input.email.trim().to_lowercase();
    if !email_regex().is_match(&email) {
        errors.push(FieldError::new("email", "Invalid email format"));
    }

    if input.password.chars().count() < policy.min_password_length {
        errors.push(FieldError::new(
            "password",
            format!(
                "Password must be at least {} characters long",
                policy.min_password_length
            ),
        ));
    }
    if input.password.len() > policy.max_password_length {
        errors.push(FieldError::new(
            "password",
            format!(
                "Password must be at most {} bytes long",
                policy.max_password_length
            ),
        ));
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ValidatedSignup {
        username: escape_html(username),
        email,
        password: input.password.clone(),
    })
}

/// Escape HTML-significant characters so stored usernames are inert when
/// echoed into markup.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            '/' => escaped.push_str("&#x2F;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
