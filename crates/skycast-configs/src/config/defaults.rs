//! Default values for configuration fields.

use std::collections::HashMap;

pub(crate) fn default_true() -> bool {
    true
}

pub(crate) fn default_host() -> String {
    "127.0.0.1".to_string()
}

pub(crate) fn default_port() -> u16 {
    3000
}

pub(crate) fn default_workers() -> usize {
    0 // 0 = one worker per CPU core
}

pub(crate) fn default_data_path() -> String {
    "./data".to_string()
}

pub(crate) fn default_static_path() -> String {
    "./static".to_string()
}

pub(crate) fn default_log_level() -> String {
    "info".to_string()
}

pub(crate) fn default_logs_path() -> String {
    "./logs".to_string()
}

pub(crate) fn default_log_format() -> String {
    "compact".to_string()
}

pub(crate) fn default_log_targets() -> HashMap<String, String> {
    HashMap::new()
}

/// Bcrypt cost 12 takes well over 100ms per hash on commodity hardware.
pub(crate) fn default_bcrypt_cost() -> u32 {
    12
}

pub(crate) fn default_min_username_length() -> usize {
    3
}

pub(crate) fn default_min_password_length() -> usize {
    6
}

/// Bcrypt only reads the first 72 bytes of input.
pub(crate) fn default_max_password_length() -> usize {
    72
}

pub(crate) fn default_session_ttl_hours() -> i64 {
    24
}

pub(crate) fn default_rate_limit_enabled() -> bool {
    true
}

pub(crate) fn default_max_auth_attempts_per_min() -> u32 {
    20
}
