use super::defaults::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Main server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub auth: AuthSettings,
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default)]
    pub rate_limit: RateLimitSettings,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Number of HTTP workers (0 = one per CPU core)
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: default_workers(),
        }
    }
}

/// Storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Base data directory; the credential file lives at {data_path}/users.json
    #[serde(default = "default_data_path")]
    pub data_path: String,
    /// Directory holding the static front-end pages
    #[serde(default = "default_static_path")]
    pub static_path: String,
}

impl StorageSettings {
    /// Path of the credential store file (data_path/users.json)
    pub fn users_file(&self) -> PathBuf {
        PathBuf::from(&self.data_path).join("users.json")
    }

    pub fn static_dir(&self) -> PathBuf {
        PathBuf::from(&self.static_path)
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            static_path: default_static_path(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Directory for log files (server.log is written here)
    #[serde(default = "default_logs_path")]
    pub logs_path: String,
    #[serde(default = "default_true")]
    pub log_to_console: bool,
    /// "compact" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Optional per-target log level overrides, e.g.
    /// [logging.targets]
    /// actix_web = "debug"
    #[serde(default = "default_log_targets")]
    pub targets: HashMap<String, String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            logs_path: default_logs_path(),
            log_to_console: true,
            format: default_log_format(),
            targets: default_log_targets(),
        }
    }
}

/// Authentication settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSettings {
    /// Bcrypt cost factor (range: 4-31)
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,

    /// Minimum username length after trimming (default: 3)
    #[serde(default = "default_min_username_length")]
    pub min_username_length: usize,

    /// Minimum password length, evaluated on the raw input (default: 6)
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,

    /// Maximum password length in bytes (default: 72, the bcrypt input limit)
    #[serde(default = "default_max_password_length")]
    pub max_password_length: usize,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            bcrypt_cost: default_bcrypt_cost(),
            min_username_length: default_min_username_length(),
            min_password_length: default_min_password_length(),
            max_password_length: default_max_password_length(),
        }
    }
}

/// Session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Cookie-signing secret. Mandatory: supplied via config file or the
    /// SKYCAST_SESSION_SECRET environment variable. There is no default.
    #[serde(default)]
    pub secret: Option<String>,

    /// Session inactivity expiry in hours (default: 24)
    #[serde(default = "default_session_ttl_hours")]
    pub ttl_hours: i64,

    /// Whether the session cookie requires HTTPS. Defaults to false so plain
    /// HTTP works for local development; set to true behind TLS.
    #[serde(default)]
    pub cookie_secure: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            secret: None,
            ttl_hours: default_session_ttl_hours(),
            cookie_secure: false,
        }
    }
}

/// Rate limiter settings for the auth endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitSettings {
    #[serde(default = "default_rate_limit_enabled")]
    pub enabled: bool,

    /// Maximum signup/login attempts per IP per minute (default: 20)
    #[serde(default = "default_max_auth_attempts_per_min")]
    pub max_auth_attempts_per_min: u32,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            enabled: default_rate_limit_enabled(),
            max_auth_attempts_per_min: default_max_auth_attempts_per_min(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            server: ServerSettings::default(),
            storage: StorageSettings::default(),
            logging: LoggingSettings::default(),
            auth: AuthSettings::default(),
            session: SessionSettings::default(),
            rate_limit: RateLimitSettings::default(),
        }
    }
}
