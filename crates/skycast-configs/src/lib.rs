// Skycast configuration library
// Provides the ServerConfig TOML model, defaults, loading, and env overrides.

pub mod config;

pub use config::{
    AuthSettings, LoggingSettings, RateLimitSettings, ServerConfig, ServerSettings,
    SessionSettings, StorageSettings,
};
