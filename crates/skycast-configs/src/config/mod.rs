mod defaults;
mod env;
mod loader;
mod types;

pub use types::{
    AuthSettings, LoggingSettings, RateLimitSettings, ServerConfig, ServerSettings,
    SessionSettings, StorageSettings,
};
