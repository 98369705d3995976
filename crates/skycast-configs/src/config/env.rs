//! Environment variable overrides.
//!
//! Deployment-sensitive values (listen address, session secret, cookie
//! security, data directory) can be supplied without editing config.toml.

use super::types::ServerConfig;
use std::env;

impl ServerConfig {
    /// Apply environment variable overrides on top of file/default values.
    ///
    /// Recognized variables:
    /// - `SKYCAST_HOST`
    /// - `SKYCAST_PORT`
    /// - `SKYCAST_SESSION_SECRET`
    /// - `SKYCAST_COOKIE_SECURE` ("true"/"false")
    /// - `SKYCAST_DATA_PATH`
    pub fn apply_env_overrides(&mut self) -> anyhow::Result<()> {
        if let Ok(host) = env::var("SKYCAST_HOST") {
            if !host.trim().is_empty() {
                self.server.host = host;
            }
        }

        if let Ok(port) = env::var("SKYCAST_PORT") {
            self.server.port = port
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid SKYCAST_PORT '{}': {}", port, e))?;
        }

        if let Ok(secret) = env::var("SKYCAST_SESSION_SECRET") {
            if !secret.trim().is_empty() {
                self.session.secret = Some(secret);
            }
        }

        if let Ok(secure) = env::var("SKYCAST_COOKIE_SECURE") {
            self.session.cookie_secure = secure
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid SKYCAST_COOKIE_SECURE '{}': {}", secure, e))?;
        }

        if let Ok(path) = env::var("SKYCAST_DATA_PATH") {
            if !path.trim().is_empty() {
                self.storage.data_path = path;
            }
        }

        Ok(())
    }
}
