use super::types::ServerConfig;
use std::fs;
use std::path::Path;

impl ServerConfig {
    /// Load configuration from a TOML file.
    ///
    /// Note: environment overrides are applied separately via
    /// `apply_env_overrides()`; call `finalize()` afterwards.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;

        let config: ServerConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))?;

        Ok(config)
    }

    /// Validate configuration after environment overrides are applied.
    pub fn finalize(&self) -> anyhow::Result<()> {
        self.validate()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            return Err(anyhow::anyhow!("Server port cannot be 0"));
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_levels.join(", ")
            ));
        }

        let valid_formats = ["compact", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_formats.join(", ")
            ));
        }

        for (target, level) in &self.logging.targets {
            if !valid_levels.contains(&level.as_str()) {
                return Err(anyhow::anyhow!(
                    "Invalid log level '{}' for target '{}'. Must be one of: {}",
                    level,
                    target,
                    valid_levels.join(", ")
                ));
            }
        }

        if !(4..=31).contains(&self.auth.bcrypt_cost) {
            return Err(anyhow::anyhow!(
                "bcrypt_cost must be between 4 and 31, got {}",
                self.auth.bcrypt_cost
            ));
        }

        if self.auth.min_username_length == 0 {
            return Err(anyhow::anyhow!("min_username_length cannot be 0"));
        }

        if self.auth.min_password_length == 0 {
            return Err(anyhow::anyhow!("min_password_length cannot be 0"));
        }

        if self.auth.min_password_length > self.auth.max_password_length {
            return Err(anyhow::anyhow!(
                "min_password_length ({}) cannot exceed max_password_length ({})",
                self.auth.min_password_length,
                self.auth.max_password_length
            ));
        }

        if self.session.ttl_hours <= 0 {
            return Err(anyhow::anyhow!("session ttl_hours must be positive"));
        }

        // No built-in secret exists: refusing to start beats signing cookies
        // with a value every deployment shares.
        match &self.session.secret {
            Some(secret) if !secret.trim().is_empty() => {}
            _ => {
                return Err(anyhow::anyhow!(
                    "Session secret is not configured. Set [session] secret in config.toml \
                     or the SKYCAST_SESSION_SECRET environment variable"
                ));
            }
        }

        if self.rate_limit.enabled && self.rate_limit.max_auth_attempts_per_min == 0 {
            return Err(anyhow::anyhow!(
                "max_auth_attempts_per_min cannot be 0 while rate limiting is enabled"
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_secret() -> ServerConfig {
        let mut config = ServerConfig::default();
        config.session.secret = Some("unit-test-secret".to_string());
        config
    }

    #[test]
    fn test_default_config_with_secret_is_valid() {
        assert!(config_with_secret().validate().is_ok());
    }

    #[test]
    fn test_missing_secret_is_rejected() {
        let config = ServerConfig::default();
        assert!(config.validate().is_err());

        let mut config = config_with_secret();
        config.session.secret = Some("   ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_port() {
        let mut config = config_with_secret();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = config_with_secret();
        config.logging.level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bcrypt_cost_bounds() {
        let mut config = config_with_secret();
        config.auth.bcrypt_cost = 3;
        assert!(config.validate().is_err());
        config.auth.bcrypt_cost = 32;
        assert!(config.validate().is_err());
        config.auth.bcrypt_cost = 12;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal_toml() {
        let toml_src = r#"
            [server]
            port = 8080

            [session]
            secret = "from-file"
        "#;
        let config: ServerConfig = toml::from_str(toml_src).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.session.secret.as_deref(), Some("from-file"));
        assert_eq!(config.auth.bcrypt_cost, 12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_users_file_path() {
        let config = ServerConfig::default();
        assert!(config.storage.users_file().ends_with("users.json"));
    }
}
