use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub polling: PollingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the admin REST backend.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request transport timeout. The store itself imposes no deadline on
    /// an aggregate load; a slow endpoint is bounded only here.
    #[serde(default = "default_request_timeout")]
    pub timeout_secs: u64,

    /// `limit` query value for the recent-activity endpoint.
    #[serde(default = "default_activity_limit")]
    pub activity_limit: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PollingConfig {
    /// Seconds between automatic refreshes while the poller is running.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,

    /// Seconds a cached sub-response stays valid.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,

    /// When true, timer-driven refreshes update data without raising the
    /// loading flag, so a subscribed view does not flash a spinner.
    #[serde(default = "default_background_refresh")]
    pub background_refresh: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:3000/api".to_string()
}
fn default_request_timeout() -> u64 {
    30
}
fn default_activity_limit() -> u32 {
    10
}
fn default_refresh_interval() -> u64 {
    60
}
fn default_cache_ttl() -> u64 {
    30
}
fn default_background_refresh() -> bool {
    true
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_request_timeout(),
            activity_limit: default_activity_limit(),
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval(),
            cache_ttl_secs: default_cache_ttl(),
            background_refresh: default_background_refresh(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. config/default.toml - base configuration with defaults
    /// 2. config/local.toml - local overrides (optional, not in git)
    /// 3. Environment variables with BOTVJ__ prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("BOTVJ").separator("__"))
            .build()?;

        let cfg: Self = config.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }

    /// Load configuration for testing with custom overrides.
    ///
    /// Builds entirely from embedded defaults and overrides, without touching
    /// the file system.
    #[cfg(test)]
    pub fn load_for_test(overrides: &[(&str, &str)]) -> Result<Self, config::ConfigError> {
        let defaults = r#"
            [api]
            base_url = "http://localhost:3000/api"
            timeout_secs = 30
            activity_limit = 10

            [polling]
            refresh_interval_secs = 60
            cache_ttl_secs = 30
            background_refresh = true

            [logging]
            level = "info"
            format = "pretty"
        "#;

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(defaults, config::FileFormat::Toml));

        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.api.base_url.is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "api.base_url must not be empty".to_string(),
            ));
        }

        if self.polling.refresh_interval_secs == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "polling.refresh_interval_secs cannot be 0".to_string(),
            ));
        }

        if self.api.timeout_secs == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "api.timeout_secs cannot be 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_load_with_defaults() {
        let config = Config::load_for_test(&[]).expect("Failed to load config");

        assert_eq!(config.api.base_url, "http://localhost:3000/api");
        assert_eq!(config.polling.refresh_interval_secs, 60);
        assert_eq!(config.polling.cache_ttl_secs, 30);
        assert!(config.polling.background_refresh);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_config_override() {
        let config = Config::load_for_test(&[
            ("api.base_url", "https://panel.botvj.app/api"),
            ("polling.refresh_interval_secs", "120"),
            ("logging.level", "debug"),
        ])
        .expect("Failed to load config");

        assert_eq!(config.api.base_url, "https://panel.botvj.app/api");
        assert_eq!(config.polling.refresh_interval_secs, 120);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_config_validation_empty_base_url() {
        let config = Config::load_for_test(&[("api.base_url", "")]).expect("Failed to load config");
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("base_url"));
    }

    #[test]
    fn test_config_validation_zero_interval() {
        let config = Config::load_for_test(&[("polling.refresh_interval_secs", "0")])
            .expect("Failed to load config");
        let result = config.validate();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("refresh_interval_secs"));
    }
}
