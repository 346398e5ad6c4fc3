//! Configuration loading and validation for the order client.
//!
//! Uses serde_yaml to load YAML configuration files, with the API
//! credentials taken from environment variables.

mod api;
mod app;
mod cache;
mod duration;
mod error;
mod stats;

pub use api::ApiConfig;
pub use app::AppConfig;
pub use cache::CacheConfig;
pub use error::ConfigError;
pub use stats::StatsConfig;

use serde::Deserialize;
use std::{env, fs};

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "TINDIE_API_KEY";

/// Environment variable overriding `api.username`.
pub const USERNAME_ENV: &str = "TINDIE_USERNAME";

/// Root configuration structure.
///
/// Required sections: app, api.
/// Optional sections: cache, stats.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Application-level settings like name and environment.
    pub app: AppConfig,
    /// Order API endpoint, credentials and pagination.
    pub api: ApiConfig,
    /// Order cache expiry (optional).
    #[serde(default)]
    pub cache: CacheConfig,
    /// Rolling statistics window (optional).
    #[serde(default)]
    pub stats: StatsConfig,
}

impl Config {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Loads `.env` first (if present), then the YAML file, then
    /// credentials from `TINDIE_API_KEY` and `TINDIE_USERNAME`.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let content = fs::read_to_string(path)?;
        let mut config = Self::from_yaml(&content)?;

        config.load_credentials_from_env();
        config.validate()?;

        Ok(config)
    }

    /// Parse configuration from a YAML string without touching the environment.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    fn load_credentials_from_env(&mut self) {
        self.api.api_key = env::var(API_KEY_ENV).unwrap_or_default();
        if let Ok(username) = env::var(USERNAME_ENV) {
            if !username.is_empty() {
                self.api.username = username;
            }
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.app.name.is_empty() {
            return Err(ConfigError::Validation("app.name is required".into()));
        }

        if self.api.username.is_empty() {
            return Err(ConfigError::Validation(format!(
                "api.username is required (or set {})",
                USERNAME_ENV
            )));
        }

        if self.api.page_size == 0 {
            return Err(ConfigError::Validation(
                "api.page_size must be positive".into(),
            ));
        }

        if self.cache.ttl.is_zero() {
            return Err(ConfigError::Validation("cache.ttl must be positive".into()));
        }

        if self.stats.limit == 0 {
            return Err(ConfigError::Validation(
                "stats.limit must be positive".into(),
            ));
        }

        if self.app.is_production() && self.api.api_key.is_empty() {
            return Err(ConfigError::MissingCredential(API_KEY_ENV));
        }

        Ok(())
    }
}
