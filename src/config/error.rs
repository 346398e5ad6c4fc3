//! Configuration error types.

use thiserror::Error;

/// Configuration loading error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read order client config file: {0}")]
    ReadFile(#[from] std::io::Error),
    #[error("invalid order client config YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Tindie API credential missing: set {0} in the environment or .env")]
    MissingCredential(&'static str),
    #[error("invalid order client config: {0}")]
    Validation(String),
}
