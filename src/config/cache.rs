//! Order cache configuration.

use serde::Deserialize;
use std::time::Duration;

use super::duration;

/// How long a fetched page of orders stays fresh.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Order cache settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Lifetime of a cache entry (default: 1h).
    #[serde(default = "default_ttl", with = "duration")]
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_CACHE_TTL,
        }
    }
}

fn default_ttl() -> Duration {
    DEFAULT_CACHE_TTL
}
