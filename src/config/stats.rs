//! Rolling statistics configuration.

use serde::Deserialize;

use crate::stats::DEFAULT_STATS_LIMIT;

/// Rolling statistics settings.
#[derive(Debug, Clone, Deserialize)]
pub struct StatsConfig {
    /// Number of most recent orders the averages cover.
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_STATS_LIMIT,
        }
    }
}

fn default_limit() -> usize {
    DEFAULT_STATS_LIMIT
}
