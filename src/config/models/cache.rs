//! Cached query configuration

use serde::{Deserialize, Serialize};

/// Cached query configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Enable the cached query pattern
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Default time-to-live in seconds for cached results
    #[serde(default = "default_ttl_secs")]
    pub default_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            default_ttl_secs: default_ttl_secs(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_ttl_secs() -> u64 {
    60
}
