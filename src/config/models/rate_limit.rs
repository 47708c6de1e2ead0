//! Rate limiting configuration

use serde::{Deserialize, Serialize};

/// Rate limiting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Default attempts allowed per window
    #[serde(default = "default_limit")]
    pub default_limit: u32,
    /// Default trailing window in milliseconds
    #[serde(default = "default_window_ms")]
    pub default_window_ms: u64,
    /// Table holding rate limit records
    #[serde(default = "default_table")]
    pub table: String,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            default_limit: default_limit(),
            default_window_ms: default_window_ms(),
            table: default_table(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_limit() -> u32 {
    10
}

fn default_window_ms() -> u64 {
    60_000
}

fn default_table() -> String {
    "rate_limit_events".to_string()
}
