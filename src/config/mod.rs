//! Configuration for the data access core

pub mod loader;
pub mod models;

pub use models::{AuditConfig, AuthConfig, CacheConfig, RateLimitConfig};

use crate::utils::error::{Result, SecurityError};
use serde::{Deserialize, Serialize};

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Session resolution settings
    #[serde(default)]
    pub auth: AuthConfig,
    /// Rate limiting settings
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Cached query settings
    #[serde(default)]
    pub cache: CacheConfig,
    /// Audit trail settings
    #[serde(default)]
    pub audit: AuditConfig,
}

impl Config {
    /// Validate cross-field constraints
    pub fn validate(&self) -> Result<()> {
        if self.rate_limit.enabled && self.rate_limit.default_limit == 0 {
            return Err(SecurityError::config(
                "rate_limit.default_limit must be greater than 0",
            ));
        }
        if self.rate_limit.enabled && self.rate_limit.default_window_ms == 0 {
            return Err(SecurityError::config(
                "rate_limit.default_window_ms must be greater than 0",
            ));
        }
        if self.audit.enabled && self.audit.table.is_empty() {
            return Err(SecurityError::config("audit.table must not be empty"));
        }
        Ok(())
    }
}
