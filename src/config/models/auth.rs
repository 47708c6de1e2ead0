//! Authentication and session resolution configuration

use crate::core::models::UserRole;
use serde::{Deserialize, Serialize};

/// Session resolution configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Role assumed when neither the immutable claim nor the profile row
    /// carries one
    #[serde(default = "default_role")]
    pub default_role: UserRole,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            default_role: default_role(),
        }
    }
}

fn default_role() -> UserRole {
    UserRole::Customer
}
