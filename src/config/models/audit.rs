//! Audit trail configuration

use serde::{Deserialize, Serialize};

/// Audit trail configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Enable audit recording
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Table receiving audit entries
    #[serde(default = "default_table")]
    pub table: String,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            table: default_table(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_table() -> String {
    "security_audit_logs".to_string()
}
