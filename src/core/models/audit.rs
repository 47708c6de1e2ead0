//! Audit trail entry model

use super::RequestMeta;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One append-only record of a security-relevant event.
///
/// Entries are never mutated or deleted by this core once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Acting identity; "anonymous" when no identity was verified
    pub user_id: String,
    /// Event name, e.g. `auth_failure` or `permission_denied`
    pub action: String,
    /// Resource label the event concerns
    pub resource: String,
    /// Specific resource id, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<Uuid>,
    /// Whether the underlying operation succeeded
    pub success: bool,
    /// Error detail for failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
    /// Client address, when the request carried one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_ip: Option<String>,
    /// Client user agent, when the request carried one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl AuditEntry {
    /// Create a failure entry
    pub fn failure(
        user_id: impl Into<String>,
        action: impl Into<String>,
        resource: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            action: action.into(),
            resource: resource.into(),
            resource_id: None,
            success: false,
            error_message: None,
            timestamp: Utc::now(),
            client_ip: None,
            user_agent: None,
        }
    }

    /// Create a success entry
    pub fn success(
        user_id: impl Into<String>,
        action: impl Into<String>,
        resource: impl Into<String>,
    ) -> Self {
        Self {
            success: true,
            ..Self::failure(user_id, action, resource)
        }
    }

    /// Attach the specific resource id
    pub fn with_resource_id(mut self, resource_id: Uuid) -> Self {
        self.resource_id = Some(resource_id);
        self
    }

    /// Attach an error message
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    /// Attach client metadata from the request
    pub fn with_meta(mut self, meta: &RequestMeta) -> Self {
        self.client_ip = meta.client_ip.clone();
        self.user_agent = meta.user_agent.clone();
        self
    }
}
