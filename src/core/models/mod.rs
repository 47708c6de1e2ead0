//! Core data models for the data access core
//!
//! This module defines the value types shared by every component: roles,
//! permissions, sessions, resource contexts, and audit entries.

pub mod audit;
pub mod permission;
pub mod resource;
pub mod role;
pub mod session;

pub use audit::AuditEntry;
pub use permission::{
    Action, ActionSelector, Grant, PermissionSet, ResourceKind, ResourceSelector, permission_key,
};
pub use resource::ResourceContext;
pub use role::UserRole;
pub use session::VerifiedSession;

use uuid::Uuid;

/// Per-request client metadata threaded into audit entries
#[derive(Debug, Clone)]
pub struct RequestMeta {
    /// Request correlation id
    pub request_id: Uuid,
    /// Client IP address, when known
    pub client_ip: Option<String>,
    /// Client user agent, when known
    pub user_agent: Option<String>,
}

impl Default for RequestMeta {
    fn default() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            client_ip: None,
            user_agent: None,
        }
    }
}

impl RequestMeta {
    /// Create metadata with a fresh request id
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach client network information
    pub fn with_client(mut self, ip: String, user_agent: Option<String>) -> Self {
        self.client_ip = Some(ip);
        self.user_agent = user_agent;
        self
    }
}
