//! Resource access context

use super::permission::{Action, ResourceKind};
use uuid::Uuid;

/// Stateless description of what is being accessed and how.
///
/// Constructed by the caller per authorization check.
#[derive(Debug, Clone)]
pub struct ResourceContext {
    /// Kind of resource being accessed
    pub kind: ResourceKind,
    /// Specific resource id, when known
    pub resource_id: Option<Uuid>,
    /// Recorded owner of the resource, when known
    pub owner_id: Option<Uuid>,
    /// Salon the resource belongs to, when known
    pub salon_id: Option<Uuid>,
    /// Requested action
    pub action: Action,
}

impl ResourceContext {
    /// Create a context for a kind/action pair
    pub fn new(kind: ResourceKind, action: Action) -> Self {
        Self {
            kind,
            resource_id: None,
            owner_id: None,
            salon_id: None,
            action,
        }
    }

    /// Set the specific resource id
    pub fn with_resource(mut self, resource_id: Uuid) -> Self {
        self.resource_id = Some(resource_id);
        self
    }

    /// Set the recorded owner id
    pub fn with_owner(mut self, owner_id: Uuid) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    /// Set the salon association
    pub fn with_salon(mut self, salon_id: Uuid) -> Self {
        self.salon_id = Some(salon_id);
        self
    }
}
