//! Authorization evaluation
//!
//! `check_permission` applies the precedence chain over a verified session:
//! universal sentinel, explicit grant, ownership rule, then salon rule.
//! `verify_resource_access` resolves per-resource ownership through the
//! registry in [`ownership`]. Denials leave an audit entry.

pub mod ownership;


pub use ownership::{OwnershipCheck, OwnershipRegistry};

use crate::audit::AuditLogger;
use crate::core::models::{
    Action, AuditEntry, ResourceContext, ResourceKind, VerifiedSession, permission_key,
};
use crate::storage::DataStore;
use std::sync::Arc;
use tracing::{debug, warn};

/// Permission and resource-access evaluator
#[derive(Clone)]
pub struct Authorizer {
    store: Arc<dyn DataStore>,
    audit: Arc<AuditLogger>,
    ownership: OwnershipRegistry,
}

impl Authorizer {
    /// Create an evaluator with the built-in ownership registry
    pub fn new(store: Arc<dyn DataStore>, audit: Arc<AuditLogger>) -> Self {
        Self::with_registry(store, audit, OwnershipRegistry::with_defaults())
    }

    /// Create an evaluator with a custom ownership registry
    pub fn with_registry(
        store: Arc<dyn DataStore>,
        audit: Arc<AuditLogger>,
        ownership: OwnershipRegistry,
    ) -> Self {
        Self {
            store,
            audit,
            ownership,
        }
    }

    /// Whether the session may perform the action described by the context.
    ///
    /// Precedence: universal sentinel, explicit permission entry, ownership
    /// rule (read/update only), salon rule (staff-like or owner, any
    /// action). A denial records a `permission_denied` audit entry carrying
    /// the attempted permission key.
    pub async fn check_permission(
        &self,
        session: &VerifiedSession,
        context: &ResourceContext,
    ) -> bool {
        if session.permissions.is_universal() {
            return true;
        }

        if session.permissions.allows(context.kind, context.action) {
            return true;
        }

        // Ownership grants read and update, never delete or manage
        if let Some(owner_id) = context.owner_id {
            if owner_id == session.user_id
                && matches!(context.action, Action::Read | Action::Update)
            {
                return true;
            }
        }

        // Members of the resource's salon get full access
        if let (Some(resource_salon), Some(session_salon)) = (context.salon_id, session.salon_id) {
            if resource_salon == session_salon && (session.is_staff || session.is_salon_owner) {
                return true;
            }
        }

        let key = permission_key(context.kind, context.action);
        debug!(user = %session.user_id, permission = %key, "permission denied");

        let mut entry = AuditEntry::failure(
            session.user_id.to_string(),
            "permission_denied",
            context.kind.to_string(),
        )
        .with_error(format!("Permission denied: {}", key));
        if let Some(resource_id) = context.resource_id {
            entry = entry.with_resource_id(resource_id);
        }
        self.audit.log(entry).await;

        false
    }

    /// Whether the session owns or may access a specific resource.
    ///
    /// Universal sessions short-circuit to allowed; kinds without a
    /// registered ownership check always deny, as do ownership lookups that
    /// fail against the store.
    pub async fn verify_resource_access(
        &self,
        session: &VerifiedSession,
        kind: ResourceKind,
        resource_id: uuid::Uuid,
    ) -> bool {
        if session.permissions.is_universal() {
            return true;
        }

        let Some(check) = self.ownership.get(kind) else {
            return false;
        };

        match check.owns(self.store.as_ref(), session, resource_id).await {
            Ok(owns) => owns,
            Err(error) => {
                warn!(%error, kind = %kind, %resource_id, "ownership lookup failed, denying");
                false
            }
        }
    }
}
