//! Per-resource-kind ownership checks
//!
//! `verify_resource_access` dispatches through this registry: adding a
//! resource kind means registering a check, not growing a conditional.

use crate::core::models::{ResourceKind, VerifiedSession};
use crate::storage::{DataStore, Filter};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Ownership predicate for one resource kind.
///
/// Implementations fetch the minimal ownership columns for the resource id
/// and test the session's identity or salon membership against them.
#[async_trait]
pub trait OwnershipCheck: Send + Sync {
    /// Whether the session owns or may access the resource
    async fn owns(
        &self,
        store: &dyn DataStore,
        session: &VerifiedSession,
        resource_id: Uuid,
    ) -> Result<bool>;
}

/// Registry of ownership checks keyed by resource kind
#[derive(Clone, Default)]
pub struct OwnershipRegistry {
    checks: HashMap<ResourceKind, Arc<dyn OwnershipCheck>>,
}

impl OwnershipRegistry {
    /// Empty registry; every kind denies
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry with the built-in appointment, salon, and billing checks
    pub fn with_defaults() -> Self {
        let mut registry = Self::default();
        registry.register(ResourceKind::Appointment, Arc::new(AppointmentOwnership));
        registry.register(ResourceKind::Salon, Arc::new(SalonOwnership));
        registry.register(ResourceKind::Billing, Arc::new(BillingOwnership));
        registry
    }

    /// Register (or replace) the check for a kind
    pub fn register(&mut self, kind: ResourceKind, check: Arc<dyn OwnershipCheck>) {
        self.checks.insert(kind, check);
    }

    /// Look up the check for a kind
    pub fn get(&self, kind: ResourceKind) -> Option<&Arc<dyn OwnershipCheck>> {
        self.checks.get(&kind)
    }
}

fn column_matches(row: &Value, column: &str, id: Uuid) -> bool {
    row.get(column).and_then(Value::as_str) == Some(id.to_string().as_str())
}

fn salon_matches(row: &Value, column: &str, session: &VerifiedSession) -> bool {
    session
        .salon_id
        .map(|salon_id| column_matches(row, column, salon_id))
        .unwrap_or(false)
}

async fn fetch(store: &dyn DataStore, table: &str, id: Uuid) -> Result<Option<Value>> {
    store
        .select_one(table, &[Filter::eq("id", id.to_string())])
        .await
}

/// Appointments: accessible to their customer, their staff member, or any
/// caller from the appointment's salon
struct AppointmentOwnership;

#[async_trait]
impl OwnershipCheck for AppointmentOwnership {
    async fn owns(
        &self,
        store: &dyn DataStore,
        session: &VerifiedSession,
        resource_id: Uuid,
    ) -> Result<bool> {
        let Some(row) = fetch(store, "appointments", resource_id).await? else {
            return Ok(false);
        };
        Ok(column_matches(&row, "customer_id", session.user_id)
            || column_matches(&row, "staff_id", session.user_id)
            || salon_matches(&row, "salon_id", session))
    }
}

/// Salons: accessible to their owner, their own members, or admins
struct SalonOwnership;

#[async_trait]
impl OwnershipCheck for SalonOwnership {
    async fn owns(
        &self,
        store: &dyn DataStore,
        session: &VerifiedSession,
        resource_id: Uuid,
    ) -> Result<bool> {
        let Some(row) = fetch(store, "salons", resource_id).await? else {
            return Ok(false);
        };
        Ok(column_matches(&row, "owner_id", session.user_id)
            || session.salon_id == Some(resource_id)
            || session.is_admin)
    }
}

/// Billing records: accessible to their customer or the billed salon
struct BillingOwnership;

#[async_trait]
impl OwnershipCheck for BillingOwnership {
    async fn owns(
        &self,
        store: &dyn DataStore,
        session: &VerifiedSession,
        resource_id: Uuid,
    ) -> Result<bool> {
        let Some(row) = fetch(store, "billing", resource_id).await? else {
            return Ok(false);
        };
        Ok(column_matches(&row, "customer_id", session.user_id)
            || salon_matches(&row, "salon_id", session))
    }
}
