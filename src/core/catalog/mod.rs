//! Permission catalog
//!
//! Static role-to-grant table plus the wildcard-expansion function that
//! turns a role into its concrete permission set. Expansion is pure, total,
//! and side-effect-free so it can be tested without any store.

use crate::core::models::{Action, Grant, PermissionSet, ResourceKind, UserRole};
use std::collections::HashMap;

/// Role-to-grant catalog
#[derive(Debug, Clone)]
pub struct PermissionCatalog {
    grants: HashMap<UserRole, Vec<Grant>>,
}

impl Default for PermissionCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl PermissionCatalog {
    /// Build the catalog with the default grant table
    pub fn new() -> Self {
        use Action::*;
        use ResourceKind::*;

        let mut grants: HashMap<UserRole, Vec<Grant>> = HashMap::new();

        grants.insert(UserRole::PlatformAdmin, vec![Grant::universal()]);

        grants.insert(
            UserRole::SuperAdmin,
            vec![
                Grant::all_actions(Salon),
                Grant::all_actions(Staff),
                Grant::all_actions(Customer),
                Grant::all_actions(Appointment),
                Grant::all_actions(Billing),
                Grant::all_actions(Service),
                Grant::all_actions(Analytics),
            ],
        );

        grants.insert(
            UserRole::Admin,
            vec![
                Grant::of(Salon, Read),
                Grant::of(Salon, Update),
                Grant::all_actions(Staff),
                Grant::all_actions(Customer),
                Grant::all_actions(Appointment),
                Grant::of(Billing, Read),
                Grant::all_actions(Service),
                Grant::of(Analytics, Read),
            ],
        );

        grants.insert(
            UserRole::Owner,
            vec![
                Grant::all_actions(Salon),
                Grant::all_actions(Staff),
                Grant::all_actions(Customer),
                Grant::all_actions(Appointment),
                Grant::all_actions(Billing),
                Grant::all_actions(Service),
                Grant::all_actions(Analytics),
            ],
        );

        grants.insert(
            UserRole::Manager,
            vec![
                Grant::of(Salon, Read),
                Grant::of(Staff, Read),
                Grant::of(Staff, Update),
                Grant::all_actions(Customer),
                Grant::all_actions(Appointment),
                Grant::of(Billing, Read),
                Grant::all_actions(Service),
                Grant::of(Analytics, Read),
            ],
        );

        grants.insert(
            UserRole::Staff,
            vec![
                Grant::all_actions(Appointment),
                Grant::of(Customer, Read),
                Grant::of(Service, Read),
                Grant::of(Analytics, Read),
            ],
        );

        grants.insert(
            UserRole::Customer,
            vec![
                Grant::of(Appointment, Read),
                Grant::of(Appointment, Write),
                Grant::of(Appointment, Update),
                Grant::of(Billing, Read),
                Grant::of(Service, Read),
            ],
        );

        grants.insert(
            UserRole::Guest,
            vec![Grant::of(Service, Read), Grant::of(Salon, Read)],
        );

        Self { grants }
    }

    /// Grants recorded for a role
    pub fn grants(&self, role: UserRole) -> &[Grant] {
        self.grants.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Expand a role into its concrete permission set.
    ///
    /// Total over the role enumeration; a role with no recorded grants
    /// expands to the empty set.
    pub fn expand(&self, role: UserRole) -> PermissionSet {
        PermissionSet::from_grants(self.grants(role))
    }
}
