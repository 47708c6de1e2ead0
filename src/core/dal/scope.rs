//! Role-based query scoping
//!
//! Derives the mandatory listing filters for a session: customers are
//! pinned to their own rows, staff to their assignments, managers and
//! owners to their salon. Admin-like sessions are unscoped. Feature
//! modules fold these into their [`QuerySpec`](super::QuerySpec) filters.

use crate::core::models::{UserRole, VerifiedSession};
use crate::storage::Filter;

/// Column names the scope filters bind to
#[derive(Debug, Clone)]
pub struct ScopeColumns {
    pub customer: &'static str,
    pub staff: &'static str,
    pub salon: &'static str,
}

impl Default for ScopeColumns {
    fn default() -> Self {
        Self {
            customer: "customer_id",
            staff: "staff_id",
            salon: "salon_id",
        }
    }
}

/// Equality filters a listing query must carry for this session
pub fn role_scope_filters(session: &VerifiedSession, columns: &ScopeColumns) -> Vec<Filter> {
    match session.role {
        role if role.is_admin_like() => Vec::new(),
        UserRole::Customer => vec![Filter::eq(columns.customer, session.user_id.to_string())],
        UserRole::Staff => vec![Filter::eq(columns.staff, session.user_id.to_string())],
        UserRole::Manager | UserRole::Owner => session
            .salon_id
            .map(|salon_id| vec![Filter::eq(columns.salon, salon_id.to_string())])
            .unwrap_or_default(),
        // Guests only ever reach public listings
        _ => Vec::new(),
    }
}
