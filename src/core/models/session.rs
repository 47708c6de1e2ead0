//! Verified session model

use super::permission::PermissionSet;
use super::role::UserRole;
use uuid::Uuid;

/// The resolved, trusted representation of the caller for one request.
///
/// Built once per logical request by the identity resolver and immutable
/// thereafter. Never persisted; it lives only for the request's duration.
#[derive(Debug, Clone)]
pub struct VerifiedSession {
    /// Verified identity id
    pub user_id: Uuid,
    /// Email address from the identity store
    pub email: String,
    /// Resolved role (immutable claim first, profile fallback second)
    pub role: UserRole,
    /// Salon association, when the caller belongs to one
    pub salon_id: Option<Uuid>,
    /// Expanded permission set for the role
    pub permissions: PermissionSet,
    /// Administrative role (admin, super_admin, platform_admin)
    pub is_admin: bool,
    /// Top administrative role
    pub is_platform_admin: bool,
    /// Salon owner role
    pub is_salon_owner: bool,
    /// Salon staff role (staff or manager)
    pub is_staff: bool,
    /// Customer role
    pub is_customer: bool,
}

impl VerifiedSession {
    /// Build a session, deriving the role flags
    pub fn new(
        user_id: Uuid,
        email: String,
        role: UserRole,
        salon_id: Option<Uuid>,
        permissions: PermissionSet,
    ) -> Self {
        Self {
            user_id,
            email,
            role,
            salon_id,
            permissions,
            is_admin: role.is_admin_like(),
            is_platform_admin: role == UserRole::PlatformAdmin,
            is_salon_owner: role == UserRole::Owner,
            is_staff: role.is_staff_like(),
            is_customer: role == UserRole::Customer,
        }
    }
}
