//! User role types and role hierarchy

use serde::{Deserialize, Serialize};

/// User role
///
/// Roles are assigned through the identity store's immutable claims; the
/// profile row only provides a fallback value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Platform administrator with universal access
    PlatformAdmin,
    /// Super administrator across all salons
    SuperAdmin,
    /// Salon administrator
    Admin,
    /// Salon owner
    Owner,
    /// Salon manager
    Manager,
    /// Salon staff member
    Staff,
    /// Booking customer
    Customer,
    /// Unauthenticated or minimal-access caller
    Guest,
}

impl UserRole {
    /// All roles, highest privilege first
    pub const ALL: [UserRole; 8] = [
        UserRole::PlatformAdmin,
        UserRole::SuperAdmin,
        UserRole::Admin,
        UserRole::Owner,
        UserRole::Manager,
        UserRole::Staff,
        UserRole::Customer,
        UserRole::Guest,
    ];

    /// Whether the role carries administrative access
    pub fn is_admin_like(&self) -> bool {
        matches!(
            self,
            UserRole::Admin | UserRole::SuperAdmin | UserRole::PlatformAdmin
        )
    }

    /// Whether the role is salon staff (staff or manager)
    pub fn is_staff_like(&self) -> bool {
        matches!(self, UserRole::Staff | UserRole::Manager)
    }

    /// Hierarchy level; higher means more privileged
    pub fn level(&self) -> u8 {
        match self {
            UserRole::PlatformAdmin => 7,
            UserRole::SuperAdmin => 6,
            UserRole::Admin => 5,
            UserRole::Owner => 4,
            UserRole::Manager => 3,
            UserRole::Staff => 2,
            UserRole::Customer => 1,
            UserRole::Guest => 0,
        }
    }

    /// Whether this role sits at or above another in the hierarchy
    pub fn at_least(&self, other: UserRole) -> bool {
        self.level() >= other.level()
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::PlatformAdmin => write!(f, "platform_admin"),
            UserRole::SuperAdmin => write!(f, "super_admin"),
            UserRole::Admin => write!(f, "admin"),
            UserRole::Owner => write!(f, "owner"),
            UserRole::Manager => write!(f, "manager"),
            UserRole::Staff => write!(f, "staff"),
            UserRole::Customer => write!(f, "customer"),
            UserRole::Guest => write!(f, "guest"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "platform_admin" => Ok(UserRole::PlatformAdmin),
            "super_admin" => Ok(UserRole::SuperAdmin),
            "admin" => Ok(UserRole::Admin),
            "owner" => Ok(UserRole::Owner),
            "manager" => Ok(UserRole::Manager),
            "staff" => Ok(UserRole::Staff),
            "customer" => Ok(UserRole::Customer),
            "guest" => Ok(UserRole::Guest),
            _ => Err(format!("Invalid user role: {}", s)),
        }
    }
}
