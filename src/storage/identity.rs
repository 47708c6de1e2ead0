//! Identity store interface
//!
//! The identity provider verifies the ambient caller and exposes the
//! immutable claims the resolver trusts for authorization. Claims are set
//! by the platform, never editable by the caller; the mutable profile row
//! is only a fallback.

use crate::core::models::UserRole;
use crate::utils::error::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Immutable claims attached to a verified identity
#[derive(Debug, Clone, Default)]
pub struct IdentityClaims {
    /// Role claim; authoritative when present
    pub role: Option<UserRole>,
    /// Salon association claim
    pub salon_id: Option<Uuid>,
}

/// A verified caller identity
#[derive(Debug, Clone)]
pub struct Identity {
    /// Stable identity id
    pub id: Uuid,
    /// Email address
    pub email: String,
    /// Immutable claims
    pub claims: IdentityClaims,
}

/// Verifies the ambient request's caller
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Verify the current caller.
    ///
    /// Returns `Ok(None)` when no valid identity is present on the request.
    async fn current_identity(&self) -> Result<Option<Identity>>;
}
