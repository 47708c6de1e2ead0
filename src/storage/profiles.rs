//! Profile store interface

use crate::core::models::UserRole;
use crate::utils::error::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Mutable profile row keyed by identity id.
///
/// The role and salon fields here are user-visible fallbacks; the immutable
/// identity claims take precedence over them during session resolution.
#[derive(Debug, Clone)]
pub struct Profile {
    pub id: Uuid,
    pub email: Option<String>,
    pub role: Option<UserRole>,
    pub salon_id: Option<Uuid>,
}

/// Access to profile rows
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch the profile for an identity, if one exists
    async fn profile(&self, user_id: Uuid) -> Result<Option<Profile>>;
}
