//! In-memory identity and profile stores

use crate::storage::identity::{Identity, IdentityStore};
use crate::storage::profiles::{Profile, ProfileStore};
use crate::utils::error::{Result, SecurityError};
use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

/// Identity store with a fixed verification outcome.
///
/// One instance represents one request's caller, matching the per-request
/// lifetime of the real identity client.
pub struct StaticIdentityStore {
    identity: Option<Identity>,
    error: Option<String>,
}

impl StaticIdentityStore {
    /// A request carrying a verified identity
    pub fn authenticated(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
            error: None,
        }
    }

    /// A request with no verified identity
    pub fn anonymous() -> Self {
        Self {
            identity: None,
            error: None,
        }
    }

    /// A request whose verification call fails outright
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            identity: None,
            error: Some(message.into()),
        }
    }
}

#[async_trait]
impl IdentityStore for StaticIdentityStore {
    async fn current_identity(&self) -> Result<Option<Identity>> {
        if let Some(message) = &self.error {
            return Err(SecurityError::authentication(message.clone()));
        }
        Ok(self.identity.clone())
    }
}

/// In-memory profile table keyed by identity id
#[derive(Default)]
pub struct MemoryProfileStore {
    profiles: DashMap<Uuid, Profile>,
}

impl MemoryProfileStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a profile row
    pub fn insert(&self, profile: Profile) {
        self.profiles.insert(profile.id, profile);
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn profile(&self, user_id: Uuid) -> Result<Option<Profile>> {
        Ok(self.profiles.get(&user_id).map(|p| p.clone()))
    }
}
