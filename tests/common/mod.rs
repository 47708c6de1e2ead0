//! Shared fixtures for the integration suite

#![allow(dead_code)]

use salon_dal::storage::memory::{
    MemoryAuditSink, MemoryCache, MemoryDataStore, MemoryProfileStore, StaticIdentityStore,
};
use salon_dal::{
    Config, Identity, IdentityClaims, Profile, RequestMeta, SecureDal, SecurityCore, StorageLayer,
    UserRole,
};
use std::sync::Arc;
use uuid::Uuid;

pub struct TestWorld {
    pub core: SecurityCore,
    pub data: Arc<MemoryDataStore>,
    pub profiles: Arc<MemoryProfileStore>,
    pub cache: Arc<MemoryCache>,
    pub sink: Arc<MemoryAuditSink>,
}

pub fn world() -> TestWorld {
    world_with_config(Config::default())
}

pub fn world_with_config(config: Config) -> TestWorld {
    let data = Arc::new(MemoryDataStore::new());
    let profiles = Arc::new(MemoryProfileStore::new());
    let cache = Arc::new(MemoryCache::new());
    let sink = Arc::new(MemoryAuditSink::new());
    let storage = StorageLayer::new(data.clone(), profiles.clone(), cache.clone());
    TestWorld {
        core: SecurityCore::new(storage, sink.clone(), config),
        data,
        profiles,
        cache,
        sink,
    }
}

impl TestWorld {
    /// Register a user whose role comes from the immutable claim
    pub fn register(&self, role: UserRole, salon_id: Option<Uuid>) -> Identity {
        self.register_with(Some(role), None, salon_id)
    }

    /// Register a user with explicit claim and profile roles
    pub fn register_with(
        &self,
        claim_role: Option<UserRole>,
        profile_role: Option<UserRole>,
        salon_id: Option<Uuid>,
    ) -> Identity {
        let id = Uuid::new_v4();
        self.profiles.insert(Profile {
            id,
            email: Some(format!("user-{}@example.com", id)),
            role: profile_role,
            salon_id: None,
        });
        Identity {
            id,
            email: format!("user-{}@example.com", id),
            claims: IdentityClaims {
                role: claim_role,
                salon_id,
            },
        }
    }

    /// Open a request handle for a registered user
    pub fn dal(&self, identity: Identity) -> SecureDal {
        self.core.request(
            Arc::new(StaticIdentityStore::authenticated(identity)),
            RequestMeta::new(),
        )
    }

    /// Open a request handle with no verified identity
    pub fn anonymous_dal(&self) -> SecureDal {
        self.core.request(
            Arc::new(StaticIdentityStore::anonymous()),
            RequestMeta::new(),
        )
    }
}
