//! Storage layer for the data access core
//!
//! Every external collaborator is reached through a trait defined here; the
//! core composes them and never talks to a concrete backend directly.

/// Cache backend interface
pub mod cache;
/// Relational data store interface
pub mod database;
/// Identity store interface
pub mod identity;
/// In-memory reference implementations
pub mod memory;
/// Profile store interface
pub mod profiles;

pub use cache::CacheBackend;
pub use database::{DataStore, Filter, FilterOp, Order, RowRange};
pub use identity::{Identity, IdentityClaims, IdentityStore};
pub use profiles::{Profile, ProfileStore};

use std::sync::Arc;

/// Bundle of long-lived storage collaborators
#[derive(Clone)]
pub struct StorageLayer {
    /// Relational data store
    pub data: Arc<dyn DataStore>,
    /// Profile rows
    pub profiles: Arc<dyn ProfileStore>,
    /// Keyed cache with tag invalidation
    pub cache: Arc<dyn CacheBackend>,
}

impl StorageLayer {
    /// Bundle the given backends
    pub fn new(
        data: Arc<dyn DataStore>,
        profiles: Arc<dyn ProfileStore>,
        cache: Arc<dyn CacheBackend>,
    ) -> Self {
        Self {
            data,
            profiles,
            cache,
        }
    }
}
