//! Cache backend interface
//!
//! Keyed, time-based cache with tag-based invalidation. Caching policy
//! (eviction, persistence, distribution) belongs to the backend; the core
//! only gets, puts, and invalidates. All operations are best-effort.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// Keyed time-based cache with tags
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Fetch a live entry, if present
    async fn get(&self, key: &str) -> Option<Value>;

    /// Store an entry with a time-to-live and invalidation tags
    async fn put(&self, key: &str, value: Value, ttl: Duration, tags: &[String]);

    /// Drop every entry carrying the tag
    async fn invalidate_tag(&self, tag: &str);
}
