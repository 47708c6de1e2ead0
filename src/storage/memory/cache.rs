//! In-memory expiring cache with tag invalidation

use crate::storage::cache::CacheBackend;
use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use std::collections::HashSet;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    expires_at: Instant,
    tags: Vec<String>,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// In-memory [`CacheBackend`] with per-entry TTL and a tag index
#[derive(Default)]
pub struct MemoryCache {
    entries: DashMap<String, CacheEntry>,
    tag_index: DashMap<String, HashSet<String>>,
}

impl MemoryCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (unexpired) entries
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_expired()).count()
    }

    /// Whether no live entries remain
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CacheBackend for MemoryCache {
    async fn get(&self, key: &str) -> Option<Value> {
        if let Some(entry) = self.entries.get(key) {
            if !entry.is_expired() {
                return Some(entry.value.clone());
            }
        }
        // Drop the stale entry outside the read guard
        self.entries.remove_if(key, |_, entry| entry.is_expired());
        None
    }

    async fn put(&self, key: &str, value: Value, ttl: Duration, tags: &[String]) {
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                expires_at: Instant::now() + ttl,
                tags: tags.to_vec(),
            },
        );
        for tag in tags {
            self.tag_index
                .entry(tag.clone())
                .or_default()
                .insert(key.to_string());
        }
    }

    async fn invalidate_tag(&self, tag: &str) {
        if let Some((_, keys)) = self.tag_index.remove(tag) {
            for key in keys {
                if let Some((key, entry)) = self.entries.remove(&key) {
                    // Untangle the entry from its other tags
                    for other in &entry.tags {
                        if other != tag {
                            if let Some(mut index) = self.tag_index.get_mut(other) {
                                index.remove(&key);
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_put_get_round_trip() {
        let cache = MemoryCache::new();
        cache
            .put("k", json!({"v": 1}), Duration::from_secs(60), &[])
            .await;
        assert_eq!(cache.get("k").await, Some(json!({"v": 1})));
    }

    #[tokio::test]
    async fn test_entries_expire() {
        let cache = MemoryCache::new();
        cache
            .put("k", json!(1), Duration::from_millis(10), &[])
            .await;
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(cache.get("k").await, None);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_tag_invalidation() {
        let cache = MemoryCache::new();
        let tags = vec!["salon-1".to_string()];
        cache
            .put("a", json!(1), Duration::from_secs(60), &tags)
            .await;
        cache
            .put("b", json!(2), Duration::from_secs(60), &tags)
            .await;
        cache.put("c", json!(3), Duration::from_secs(60), &[]).await;

        cache.invalidate_tag("salon-1").await;

        assert_eq!(cache.get("a").await, None);
        assert_eq!(cache.get("b").await, None);
        assert_eq!(cache.get("c").await, Some(json!(3)));
    }
}
