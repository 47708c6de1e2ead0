//! Query-side secure access patterns: plain, paginated, and cached reads

use super::types::{CacheSpec, Page, QuerySpec};
use super::{SecureDal, wrap_store_error};
use crate::core::models::{Action, ResourceKind, VerifiedSession};
use crate::core::sanitize::{create_secure_dto, strip_rows};
use crate::storage::{DataStore, RowRange};
use crate::utils::error::Result;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

impl SecureDal {
    /// Read through a caller-supplied store operation.
    ///
    /// Checks read permission for the resource kind before the store is
    /// touched; the result is stripped of sensitive fields.
    pub async fn query<F, Fut>(&self, kind: ResourceKind, query: F) -> Result<Value>
    where
        F: FnOnce(Arc<dyn DataStore>, VerifiedSession) -> Fut,
        Fut: Future<Output = Result<Value>>,
    {
        self.query_with(kind, query, strip_rows).await
    }

    /// [`query`](Self::query) with a caller-supplied result transform
    /// replacing the default strip
    pub async fn query_with<F, Fut, T>(
        &self,
        kind: ResourceKind,
        query: F,
        transform: impl FnOnce(Value) -> T,
    ) -> Result<T>
    where
        F: FnOnce(Arc<dyn DataStore>, VerifiedSession) -> Fut,
        Fut: Future<Output = Result<Value>>,
    {
        let session = self.authorize(kind, Action::Read).await?;
        let raw = query(self.storage.data.clone(), session)
            .await
            .map_err(|e| wrap_store_error(kind, e))?;
        Ok(transform(raw))
    }

    /// Page through a filtered table.
    ///
    /// Issues a count query and a range-bounded data query derived from the
    /// same spec; `total_pages` is `ceil(total_count / page_size)`.
    pub async fn paginated_query(
        &self,
        kind: ResourceKind,
        page: u32,
        page_size: u32,
        spec: &QuerySpec,
    ) -> Result<Page> {
        self.paginated_query_with(kind, page, page_size, spec, |rows| {
            rows.iter().map(|row| create_secure_dto(row, None)).collect()
        })
        .await
    }

    /// [`paginated_query`](Self::paginated_query) with a caller-supplied
    /// transform over the page's rows
    pub async fn paginated_query_with(
        &self,
        kind: ResourceKind,
        page: u32,
        page_size: u32,
        spec: &QuerySpec,
        transform: impl FnOnce(Vec<Value>) -> Vec<Value>,
    ) -> Result<Page> {
        let _session = self.authorize(kind, Action::Read).await?;
        let page = page.max(1);
        let page_size = page_size.max(1);

        let total_count = self
            .storage
            .data
            .count(&spec.table, &spec.filters)
            .await
            .map_err(|e| wrap_store_error(kind, e))?;

        let rows = self
            .storage
            .data
            .select(
                &spec.table,
                &spec.filters,
                spec.order.as_ref(),
                Some(RowRange::for_page(page, page_size)),
            )
            .await
            .map_err(|e| wrap_store_error(kind, e))?;

        Ok(Page {
            data: transform(rows),
            page,
            page_size,
            total_pages: total_count.div_ceil(u64::from(page_size)),
            total_count,
        })
    }

    /// Read through the keyed cache.
    ///
    /// The session and permission gate always run; only the store round
    /// trip is skipped on a cache hit. Results are stripped before caching
    /// so the cache never holds sensitive fields.
    pub async fn cached_query<F, Fut>(
        &self,
        cache: &CacheSpec,
        kind: ResourceKind,
        query: F,
    ) -> Result<Value>
    where
        F: FnOnce(Arc<dyn DataStore>, VerifiedSession) -> Fut,
        Fut: Future<Output = Result<Value>>,
    {
        let session = self.authorize(kind, Action::Read).await?;

        if self.config.cache.enabled {
            if let Some(hit) = self.storage.cache.get(&cache.key).await {
                debug!(key = %cache.key, "cached query hit");
                return Ok(hit);
            }
        }

        let raw = query(self.storage.data.clone(), session)
            .await
            .map_err(|e| wrap_store_error(kind, e))?;
        let result = strip_rows(raw);

        if self.config.cache.enabled {
            let ttl = cache
                .ttl
                .unwrap_or(Duration::from_secs(self.config.cache.default_ttl_secs));
            self.storage
                .cache
                .put(&cache.key, result.clone(), ttl, &cache.tags)
                .await;
        }

        Ok(result)
    }

    /// Drop every cached result carrying the tag
    pub async fn invalidate_cache_tag(&self, tag: &str) {
        self.storage.cache.invalidate_tag(tag).await;
    }
}
