//! Supporting types for the secure access patterns

use crate::core::models::{Action, ResourceKind, VerifiedSession};
use crate::storage::{DataStore, Filter, Order};
use crate::utils::error::Result;
use futures::future::BoxFuture;
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Boxed store operation used by the batch and transaction patterns
pub type QueryFn =
    Box<dyn FnOnce(Arc<dyn DataStore>, VerifiedSession) -> BoxFuture<'static, Result<Value>> + Send>;

/// One entry of a batch query
pub struct BatchQuery {
    /// Resource kind the query reads
    pub kind: ResourceKind,
    pub(crate) run: QueryFn,
}

impl BatchQuery {
    /// Create a batch entry from a store operation
    pub fn new<F, Fut>(kind: ResourceKind, run: F) -> Self
    where
        F: FnOnce(Arc<dyn DataStore>, VerifiedSession) -> Fut + Send + 'static,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        Self {
            kind,
            run: Box::new(move |store, session| Box::pin(run(store, session))),
        }
    }
}

/// One operation of a permission-gated transaction
pub struct TransactionOp {
    /// Resource kind the operation touches
    pub kind: ResourceKind,
    /// Action the operation performs
    pub action: Action,
    pub(crate) run: QueryFn,
}

impl TransactionOp {
    /// Create a transaction operation from a store operation
    pub fn new<F, Fut>(kind: ResourceKind, action: Action, run: F) -> Self
    where
        F: FnOnce(Arc<dyn DataStore>, VerifiedSession) -> Fut + Send + 'static,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        Self {
            kind,
            action,
            run: Box::new(move |store, session| Box::pin(run(store, session))),
        }
    }
}

/// Caller-supplied query description for the paginated pattern.
///
/// The pattern derives both the count query and the range-bounded data
/// query from one spec.
#[derive(Debug, Clone)]
pub struct QuerySpec {
    /// Table the query addresses
    pub table: String,
    /// Filters applied to both count and data queries
    pub filters: Vec<Filter>,
    /// Ordering applied to the data query
    pub order: Option<Order>,
}

impl QuerySpec {
    /// Query over a table with no filters
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            filters: Vec::new(),
            order: None,
        }
    }

    /// Add a filter
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set the ordering
    pub fn order_by(mut self, order: Order) -> Self {
        self.order = Some(order);
        self
    }
}

/// One page of results
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    /// Stripped rows for this page
    pub data: Vec<Value>,
    /// 1-based page number
    pub page: u32,
    /// Rows per page
    pub page_size: u32,
    /// Total pages for the filtered result set
    pub total_pages: u64,
    /// Total rows for the filtered result set
    pub total_count: u64,
}

/// Cache placement for the cached query pattern
#[derive(Debug, Clone)]
pub struct CacheSpec {
    /// Cache key
    pub key: String,
    /// Time-to-live; the configured default applies when unset
    pub ttl: Option<Duration>,
    /// Tags for external invalidation
    pub tags: Vec<String>,
}

impl CacheSpec {
    /// Spec with the given key and default TTL
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ttl: None,
            tags: Vec::new(),
        }
    }

    /// Override the time-to-live
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Add an invalidation tag
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}
