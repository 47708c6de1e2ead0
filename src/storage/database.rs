//! Relational data store interface
//!
//! The hosted data service is an external collaborator; this trait captures
//! the operation surface the core composes: equality/lower-bound filtered
//! selects, inserts, updates, deletes, counts, ordering, and offset ranges,
//! addressed per resource table. Rows are schemaless JSON values.

use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Filter comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// Column equals value
    Eq,
    /// Column is greater than or equal to value
    Gte,
}

/// A single column filter
#[derive(Debug, Clone)]
pub struct Filter {
    pub column: String,
    pub op: FilterOp,
    pub value: Value,
}

impl Filter {
    /// Equality filter
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            op: FilterOp::Eq,
            value: value.into(),
        }
    }

    /// Lower-bound filter
    pub fn gte(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            op: FilterOp::Gte,
            value: value.into(),
        }
    }
}

/// Result ordering
#[derive(Debug, Clone)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

impl Order {
    /// Ascending order on a column
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ascending: true,
        }
    }

    /// Descending order on a column
    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ascending: false,
        }
    }
}

/// Inclusive row range for pagination
#[derive(Debug, Clone, Copy)]
pub struct RowRange {
    pub from: u64,
    pub to: u64,
}

impl RowRange {
    /// Range for a 1-based page of the given size
    pub fn for_page(page: u32, page_size: u32) -> Self {
        let from = u64::from(page.saturating_sub(1)) * u64::from(page_size);
        Self {
            from,
            to: from + u64::from(page_size).saturating_sub(1),
        }
    }
}

/// Generic table-addressed data store
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Select rows matching all filters
    async fn select(
        &self,
        table: &str,
        filters: &[Filter],
        order: Option<&Order>,
        range: Option<RowRange>,
    ) -> Result<Vec<Value>>;

    /// Select at most one row matching all filters
    async fn select_one(&self, table: &str, filters: &[Filter]) -> Result<Option<Value>>;

    /// Count rows matching all filters
    async fn count(&self, table: &str, filters: &[Filter]) -> Result<u64>;

    /// Insert a row, returning it as stored
    async fn insert(&self, table: &str, row: Value) -> Result<Value>;

    /// Merge a patch into all rows matching the filters, returning them
    async fn update(&self, table: &str, filters: &[Filter], patch: Value) -> Result<Vec<Value>>;

    /// Delete rows matching the filters, returning the number removed
    async fn delete(&self, table: &str, filters: &[Filter]) -> Result<u64>;
}
