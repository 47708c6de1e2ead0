//! In-memory table-of-rows data store

use crate::storage::database::{DataStore, Filter, FilterOp, Order, RowRange};
use crate::utils::error::{Result, SecurityError};
use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;
use serde_json::Value;
use uuid::Uuid;

/// In-memory [`DataStore`] holding JSON rows per table.
///
/// Backs the unit and integration suites and doubles as a local-development
/// stand-in for the hosted data service. Supports one-shot failure
/// injection for exercising the `DataAccess` error path.
#[derive(Default)]
pub struct MemoryDataStore {
    tables: DashMap<String, Vec<Value>>,
    next_failure: Mutex<Option<String>>,
}

impl MemoryDataStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a row directly, bypassing the trait surface
    pub fn seed(&self, table: &str, row: Value) {
        self.tables.entry(table.to_string()).or_default().push(row);
    }

    /// Make the next store operation fail with the given message
    pub fn fail_next(&self, message: impl Into<String>) {
        *self.next_failure.lock() = Some(message.into());
    }

    /// Number of rows currently in a table
    pub fn table_len(&self, table: &str) -> usize {
        self.tables.get(table).map(|t| t.len()).unwrap_or(0)
    }

    fn take_failure(&self, table: &str) -> Result<()> {
        if let Some(message) = self.next_failure.lock().take() {
            return Err(SecurityError::data_access(table, message));
        }
        Ok(())
    }

    fn matching(&self, table: &str, filters: &[Filter]) -> Vec<Value> {
        self.tables
            .get(table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| filters.iter().all(|f| filter_matches(row, f)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn filter_matches(row: &Value, filter: &Filter) -> bool {
    let Some(field) = row.get(&filter.column) else {
        return false;
    };
    match filter.op {
        FilterOp::Eq => field == &filter.value,
        FilterOp::Gte => value_gte(field, &filter.value),
    }
}

fn value_gte(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            x.as_f64().unwrap_or(f64::NAN) >= y.as_f64().unwrap_or(f64::NAN)
        }
        // RFC 3339 UTC timestamps order lexicographically
        (Value::String(x), Value::String(y)) => x.as_str() >= y.as_str(),
        _ => false,
    }
}

fn compare_columns(a: &Value, b: &Value, column: &str) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    match (a.get(column), b.get(column)) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .unwrap_or(f64::NAN)
            .partial_cmp(&y.as_f64().unwrap_or(f64::NAN))
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl DataStore for MemoryDataStore {
    async fn select(
        &self,
        table: &str,
        filters: &[Filter],
        order: Option<&Order>,
        range: Option<RowRange>,
    ) -> Result<Vec<Value>> {
        self.take_failure(table)?;
        let mut rows = self.matching(table, filters);

        if let Some(order) = order {
            rows.sort_by(|a, b| {
                let ord = compare_columns(a, b, &order.column);
                if order.ascending { ord } else { ord.reverse() }
            });
        }

        if let Some(range) = range {
            let from = (range.from as usize).min(rows.len());
            let to = ((range.to as usize).saturating_add(1)).min(rows.len());
            rows = rows[from..to].to_vec();
        }

        Ok(rows)
    }

    async fn select_one(&self, table: &str, filters: &[Filter]) -> Result<Option<Value>> {
        self.take_failure(table)?;
        Ok(self.matching(table, filters).into_iter().next())
    }

    async fn count(&self, table: &str, filters: &[Filter]) -> Result<u64> {
        self.take_failure(table)?;
        Ok(self.matching(table, filters).len() as u64)
    }

    async fn insert(&self, table: &str, row: Value) -> Result<Value> {
        self.take_failure(table)?;
        let mut row = row;
        if let Value::Object(ref mut map) = row {
            map.entry("id".to_string())
                .or_insert_with(|| Value::String(Uuid::new_v4().to_string()));
        }
        self.tables
            .entry(table.to_string())
            .or_default()
            .push(row.clone());
        Ok(row)
    }

    async fn update(&self, table: &str, filters: &[Filter], patch: Value) -> Result<Vec<Value>> {
        self.take_failure(table)?;
        let mut updated = Vec::new();
        if let Some(mut rows) = self.tables.get_mut(table) {
            for row in rows.iter_mut() {
                if filters.iter().all(|f| filter_matches(row, f)) {
                    if let (Value::Object(target), Value::Object(source)) = (&mut *row, &patch) {
                        for (key, value) in source {
                            target.insert(key.clone(), value.clone());
                        }
                    }
                    updated.push(row.clone());
                }
            }
        }
        Ok(updated)
    }

    async fn delete(&self, table: &str, filters: &[Filter]) -> Result<u64> {
        self.take_failure(table)?;
        let mut removed = 0;
        if let Some(mut rows) = self.tables.get_mut(table) {
            let before = rows.len();
            rows.retain(|row| !filters.iter().all(|f| filter_matches(row, f)));
            removed = (before - rows.len()) as u64;
        }
        Ok(removed)
    }
}
