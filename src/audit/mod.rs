//! Security audit trail
//!
//! Append-only recording of authorization decisions and security-relevant
//! events. Delivery is best-effort by design: a failed write is reported to
//! the diagnostic log and swallowed, so auditing never blocks or fails the
//! caller's primary operation.

use crate::config::models::AuditConfig;
use crate::core::models::AuditEntry;
use crate::storage::DataStore;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

/// External append-only intake for audit entries
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Append one entry
    async fn append(&self, entry: &AuditEntry) -> Result<()>;
}

/// Best-effort audit recorder wrapping a sink
#[derive(Clone)]
pub struct AuditLogger {
    sink: Arc<dyn AuditSink>,
    enabled: bool,
}

impl AuditLogger {
    /// Create a logger over the given sink
    pub fn new(sink: Arc<dyn AuditSink>, config: &AuditConfig) -> Self {
        Self {
            sink,
            enabled: config.enabled,
        }
    }

    /// Record an entry.
    ///
    /// Sink failures are reported via `tracing::warn!` and never propagated.
    pub async fn log(&self, entry: AuditEntry) {
        if !self.enabled {
            return;
        }
        if let Err(error) = self.sink.append(&entry).await {
            warn!(
                action = %entry.action,
                resource = %entry.resource,
                %error,
                "audit log write failed"
            );
        }
    }
}

/// Audit sink appending entries to a table in the data store
pub struct TableAuditSink {
    store: Arc<dyn DataStore>,
    table: String,
}

impl TableAuditSink {
    /// Create a sink writing to the configured audit table
    pub fn new(store: Arc<dyn DataStore>, config: &AuditConfig) -> Self {
        Self {
            store,
            table: config.table.clone(),
        }
    }
}

#[async_trait]
impl AuditSink for TableAuditSink {
    async fn append(&self, entry: &AuditEntry) -> Result<()> {
        let row = serde_json::to_value(entry)?;
        self.store.insert(&self.table, row).await?;
        Ok(())
    }
}
