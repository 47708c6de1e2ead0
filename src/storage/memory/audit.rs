//! In-memory audit sink

use crate::audit::AuditSink;
use crate::core::models::AuditEntry;
use crate::utils::error::{Result, SecurityError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// Inspectable [`AuditSink`] for tests, with a failure toggle
#[derive(Default)]
pub struct MemoryAuditSink {
    entries: Mutex<Vec<AuditEntry>>,
    failing: AtomicBool,
}

impl MemoryAuditSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle failure mode; while set, every append errors
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Snapshot of all recorded entries
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries.lock().clone()
    }

    /// Entries recorded for a given action name
    pub fn entries_for(&self, action: &str) -> Vec<AuditEntry> {
        self.entries
            .lock()
            .iter()
            .filter(|e| e.action == action)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl AuditSink for MemoryAuditSink {
    async fn append(&self, entry: &AuditEntry) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(SecurityError::data_access("audit", "sink unavailable"));
        }
        self.entries.lock().push(entry.clone());
        Ok(())
    }
}
