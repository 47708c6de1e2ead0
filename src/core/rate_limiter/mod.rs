//! Sliding-window rate limiting
//!
//! Counts recent attempt records for a (user, operation) pair in the data
//! store and denies once the trailing window is full. This is a
//! sliding-window counter, not a token bucket.

use crate::audit::AuditLogger;
use crate::config::models::RateLimitConfig;
use crate::core::models::AuditEntry;
use crate::storage::{DataStore, Filter};
use crate::utils::error::{Result, SecurityError};
use chrono::{SecondsFormat, Utc};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

/// Store-backed sliding-window rate limiter
#[derive(Clone)]
pub struct RateLimiter {
    store: Arc<dyn DataStore>,
    audit: Arc<AuditLogger>,
    config: RateLimitConfig,
}

impl RateLimiter {
    /// Create a limiter over the given store
    pub fn new(store: Arc<dyn DataStore>, audit: Arc<AuditLogger>, config: RateLimitConfig) -> Self {
        Self {
            store,
            audit,
            config,
        }
    }

    /// Check an attempt against a limit within a trailing window.
    ///
    /// Allowed attempts append a record; denied attempts leave a
    /// `rate_limit_exceeded` audit entry instead. The count-then-append is
    /// not atomic: concurrent attempts for the same user can each observe
    /// the pre-increment count and all pass at the boundary.
    pub async fn check(
        &self,
        user_id: Uuid,
        operation: &str,
        limit: u32,
        window: Duration,
    ) -> Result<bool> {
        Ok(self
            .evaluate(user_id, operation, limit, window)
            .await?
            .is_none())
    }

    /// [`check`](Self::check), failing with
    /// [`SecurityError::RateLimitExceeded`] on denial
    pub async fn enforce(
        &self,
        user_id: Uuid,
        operation: &str,
        limit: u32,
        window: Duration,
    ) -> Result<()> {
        match self.evaluate(user_id, operation, limit, window).await? {
            None => Ok(()),
            Some(count) => Err(SecurityError::RateLimitExceeded {
                operation: operation.to_string(),
                count,
                limit,
            }),
        }
    }

    /// Returns `None` when allowed, or `Some(count)` observed on denial
    async fn evaluate(
        &self,
        user_id: Uuid,
        operation: &str,
        limit: u32,
        window: Duration,
    ) -> Result<Option<u64>> {
        if !self.config.enabled {
            return Ok(None);
        }

        let now = Utc::now();
        let window_start = now
            - chrono::Duration::milliseconds(window.as_millis().min(i64::MAX as u128) as i64);
        let filters = [
            Filter::eq("user_id", user_id.to_string()),
            Filter::eq("operation", operation),
            Filter::gte(
                "created_at",
                window_start.to_rfc3339_opts(SecondsFormat::Micros, true),
            ),
        ];

        let count = self.store.count(&self.config.table, &filters).await?;

        if count >= u64::from(limit) {
            debug!(
                user = %user_id,
                operation,
                count,
                limit,
                "rate limit exceeded"
            );
            self.audit
                .log(
                    AuditEntry::failure(user_id.to_string(), "rate_limit_exceeded", operation)
                        .with_error(format!(
                            "Rate limit exceeded: {}/{} in {}ms",
                            count,
                            limit,
                            window.as_millis()
                        )),
                )
                .await;
            return Ok(Some(count));
        }

        self.store
            .insert(
                &self.config.table,
                json!({
                    "user_id": user_id.to_string(),
                    "operation": operation,
                    "created_at": now.to_rfc3339_opts(SecondsFormat::Micros, true),
                }),
            )
            .await?;

        Ok(None)
    }

    /// Check an attempt using the configured default limit and window
    pub async fn check_default(&self, user_id: Uuid, operation: &str) -> Result<bool> {
        self.check(
            user_id,
            operation,
            self.config.default_limit,
            Duration::from_millis(self.config.default_window_ms),
        )
        .await
    }
}
