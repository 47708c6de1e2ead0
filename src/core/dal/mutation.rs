//! Mutation-side secure access pattern

use super::{SecureDal, wrap_store_error};
use crate::core::models::{Action, ResourceKind, VerifiedSession};
use crate::core::sanitize::{sanitize_input, strip_rows};
use crate::storage::DataStore;
use crate::utils::error::Result;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;

impl SecureDal {
    /// Write through a caller-supplied store operation.
    ///
    /// Input is sanitized before anything else; the permission for the
    /// requested action is checked before the store is touched. The store
    /// operation receives the sanitized input, and the result is stripped
    /// of sensitive fields.
    pub async fn mutate<F, Fut>(
        &self,
        kind: ResourceKind,
        action: Action,
        input: Value,
        mutation: F,
    ) -> Result<Value>
    where
        F: FnOnce(Arc<dyn DataStore>, VerifiedSession, Value) -> Fut,
        Fut: Future<Output = Result<Value>>,
    {
        self.mutate_with(kind, action, input, mutation, strip_rows).await
    }

    /// [`mutate`](Self::mutate) with a caller-supplied result transform
    /// replacing the default strip
    pub async fn mutate_with<F, Fut, T>(
        &self,
        kind: ResourceKind,
        action: Action,
        input: Value,
        mutation: F,
        transform: impl FnOnce(Value) -> T,
    ) -> Result<T>
    where
        F: FnOnce(Arc<dyn DataStore>, VerifiedSession, Value) -> Fut,
        Fut: Future<Output = Result<Value>>,
    {
        let sanitized = sanitize_input(input);
        let session = self.authorize(kind, action).await?;
        let raw = mutation(self.storage.data.clone(), session, sanitized)
            .await
            .map_err(|e| wrap_store_error(kind, e))?;
        Ok(transform(raw))
    }
}
