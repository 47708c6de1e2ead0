//! Batch query and permission-gated transaction patterns

use super::types::{BatchQuery, TransactionOp};
use super::{SecureDal, wrap_store_error};
use crate::core::models::{Action, ResourceContext, permission_key};
use crate::core::sanitize::strip_rows;
use crate::utils::error::{Result, SecurityError};
use futures::future::join_all;
use serde_json::Value;

impl SecureDal {
    /// Run several read queries as one unit.
    ///
    /// The session is resolved once; read permission for every listed
    /// resource kind is checked in parallel and any denial fails the whole
    /// batch before a single store call. Queries then execute in parallel
    /// and each result is stripped independently.
    pub async fn batch_query(&self, queries: Vec<BatchQuery>) -> Result<Vec<Value>> {
        let session = self.session().await?.clone();

        let checks = join_all(queries.iter().map(|q| {
            let context = ResourceContext::new(q.kind, Action::Read);
            let session = session.clone();
            let authorizer = self.authorizer.clone();
            async move {
                (
                    context.kind,
                    authorizer.check_permission(&session, &context).await,
                )
            }
        }))
        .await;

        if let Some((kind, _)) = checks.iter().find(|(_, allowed)| !allowed) {
            return Err(SecurityError::authorization(permission_key(
                *kind,
                Action::Read,
            )));
        }

        let results = join_all(queries.into_iter().map(|q| {
            let store = self.storage.data.clone();
            let session = session.clone();
            async move { (q.run)(store, session).await.map_err(|e| wrap_store_error(q.kind, e)) }
        }))
        .await;

        results
            .into_iter()
            .map(|result| result.map(strip_rows))
            .collect()
    }

    /// Run several operations as a permission-gated sequence.
    ///
    /// Permissions for every listed operation are checked up front as an
    /// all-or-nothing gate; operations then execute sequentially,
    /// accumulating stripped results. There is no rollback: when a later
    /// operation fails, earlier writes remain applied. True atomicity must
    /// come from the underlying store.
    pub async fn transaction(&self, operations: Vec<TransactionOp>) -> Result<Vec<Value>> {
        let session = self.session().await?.clone();

        let checks = join_all(operations.iter().map(|op| {
            let context = ResourceContext::new(op.kind, op.action);
            let session = session.clone();
            let authorizer = self.authorizer.clone();
            async move {
                (
                    (context.kind, context.action),
                    authorizer.check_permission(&session, &context).await,
                )
            }
        }))
        .await;

        if let Some(((kind, action), _)) = checks.iter().find(|(_, allowed)| !allowed) {
            return Err(SecurityError::authorization(permission_key(*kind, *action)));
        }

        let mut results = Vec::with_capacity(operations.len());
        for op in operations {
            let raw = (op.run)(self.storage.data.clone(), session.clone())
                .await
                .map_err(|e| wrap_store_error(op.kind, e))?;
            results.push(strip_rows(raw));
        }
        Ok(results)
    }
}
