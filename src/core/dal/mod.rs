//! Secure access patterns
//!
//! Every feature module reaches the data store through these patterns
//! instead of touching it directly. Each pattern resolves the caller's
//! session once per request, authorizes before any store call, sanitizes
//! mutation input, wraps store failures, and strips sensitive fields from
//! results.

mod batch;
mod mutation;
mod query;
pub mod scope;
mod types;

#[cfg(test)]
mod tests;

pub use scope::{ScopeColumns, role_scope_filters};
pub use types::{BatchQuery, CacheSpec, Page, QueryFn, QuerySpec, TransactionOp};

use crate::audit::{AuditLogger, AuditSink};
use crate::auth::IdentityResolver;
use crate::config::Config;
use crate::core::authorize::{Authorizer, OwnershipRegistry};
use crate::core::catalog::PermissionCatalog;
use crate::core::models::{
    Action, RequestMeta, ResourceContext, ResourceKind, VerifiedSession, permission_key,
};
use crate::core::rate_limiter::RateLimiter;
use crate::storage::{IdentityStore, StorageLayer};
use crate::utils::error::{Result, SecurityError};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{error, info};

/// Long-lived assembly of the security components.
///
/// Built once at startup and shared; per-request state lives in the
/// [`SecureDal`] handles it hands out.
#[derive(Clone)]
pub struct SecurityCore {
    catalog: Arc<PermissionCatalog>,
    authorizer: Arc<Authorizer>,
    storage: Arc<StorageLayer>,
    audit: Arc<AuditLogger>,
    rate_limiter: Arc<RateLimiter>,
    config: Arc<Config>,
}

impl SecurityCore {
    /// Assemble the core over the given collaborators
    pub fn new(storage: StorageLayer, audit_sink: Arc<dyn AuditSink>, config: Config) -> Self {
        info!("Initializing security core");

        let config = Arc::new(config);
        let audit = Arc::new(AuditLogger::new(audit_sink, &config.audit));
        let catalog = Arc::new(PermissionCatalog::new());
        let authorizer = Arc::new(Authorizer::new(storage.data.clone(), audit.clone()));
        let rate_limiter = Arc::new(RateLimiter::new(
            storage.data.clone(),
            audit.clone(),
            config.rate_limit.clone(),
        ));

        Self {
            catalog,
            authorizer,
            storage: Arc::new(storage),
            audit,
            rate_limiter,
            config,
        }
    }

    /// Replace the ownership registry used for resource-access checks
    pub fn with_ownership(mut self, registry: OwnershipRegistry) -> Self {
        self.authorizer = Arc::new(Authorizer::with_registry(
            self.storage.data.clone(),
            self.audit.clone(),
            registry,
        ));
        self
    }

    /// Open a request-scoped handle for the given caller.
    ///
    /// The identity store carries the ambient request's credentials; one
    /// handle corresponds to one logical request.
    pub fn request(&self, identity: Arc<dyn IdentityStore>, meta: RequestMeta) -> SecureDal {
        let resolver = IdentityResolver::new(
            identity,
            self.storage.profiles.clone(),
            self.catalog.clone(),
            self.audit.clone(),
            Arc::new(self.config.auth.clone()),
            meta,
        );
        SecureDal {
            storage: self.storage.clone(),
            authorizer: self.authorizer.clone(),
            config: self.config.clone(),
            resolver,
            session: OnceCell::new(),
        }
    }

    /// The permission and resource-access evaluator
    pub fn authorizer(&self) -> &Authorizer {
        &self.authorizer
    }

    /// The sliding-window rate limiter
    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }

    /// The permission catalog
    pub fn catalog(&self) -> &PermissionCatalog {
        &self.catalog
    }

    /// The active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Request-scoped secure data access handle.
///
/// Memoizes the resolved session for its lifetime, so identity verification
/// round-trips happen at most once per logical request. The handle holds no
/// process-global state; concurrent requests are fully independent.
pub struct SecureDal {
    pub(crate) storage: Arc<StorageLayer>,
    pub(crate) authorizer: Arc<Authorizer>,
    pub(crate) config: Arc<Config>,
    resolver: IdentityResolver,
    session: OnceCell<VerifiedSession>,
}

impl SecureDal {
    /// The caller's verified session, resolving it on first use
    pub async fn session(&self) -> Result<&VerifiedSession> {
        self.session
            .get_or_try_init(|| self.resolver.resolve())
            .await
    }

    /// Resolve the session and require a permission, failing with the
    /// attempted permission key on denial
    pub(crate) async fn authorize(
        &self,
        kind: ResourceKind,
        action: Action,
    ) -> Result<VerifiedSession> {
        let session = self.session().await?;
        let context = ResourceContext::new(kind, action);
        if !self.authorizer.check_permission(session, &context).await {
            return Err(SecurityError::authorization(permission_key(kind, action)));
        }
        Ok(session.clone())
    }
}

/// Wrap a store failure with the resource it was addressing
pub(crate) fn wrap_store_error(kind: ResourceKind, source: SecurityError) -> SecurityError {
    error!(resource = %kind, error = %source, "store operation failed");
    SecurityError::data_access(kind.to_string(), source.to_string())
}
