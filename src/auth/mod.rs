//! Identity verification and session resolution
//!
//! Builds the request's [`VerifiedSession`] from the identity store and the
//! profile row. The role is read from the immutable identity claims first,
//! with the user-editable profile row as a fallback, so a caller cannot
//! escalate privileges by editing their own profile.

use crate::audit::AuditLogger;
use crate::config::models::AuthConfig;
use crate::core::catalog::PermissionCatalog;
use crate::core::models::{AuditEntry, RequestMeta, VerifiedSession};
use crate::storage::{IdentityStore, ProfileStore};
use crate::utils::error::{Result, SecurityError};
use std::sync::Arc;
use tracing::debug;

/// Resolves the ambient request's caller into a verified session
pub struct IdentityResolver {
    identity: Arc<dyn IdentityStore>,
    profiles: Arc<dyn ProfileStore>,
    catalog: Arc<PermissionCatalog>,
    audit: Arc<AuditLogger>,
    config: Arc<AuthConfig>,
    meta: RequestMeta,
}

impl IdentityResolver {
    /// Create a resolver for one request
    pub fn new(
        identity: Arc<dyn IdentityStore>,
        profiles: Arc<dyn ProfileStore>,
        catalog: Arc<PermissionCatalog>,
        audit: Arc<AuditLogger>,
        config: Arc<AuthConfig>,
        meta: RequestMeta,
    ) -> Self {
        Self {
            identity,
            profiles,
            catalog,
            audit,
            config,
            meta,
        }
    }

    /// Verify the caller and build a session.
    ///
    /// Fails with [`SecurityError::Authentication`] when no valid identity
    /// is present and [`SecurityError::ProfileNotFound`] when the identity
    /// has no profile row; both failures are audited first. Callers hold
    /// the result for the request's lifetime; resolution runs at most once
    /// per request through [`SecureDal`](crate::core::dal::SecureDal).
    pub async fn resolve(&self) -> Result<VerifiedSession> {
        let identity = match self.identity.current_identity().await {
            Ok(Some(identity)) => identity,
            Ok(None) => {
                return Err(self.auth_failure("No valid session").await);
            }
            Err(error) => {
                return Err(self.auth_failure(&error.to_string()).await);
            }
        };

        let profile = match self.profiles.profile(identity.id).await {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                self.audit
                    .log(
                        AuditEntry::failure(
                            identity.id.to_string(),
                            "profile_fetch_failure",
                            "profile",
                        )
                        .with_error("profile row missing")
                        .with_meta(&self.meta),
                    )
                    .await;
                return Err(SecurityError::ProfileNotFound(identity.id));
            }
            Err(error) => {
                self.audit
                    .log(
                        AuditEntry::failure(
                            identity.id.to_string(),
                            "profile_fetch_failure",
                            "profile",
                        )
                        .with_error(error.to_string())
                        .with_meta(&self.meta),
                    )
                    .await;
                return Err(SecurityError::ProfileNotFound(identity.id));
            }
        };

        // Immutable claim wins; the profile row is a last resort.
        let role = identity
            .claims
            .role
            .or(profile.role)
            .unwrap_or(self.config.default_role);
        let salon_id = profile.salon_id.or(identity.claims.salon_id);
        let permissions = self.catalog.expand(role);

        debug!(user = %identity.id, %role, "session resolved");

        Ok(VerifiedSession::new(
            identity.id,
            identity.email,
            role,
            salon_id,
            permissions,
        ))
    }

    async fn auth_failure(&self, message: &str) -> SecurityError {
        self.audit
            .log(
                AuditEntry::failure("anonymous", "auth_failure", "session")
                    .with_error(message)
                    .with_meta(&self.meta),
            )
            .await;
        SecurityError::authentication(message)
    }
}
