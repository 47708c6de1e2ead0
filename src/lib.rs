//! # salon-dal
//!
//! Secure multi-tenant data access core for a salon booking platform.
//! Feature modules never talk to the hosted data store directly: they call
//! through the secure access patterns here, which verify the caller once
//! per request, authorize against the role/permission catalog, sanitize
//! input, and strip sensitive fields from every result.
//!
//! ## Features
//!
//! - **Request-scoped identity verification**: the session is resolved from
//!   immutable identity claims at most once per logical request
//! - **Role/permission catalog**: typed grants with wildcard expansion and
//!   a universal-access sentinel for the platform administrator
//! - **Ownership and salon rules**: resource ownership grants read/update;
//!   salon membership grants staff full access to salon resources
//! - **Sliding-window rate limiting** over the data store
//! - **Best-effort audit trail** of authorization decisions
//! - **Secure access patterns**: query, mutation, batch, paginated, cached,
//!   and permission-gated transaction wrappers
//!
//! ## Quick start
//!
//! ```ignore
//! use salon_dal::{Config, ResourceKind, SecurityCore, StorageLayer};
//!
//! let core = SecurityCore::new(storage, audit_sink, Config::default());
//!
//! // Per request:
//! let dal = core.request(identity_store, request_meta);
//! let services = dal
//!     .query(ResourceKind::Service, |store, session| async move {
//!         store.select("services", &[], None, None).await.map(Into::into)
//!     })
//!     .await?;
//! ```

#![warn(clippy::all)]

pub mod audit;
pub mod auth;
pub mod config;
pub mod core;
pub mod storage;
pub mod utils;

// Re-export the exposed surface
pub use audit::{AuditLogger, AuditSink, TableAuditSink};
pub use auth::IdentityResolver;
pub use config::Config;
pub use crate::core::dto::{
    AppointmentDto, PublicProfileDto, SalonPublicDto, StaffPublicDto, UserProfileDto,
};
pub use crate::core::{
    Action, AuditEntry, Authorizer, BatchQuery, CacheSpec, Grant, OwnershipCheck,
    OwnershipRegistry, Page, PermissionCatalog, PermissionSet, QuerySpec, RateLimiter, RequestMeta,
    ResourceContext, ResourceKind, ScopeColumns, SecureDal, SecurityCore, TransactionOp, UserRole,
    VerifiedSession, create_secure_dto, permission_key, role_scope_filters, sanitize_input,
};
pub use storage::{
    CacheBackend, DataStore, Filter, FilterOp, Identity, IdentityClaims, IdentityStore, Order,
    Profile, ProfileStore, RowRange, StorageLayer,
};
pub use utils::error::{Result, SecurityError};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
