//! Core components of the secure data access layer

pub mod authorize;
pub mod catalog;
pub mod dal;
pub mod dto;
pub mod models;
pub mod rate_limiter;
pub mod sanitize;

pub use authorize::{Authorizer, OwnershipCheck, OwnershipRegistry};
pub use catalog::PermissionCatalog;
pub use dal::{
    BatchQuery, CacheSpec, Page, QuerySpec, ScopeColumns, SecureDal, SecurityCore, TransactionOp,
    role_scope_filters,
};
pub use models::{
    Action, AuditEntry, Grant, PermissionSet, RequestMeta, ResourceContext, ResourceKind,
    UserRole, VerifiedSession, permission_key,
};
pub use rate_limiter::RateLimiter;
pub use sanitize::{create_secure_dto, sanitize_input};
