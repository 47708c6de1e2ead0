//! Configuration models

pub mod audit;
pub mod auth;
pub mod cache;
pub mod rate_limit;

pub use audit::AuditConfig;
pub use auth::AuthConfig;
pub use cache::CacheConfig;
pub use rate_limit::RateLimitConfig;
