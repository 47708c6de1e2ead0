//! Error handling for the data access core
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;
use uuid::Uuid;

/// Result type alias for the data access core
pub type Result<T> = std::result::Result<T, SecurityError>;

/// Main error type for the data access core
#[derive(Error, Debug)]
pub enum SecurityError {
    /// No verified identity is present on the request
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The identity exists but has no profile record
    #[error("Profile not found for user {0}")]
    ProfileNotFound(Uuid),

    /// Permission or resource-access denial; carries the attempted permission key
    #[error("Permission denied: {permission}")]
    Authorization {
        /// The `resource:action` key that was denied
        permission: String,
    },

    /// Too many attempts for an operation within the trailing window
    #[error("Rate limit exceeded for '{operation}': {count}/{limit}")]
    RateLimitExceeded {
        /// Operation that was throttled
        operation: String,
        /// Attempts observed in the window
        count: u64,
        /// Configured limit
        limit: u32,
    },

    /// An underlying store operation failed
    #[error("Data access failed for {resource}: {message}")]
    DataAccess {
        /// Resource the operation was addressing
        resource: String,
        /// Underlying store message
        message: String,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SecurityError {
    /// Create an authentication error
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication(message.into())
    }

    /// Create an authorization error for a permission key
    pub fn authorization(permission: impl Into<String>) -> Self {
        Self::Authorization {
            permission: permission.into(),
        }
    }

    /// Create a data access error wrapping an underlying store message
    pub fn data_access(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DataAccess {
            resource: resource.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether this error is an authorization denial
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::Authorization { .. })
    }

    /// Whether this error halted the operation before any store call
    pub fn is_pre_store(&self) -> bool {
        matches!(
            self,
            Self::Authentication(_)
                | Self::ProfileNotFound(_)
                | Self::Authorization { .. }
                | Self::RateLimitExceeded { .. }
        )
    }
}
