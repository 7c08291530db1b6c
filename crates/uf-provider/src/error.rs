//! Federation error types.
//!
//! Lookup misses are not errors: absent users surface as `Ok(None)` from
//! the directory facade, and verification failures surface as `false`
//! from the verifier. These variants cover the cases that genuinely must
//! reach the host.

use thiserror::Error;
use uf_storage::StorageError;

/// Errors that can occur during federation operations.
#[derive(Debug, Error)]
pub enum FederationError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A namespaced user id could not be parsed.
    #[error("Invalid user id: {0}")]
    InvalidId(String),

    /// An attribute value could not be applied.
    #[error("Invalid value for attribute '{name}': {reason}")]
    InvalidAttribute {
        /// Attribute name.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// Storage error from the backing store.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Internal error.
    #[error("Internal federation error: {0}")]
    Internal(String),
}

impl FederationError {
    /// Creates a configuration error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Creates an invalid id error.
    #[must_use]
    pub fn invalid_id(id: impl Into<String>) -> Self {
        Self::InvalidId(id.into())
    }

    /// Creates an invalid attribute error.
    #[must_use]
    pub fn invalid_attribute(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidAttribute {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Checks if this is a storage error.
    #[must_use]
    pub const fn is_storage_error(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}

/// Result type for federation operations.
pub type FederationResult<T> = Result<T, FederationError>;
