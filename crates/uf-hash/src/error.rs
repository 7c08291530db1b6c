//! Hashing error types.

use thiserror::Error;

/// Errors that can occur while encoding or verifying a password.
#[derive(Debug, Error)]
pub enum HashError {
    /// No strategy is registered for the algorithm tag.
    #[error("unknown hash algorithm: {0}")]
    UnknownAlgorithm(String),

    /// The stored credential payload could not be decoded.
    #[error("malformed stored hash: {0}")]
    MalformedHash(String),

    /// The hashing primitive itself failed.
    #[error("hashing failed: {0}")]
    Hashing(String),
}

/// Result type for hashing operations.
pub type HashResult<T> = Result<T, HashError>;
