//! Realm password policy.

use serde::{Deserialize, Serialize};

/// Realm-scoped password hashing policy.
///
/// Used only to decide whether a stored credential's encoding is stale.
/// Either field may be unset, in which case the runtime default applies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordPolicy {
    /// Required hash algorithm tag, if the realm pins one.
    pub hash_algorithm: Option<String>,
    /// Required iteration count, if the realm pins one.
    pub hash_iterations: Option<u32>,
}

impl PasswordPolicy {
    /// Creates a policy pinning both algorithm and iteration count.
    #[must_use]
    pub fn new(algorithm: impl Into<String>, iterations: u32) -> Self {
        Self {
            hash_algorithm: Some(algorithm.into()),
            hash_iterations: Some(iterations),
        }
    }

    /// Creates a policy pinning only the iteration count.
    #[must_use]
    pub const fn iterations_only(iterations: u32) -> Self {
        Self {
            hash_algorithm: None,
            hash_iterations: Some(iterations),
        }
    }
}
