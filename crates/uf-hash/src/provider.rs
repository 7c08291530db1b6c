//! Password hashing strategy trait.

use uf_model::{PasswordCredentialData, PasswordPolicy, PasswordSecretData, StoredCredential};

use crate::error::HashResult;

/// The encoded form of a password produced by a strategy.
///
/// This is the payload half of a stored credential; identity fields
/// (id, creation time, label) are owned by the caller.
#[derive(Debug, Clone)]
pub struct EncodedPassword {
    /// Secret payload (encoded value plus salt).
    pub secret_data: PasswordSecretData,
    /// Algorithm metadata (tag plus iteration count).
    pub credential_data: PasswordCredentialData,
}

/// A password hashing strategy.
///
/// One implementation per algorithm tag. Strategies are stateless and
/// shared; configuration (iteration counts) travels in the stored
/// credential and the realm policy, not in the strategy.
pub trait PasswordHashProvider: Send + Sync {
    /// The algorithm tag this strategy handles.
    fn algorithm(&self) -> &'static str;

    /// Encodes a secret with the given iteration count.
    ///
    /// `None` means the strategy's default cost.
    ///
    /// # Errors
    ///
    /// Returns an error if the hashing primitive fails.
    fn encode(&self, secret: &str, iterations: Option<u32>) -> HashResult<EncodedPassword>;

    /// Checks whether the secret reproduces the stored encoding.
    ///
    /// A clean mismatch is `Ok(false)`; an undecodable stored payload is
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored credential payload is malformed.
    fn verify(&self, secret: &str, credential: &StoredCredential) -> HashResult<bool>;

    /// Checks whether the stored credential satisfies the policy.
    ///
    /// The required algorithm and iteration count come from the policy
    /// where set, falling back to this strategy's tag and default cost.
    /// An undecodable payload is reported as non-compliant.
    fn policy_check(&self, policy: Option<&PasswordPolicy>, credential: &StoredCredential) -> bool;
}
