//! Argon2id hashing strategy.
//!
//! Follows the OWASP recommended cost settings. The PHC-formatted hash
//! carries its own salt, so `secret_data.salt` stays empty.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use uf_model::{PasswordCredentialData, PasswordPolicy, PasswordSecretData, StoredCredential};

use crate::error::{HashError, HashResult};
use crate::provider::{EncodedPassword, PasswordHashProvider};

/// Algorithm tag for this strategy.
pub const ALGORITHM: &str = "argon2id";

/// Default time cost (iterations).
pub const DEFAULT_ITERATIONS: u32 = 2;

/// Memory cost in KiB.
const MEMORY_COST: u32 = 19 * 1024;

/// Parallelism factor.
const PARALLELISM: u32 = 1;

/// Output hash length in bytes.
const HASH_LENGTH: usize = 32;

/// Argon2id password hashing strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2HashProvider;

impl Argon2HashProvider {
    /// Creates the strategy.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn hasher(iterations: u32) -> HashResult<Argon2<'static>> {
        let params = Params::new(MEMORY_COST, iterations, PARALLELISM, Some(HASH_LENGTH))
            .map_err(|e| HashError::Hashing(e.to_string()))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

impl PasswordHashProvider for Argon2HashProvider {
    fn algorithm(&self) -> &'static str {
        ALGORITHM
    }

    fn encode(&self, secret: &str, iterations: Option<u32>) -> HashResult<EncodedPassword> {
        let iterations = iterations.unwrap_or(DEFAULT_ITERATIONS);
        let salt = SaltString::generate(&mut OsRng);

        let hash = Self::hasher(iterations)?
            .hash_password(secret.as_bytes(), &salt)
            .map_err(|e| HashError::Hashing(e.to_string()))?;

        Ok(EncodedPassword {
            secret_data: PasswordSecretData::new(hash.to_string()),
            credential_data: PasswordCredentialData::new(ALGORITHM, Some(iterations)),
        })
    }

    fn verify(&self, secret: &str, credential: &StoredCredential) -> HashResult<bool> {
        let secret_data = credential
            .password_secret_data()
            .map_err(|e| HashError::MalformedHash(e.to_string()))?;

        let parsed = PasswordHash::new(&secret_data.value)
            .map_err(|e| HashError::MalformedHash(e.to_string()))?;

        // Argon2::default() verifies any Argon2 variant and parameter set
        Ok(Argon2::default()
            .verify_password(secret.as_bytes(), &parsed)
            .is_ok())
    }

    fn policy_check(&self, policy: Option<&PasswordPolicy>, credential: &StoredCredential) -> bool {
        let Ok(data) = credential.password_credential_data() else {
            return false;
        };

        let required_algorithm = policy
            .and_then(|p| p.hash_algorithm.as_deref())
            .unwrap_or(ALGORITHM);
        if data.algorithm != required_algorithm {
            return false;
        }

        let required_iterations = policy
            .and_then(|p| p.hash_iterations)
            .unwrap_or(DEFAULT_ITERATIONS);
        data.hash_iterations.unwrap_or(DEFAULT_ITERATIONS) == required_iterations
    }
}
