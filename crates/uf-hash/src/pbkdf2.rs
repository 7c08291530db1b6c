//! PBKDF2-HMAC-SHA512 hashing strategy.
//!
//! Kept for stores whose credentials were written by hosts that default
//! to PBKDF2. Salt and derived key are stored base64-encoded in separate
//! fields of the secret payload.

use std::num::NonZeroU32;

use aws_lc_rs::pbkdf2;
use aws_lc_rs::rand::{SecureRandom, SystemRandom};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use uf_model::{PasswordCredentialData, PasswordPolicy, PasswordSecretData, StoredCredential};

use crate::error::{HashError, HashResult};
use crate::provider::{EncodedPassword, PasswordHashProvider};

/// Algorithm tag for this strategy.
pub const ALGORITHM: &str = "pbkdf2-sha512";

/// Default iteration count.
pub const DEFAULT_ITERATIONS: u32 = 210_000;

/// Salt length in bytes.
const SALT_LENGTH: usize = 16;

/// Derived key length in bytes (SHA-512 output size).
const KEY_LENGTH: usize = 64;

/// PBKDF2-HMAC-SHA512 password hashing strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pbkdf2HashProvider;

impl Pbkdf2HashProvider {
    /// Creates the strategy.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn iteration_count(iterations: u32) -> HashResult<NonZeroU32> {
        NonZeroU32::new(iterations)
            .ok_or_else(|| HashError::Hashing("iteration count must be non-zero".to_string()))
    }
}

impl PasswordHashProvider for Pbkdf2HashProvider {
    fn algorithm(&self) -> &'static str {
        ALGORITHM
    }

    fn encode(&self, secret: &str, iterations: Option<u32>) -> HashResult<EncodedPassword> {
        let iterations = iterations.unwrap_or(DEFAULT_ITERATIONS);
        let count = Self::iteration_count(iterations)?;

        let mut salt = [0u8; SALT_LENGTH];
        SystemRandom::new()
            .fill(&mut salt)
            .map_err(|_| HashError::Hashing("salt generation failed".to_string()))?;

        let mut key = [0u8; KEY_LENGTH];
        pbkdf2::derive(
            pbkdf2::PBKDF2_HMAC_SHA512,
            count,
            &salt,
            secret.as_bytes(),
            &mut key,
        );

        Ok(EncodedPassword {
            secret_data: PasswordSecretData::with_salt(BASE64.encode(key), BASE64.encode(salt)),
            credential_data: PasswordCredentialData::new(ALGORITHM, Some(iterations)),
        })
    }

    fn verify(&self, secret: &str, credential: &StoredCredential) -> HashResult<bool> {
        let secret_data = credential
            .password_secret_data()
            .map_err(|e| HashError::MalformedHash(e.to_string()))?;
        let data = credential
            .password_credential_data()
            .map_err(|e| HashError::MalformedHash(e.to_string()))?;

        let salt = secret_data
            .salt
            .as_deref()
            .ok_or_else(|| HashError::MalformedHash("missing salt".to_string()))
            .and_then(|s| {
                BASE64
                    .decode(s)
                    .map_err(|e| HashError::MalformedHash(e.to_string()))
            })?;
        let expected = BASE64
            .decode(&secret_data.value)
            .map_err(|e| HashError::MalformedHash(e.to_string()))?;

        let count = Self::iteration_count(data.hash_iterations.unwrap_or(DEFAULT_ITERATIONS))?;

        // Constant-time comparison inside aws-lc-rs
        Ok(pbkdf2::verify(
            pbkdf2::PBKDF2_HMAC_SHA512,
            count,
            &salt,
            secret.as_bytes(),
            &expected,
        )
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
