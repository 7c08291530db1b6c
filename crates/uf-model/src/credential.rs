//! Credential domain model.
//!
//! Stored credentials are authentication factors attached to a profile.
//! This provider only validates the password type; other types are listed
//! so the host's credential-management surface can enumerate them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Credential type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialType {
    /// Password credential.
    Password,
    /// TOTP (Time-based One-Time Password) credential.
    Totp,
    /// Recovery codes.
    RecoveryCodes,
}

impl CredentialType {
    /// Returns the string representation used in storage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Password => "password",
            Self::Totp => "otp",
            Self::RecoveryCodes => "recovery-authn-codes",
        }
    }
}

/// A credential input presented by the host during authentication.
///
/// Modeled as a tagged variant over input kinds so every call site handles
/// each kind exhaustively instead of downcasting at runtime.
#[derive(Debug, Clone)]
pub enum CredentialInput {
    /// A challenge/response secret: the plaintext-equivalent value to be
    /// checked against a stored encoding.
    Password {
        /// The presented secret.
        secret: String,
    },
    /// A one-time password code. Not validated by this provider.
    Otp {
        /// The presented code.
        code: String,
    },
}

impl CredentialInput {
    /// Creates a password challenge/response input.
    #[must_use]
    pub fn password(secret: impl Into<String>) -> Self {
        Self::Password {
            secret: secret.into(),
        }
    }
}

/// A stored credential belonging to a profile.
///
/// `secret_data` and `credential_data` are JSON documents
/// ([`PasswordSecretData`] and [`PasswordCredentialData`] for the password
/// type). They contain sensitive material and must never be logged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCredential {
    /// Unique identifier.
    pub id: Uuid,
    /// Profile this credential belongs to.
    pub profile_id: Uuid,
    /// Credential type.
    pub credential_type: CredentialType,
    /// User-visible label (e.g., "My laptop password").
    pub user_label: Option<String>,
    /// When the credential was created.
    pub created_at: DateTime<Utc>,
    /// Secret data (e.g., encoded password hash plus salt).
    pub secret_data: String,
    /// Algorithm metadata (e.g., hash algorithm tag, iteration count).
    pub credential_data: String,
    /// Priority for ordering credentials of the same type.
    pub priority: i32,
}

impl StoredCredential {
    /// Creates a new credential.
    #[must_use]
    pub fn new(
        profile_id: Uuid,
        credential_type: CredentialType,
        secret_data: impl Into<String>,
        credential_data: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            profile_id,
            credential_type,
            user_label: None,
            created_at: Utc::now(),
            secret_data: secret_data.into(),
            credential_data: credential_data.into(),
            priority: 0,
        }
    }

    /// Creates a password credential from already-encoded material.
    #[must_use]
    pub fn new_password(
        profile_id: Uuid,
        secret: &PasswordSecretData,
        data: &PasswordCredentialData,
    ) -> Self {
        Self::new(
            profile_id,
            CredentialType::Password,
            serde_json::to_string(secret).unwrap_or_default(),
            serde_json::to_string(data).unwrap_or_default(),
        )
    }

    /// Sets the user label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.user_label = Some(label.into());
        self
    }

    /// Checks if this is a password credential.
    #[must_use]
    pub const fn is_password(&self) -> bool {
        matches!(self.credential_type, CredentialType::Password)
    }

    /// Builds a replacement credential carrying a new password payload.
    ///
    /// The identifier, creation timestamp, user label, and priority of
    /// this credential are preserved; only the encoded material changes.
    #[must_use]
    pub fn with_password_payload(
        &self,
        secret: &PasswordSecretData,
        data: &PasswordCredentialData,
    ) -> Self {
        Self {
            id: self.id,
            profile_id: self.profile_id,
            credential_type: CredentialType::Password,
            user_label: self.user_label.clone(),
            created_at: self.created_at,
            secret_data: serde_json::to_string(secret).unwrap_or_default(),
            credential_data: serde_json::to_string(data).unwrap_or_default(),
            priority: self.priority,
        }
    }

    /// Decodes the algorithm metadata of a password credential.
    ///
    /// # Errors
    ///
    /// Returns a JSON error if `credential_data` is not a valid
    /// [`PasswordCredentialData`] document.
    pub fn password_credential_data(&self) -> Result<PasswordCredentialData, serde_json::Error> {
        serde_json::from_str(&self.credential_data)
    }

    /// Decodes the secret payload of a password credential.
    ///
    /// # Errors
    ///
    /// Returns a JSON error if `secret_data` is not a valid
    /// [`PasswordSecretData`] document.
    pub fn password_secret_data(&self) -> Result<PasswordSecretData, serde_json::Error> {
        serde_json::from_str(&self.secret_data)
    }
}

/// Password algorithm metadata, stored in `credential_data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordCredentialData {
    /// Hash algorithm tag.
    pub algorithm: String,
    /// Iteration count, if the algorithm uses one. `None` means the
    /// provider default.
    pub hash_iterations: Option<u32>,
    /// Additional algorithm-specific parameters.
    #[serde(default)]
    pub additional_parameters: std::collections::HashMap<String, String>,
}

impl PasswordCredentialData {
    /// Creates metadata for the given algorithm and iteration count.
    #[must_use]
    pub fn new(algorithm: impl Into<String>, hash_iterations: Option<u32>) -> Self {
        Self {
            algorithm: algorithm.into(),
            hash_iterations,
            additional_parameters: std::collections::HashMap::new(),
        }
    }
}

/// Password secret payload, stored in `secret_data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordSecretData {
    /// The encoded password hash.
    pub value: String,
    /// Salt, when stored separately from the encoded value.
    pub salt: Option<String>,
}

impl PasswordSecretData {
    /// Creates a secret payload with an inline-salted encoding.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            salt: None,
        }
    }

    /// Creates a secret payload with a separately stored salt.
    #[must_use]
    pub fn with_salt(value: impl Into<String>, salt: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            salt: Some(salt.into()),
        }
    }
}
