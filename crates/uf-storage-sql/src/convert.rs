//! Conversion between database entities and domain models.

use uf_model::{CredentialType, Profile, StoredCredential};

use crate::entities::{CredentialRow, ProfileRow};

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            username: row.username,
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            dob: row.dob,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<CredentialRow> for StoredCredential {
    fn from(row: CredentialRow) -> Self {
        let credential_type = match row.credential_type.as_str() {
            "otp" => CredentialType::Totp,
            "recovery-authn-codes" => CredentialType::RecoveryCodes,
            // "password" and any unknown type default to Password
            _ => CredentialType::Password,
        };

        Self {
            id: row.id,
            profile_id: row.profile_id,
            credential_type,
            user_label: row.user_label,
            created_at: row.created_at,
            secret_data: row.secret_data,
            credential_data: row.credential_data,
            priority: row.priority,
        }
    }
}
