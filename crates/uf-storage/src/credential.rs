//! Credential storage trait.

use async_trait::async_trait;
use uf_model::{CredentialType, StoredCredential};
use uuid::Uuid;

use crate::error::StorageResult;

/// Persistence boundary for stored credentials.
///
/// ## Security Note
///
/// Credential payloads contain password hashes and must never be logged.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Creates a new credential.
    async fn create(&self, credential: &StoredCredential) -> StorageResult<()>;

    /// Replaces a stored credential by id.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::NotFound` if the credential doesn't exist.
    async fn update(&self, credential: &StoredCredential) -> StorageResult<()>;

    /// Deletes a credential by id.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::NotFound` if the credential doesn't exist.
    async fn delete(&self, profile_id: Uuid, id: Uuid) -> StorageResult<()>;

    /// Lists credentials of a specific type for a profile, in stored order.
    async fn list_by_type(
        &self,
        profile_id: Uuid,
        credential_type: CredentialType,
    ) -> StorageResult<Vec<StoredCredential>>;

    /// Gets the password credential for a profile, if any.
    ///
    /// When several password credentials exist, the first in stored order
    /// wins.
    async fn get_password(&self, profile_id: Uuid) -> StorageResult<Option<StoredCredential>> {
        let credentials = self
            .list_by_type(profile_id, CredentialType::Password)
            .await?;
        Ok(credentials.into_iter().next())
    }
}
