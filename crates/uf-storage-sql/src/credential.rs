//! `PostgreSQL` implementation of the credential store.

use async_trait::async_trait;
use sqlx::PgPool;
use uf_model::{CredentialType, StoredCredential};
use uf_storage::CredentialStore;
use uf_storage::error::StorageResult;
use uuid::Uuid;

use crate::entities::CredentialRow;
use crate::error::{from_sqlx_error, not_found};

/// `PostgreSQL` credential store.
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    /// Creates a new `PostgreSQL` credential store.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn create(&self, credential: &StoredCredential) -> StorageResult<()> {
        sqlx::query(
            r"INSERT INTO credentials (
                id, profile_id, credential_type, user_label,
                created_at, secret_data, credential_data, priority
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(credential.id)
        .bind(credential.profile_id)
        .bind(credential.credential_type.as_str())
        .bind(&credential.user_label)
        .bind(credential.created_at)
        .bind(&credential.secret_data)
        .bind(&credential.credential_data)
        .bind(credential.priority)
        .execute(&self.pool)
        .await
        .map_err(from_sqlx_error)?;

        Ok(())
    }

    async fn update(&self, credential: &StoredCredential) -> StorageResult<()> {
        // Whole-row replace keyed by id: concurrent writers race
        // last-writer-wins, never a partial record
        let result = sqlx::query(
            r"UPDATE credentials SET
                user_label = $2, secret_data = $3, credential_data = $4, priority = $5
            WHERE id = $1 AND profile_id = $6",
        )
        .bind(credential.id)
        .bind(&credential.user_label)
        .bind(&credential.secret_data)
        .bind(&credential.credential_data)
        .bind(credential.priority)
        .bind(credential.profile_id)
        .execute(&self.pool)
        .await
        .map_err(from_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(not_found("Credential", credential.id));
        }

        Ok(())
    }

    async fn delete(&self, profile_id: Uuid, id: Uuid) -> StorageResult<()> {
        let result = sqlx::query("DELETE FROM credentials WHERE id = $1 AND profile_id = $2")
            .bind(id)
            .bind(profile_id)
            .execute(&self.pool)
            .await
            .map_err(from_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(not_found("Credential", id));
        }

        Ok(())
    }

    async fn list_by_type(
        &self,
        profile_id: Uuid,
        credential_type: CredentialType,
    ) -> StorageResult<Vec<StoredCredential>> {
        let rows: Vec<CredentialRow> = sqlx::query_as(
            r"SELECT * FROM credentials
            WHERE profile_id = $1 AND credential_type = $2
            ORDER BY priority, created_at",
        )
        .bind(profile_id)
        .bind(credential_type.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(from_sqlx_error)?;

        Ok(rows.into_iter().map(StoredCredential::from).collect())
    }
}
