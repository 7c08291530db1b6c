//! `PostgreSQL` implementation of the profile store.

use async_trait::async_trait;
use sqlx::PgPool;
use uf_model::Profile;
use uf_storage::error::StorageResult;
use uf_storage::profile::{ProfileSearchCriteria, ProfileStore};
use uuid::Uuid;

use crate::entities::ProfileRow;
use crate::error::{from_sqlx_error, from_tx_error, not_found};

/// `PostgreSQL` profile store.
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    /// Creates a new `PostgreSQL` profile store.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn create(&self, profile: &Profile) -> StorageResult<()> {
        let mut tx = self.pool.begin().await.map_err(from_tx_error)?;

        sqlx::query(
            r"INSERT INTO profiles (
                id, user_id, username, email, first_name, last_name,
                dob, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(profile.id)
        .bind(&profile.user_id)
        .bind(&profile.username)
        .bind(&profile.email)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(profile.dob)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(from_sqlx_error)?;

        // Rollback happens on drop if the commit is never reached
        tx.commit().await.map_err(from_tx_error)?;

        Ok(())
    }

    async fn update(&self, profile: &Profile) -> StorageResult<()> {
        let result = sqlx::query(
            r"UPDATE profiles SET
                user_id = $2, username = $3, email = $4, first_name = $5,
                last_name = $6, dob = $7, updated_at = $8
            WHERE id = $1",
        )
        .bind(profile.id)
        .bind(&profile.user_id)
        .bind(&profile.username)
        .bind(&profile.email)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(profile.dob)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await
        .map_err(from_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(not_found("Profile", profile.id));
        }

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> StorageResult<bool> {
        let mut tx = self.pool.begin().await.map_err(from_tx_error)?;

        let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(from_sqlx_error)?;

        tx.commit().await.map_err(from_tx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_by_id(&self, id: Uuid) -> StorageResult<Option<Profile>> {
        let row: Option<ProfileRow> = sqlx::query_as("SELECT * FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(from_sqlx_error)?;

        Ok(row.map(Profile::from))
    }

    async fn get_by_username(&self, username: &str) -> StorageResult<Option<Profile>> {
        let row: Option<ProfileRow> = sqlx::query_as("SELECT * FROM profiles WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(from_sqlx_error)?;

        Ok(row.map(Profile::from))
    }

    async fn get_by_email(&self, email: &str) -> StorageResult<Option<Profile>> {
        let row: Option<ProfileRow> = sqlx::query_as("SELECT * FROM profiles WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(from_sqlx_error)?;

        Ok(row.map(Profile::from))
    }

    async fn search(&self, criteria: &ProfileSearchCriteria) -> StorageResult<Vec<Profile>> {
        let pattern = format!("%{}%", criteria.term);

        // NULL limit/offset binds behave as unbounded in PostgreSQL
        let rows: Vec<ProfileRow> = sqlx::query_as(
            r"SELECT * FROM profiles
            WHERE username ILIKE $1 OR email ILIKE $1
            ORDER BY username LIMIT $2 OFFSET $3",
        )
        .bind(&pattern)
        .bind(criteria.limit.map(i64::from))
        .bind(criteria.offset.map(i64::from))
        .fetch_all(&self.pool)
        .await
        .map_err(from_sqlx_error)?;

        Ok(rows.into_iter().map(Profile::from).collect())
    }

    async fn count(&self) -> StorageResult<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM profiles")
            .fetch_one(&self.pool)
            .await
            .map_err(from_sqlx_error)?;

        #[allow(clippy::cast_sign_loss)]
        Ok(count as u64)
    }
}
