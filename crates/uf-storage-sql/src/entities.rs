//! Database entity types for `SQLx`.
//!
//! These types map directly to database rows and are converted to domain
//! models in `convert`.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row for profiles.
#[derive(Debug, Clone, FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub user_id: Option<String>,
    pub username: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub dob: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database row for stored credentials.
#[derive(Debug, Clone, FromRow)]
pub struct CredentialRow {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub credential_type: String,
    pub user_label: Option<String>,
    pub created_at: DateTime<Utc>,
    pub secret_data: String,
    pub credential_data: String,
    pub priority: i32,
}
