//! Profile storage trait.

use async_trait::async_trait;
use uf_model::Profile;
use uuid::Uuid;

use crate::error::StorageResult;

/// Persistence boundary for profiles.
///
/// Implementations must be thread-safe and support concurrent access.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Creates a new profile.
    ///
    /// The insert runs in its own transaction, rolled back on any failure.
    async fn create(&self, profile: &Profile) -> StorageResult<()>;

    /// Updates an existing profile.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::NotFound` if the profile doesn't exist.
    async fn update(&self, profile: &Profile) -> StorageResult<()>;

    /// Deletes a profile by id.
    ///
    /// Returns whether a row was actually deleted. The delete runs in its
    /// own transaction, rolled back on any failure.
    async fn delete(&self, id: Uuid) -> StorageResult<bool>;

    /// Gets a profile by id.
    async fn get_by_id(&self, id: Uuid) -> StorageResult<Option<Profile>>;

    /// Gets a profile by username.
    async fn get_by_username(&self, username: &str) -> StorageResult<Option<Profile>>;

    /// Gets a profile by email.
    async fn get_by_email(&self, email: &str) -> StorageResult<Option<Profile>>;

    /// Searches for profiles matching the criteria, ordered by username.
    async fn search(&self, criteria: &ProfileSearchCriteria) -> StorageResult<Vec<Profile>>;

    /// Counts all profiles.
    async fn count(&self) -> StorageResult<u64>;
}

/// Search criteria for profiles.
///
/// The term is matched case-insensitively as a substring of username and
/// email. An empty term matches every row.
#[derive(Debug, Default, Clone)]
pub struct ProfileSearchCriteria {
    /// Substring search term.
    pub term: String,
    /// Offset for pagination. Absent means start from the first row.
    pub offset: Option<u32>,
    /// Maximum results. Absent means unbounded.
    pub limit: Option<u32>,
}

impl ProfileSearchCriteria {
    /// Creates criteria for the given term with no pagination bounds.
    #[must_use]
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            offset: None,
            limit: None,
        }
    }

    /// Sets the pagination offset.
    #[must_use]
    pub const fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Sets the maximum number of results.
    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}
