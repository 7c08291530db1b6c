//! User directory facade.
//!
//! Translates host-level identity queries into profile store calls and
//! wraps results in the host-facing user representation.

use std::sync::Arc;

use tracing::debug;
use uf_model::Profile;
use uf_storage::profile::{ProfileSearchCriteria, ProfileStore};
use uuid::Uuid;

use crate::error::FederationResult;
use crate::storage_id::StorageId;

/// The host-facing view of one federated profile.
///
/// Carries the namespaced id the host routes on plus a transient copy of
/// the profile row. The row stays owned by the store; mutations made here
/// only persist through [`UserDirectory::update`].
#[derive(Debug, Clone)]
pub struct FederatedUser {
    /// Namespaced user id.
    pub id: String,
    /// The profile backing this user.
    pub profile: Profile,
}

impl FederatedUser {
    /// The username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.profile.username
    }

    /// The email, if set.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.profile.email.as_deref()
    }
}

/// Identity queries and registration over a profile store.
pub struct UserDirectory {
    profiles: Arc<dyn ProfileStore>,
    component_id: Uuid,
}

impl UserDirectory {
    /// Creates a directory over the given store.
    ///
    /// `component_id` is the host-assigned id of this provider instance,
    /// used to namespace every user id handed out.
    #[must_use]
    pub fn new(profiles: Arc<dyn ProfileStore>, component_id: Uuid) -> Self {
        Self {
            profiles,
            component_id,
        }
    }

    fn wrap(&self, profile: Profile) -> FederatedUser {
        FederatedUser {
            id: StorageId::compose(self.component_id, profile.id),
            profile,
        }
    }

    /// Looks up a user by their namespaced id.
    ///
    /// # Errors
    ///
    /// Returns `InvalidId` for a malformed id, or a storage error.
    pub async fn find_by_id(&self, external_id: &str) -> FederationResult<Option<FederatedUser>> {
        let local_id = StorageId::extract_local_id(external_id)?;

        let profile = self.profiles.get_by_id(local_id).await?;
        if profile.is_none() {
            // May happen when the row was deleted while the host still
            // holds the id
            debug!(%external_id, "no profile for user id");
        }

        Ok(profile.map(|p| self.wrap(p)))
    }

    /// Looks up a user by username.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the lookup fails.
    pub async fn find_by_username(&self, username: &str) -> FederationResult<Option<FederatedUser>> {
        let profile = self.profiles.get_by_username(username).await?;
        Ok(profile.map(|p| self.wrap(p)))
    }

    /// Looks up a user by email.
    ///
    /// An absent row is `Ok(None)`, same as the id and username lookups.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the lookup fails.
    pub async fn find_by_email(&self, email: &str) -> FederationResult<Option<FederatedUser>> {
        let profile = self.profiles.get_by_email(email).await?;
        Ok(profile.map(|p| self.wrap(p)))
    }

    /// Searches users by case-insensitive substring over username and
    /// email, ordered by username.
    ///
    /// An empty term matches every row. Absent offset/limit leave that
    /// end of the page unbounded.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the search fails.
    pub async fn search(
        &self,
        term: &str,
        offset: Option<u32>,
        limit: Option<u32>,
    ) -> FederationResult<Vec<FederatedUser>> {
        let criteria = ProfileSearchCriteria {
            term: term.to_string(),
            offset,
            limit,
        };

        let profiles = self.profiles.search(&criteria).await?;
        Ok(profiles.into_iter().map(|p| self.wrap(p)).collect())
    }

    /// Registers a new user with only the username populated.
    ///
    /// Remaining fields arrive later through attribute updates.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the insert fails; the underlying
    /// transaction has been rolled back.
    pub async fn register(&self, username: &str) -> FederationResult<FederatedUser> {
        let profile = Profile::new(username);
        self.profiles.create(&profile).await?;

        debug!(%username, profile_id = %profile.id, "registered profile");
        Ok(self.wrap(profile))
    }

    /// Removes a user by their namespaced id.
    ///
    /// Returns whether a row was actually deleted.
    ///
    /// # Errors
    ///
    /// Returns `InvalidId` for a malformed id, or a storage error; the
    /// underlying transaction has been rolled back on failure.
    pub async fn remove(&self, external_id: &str) -> FederationResult<bool> {
        let local_id = StorageId::extract_local_id(external_id)?;

        let deleted = self.profiles.delete(local_id).await?;
        debug!(%external_id, deleted, "remove profile");
        Ok(deleted)
    }

    /// Counts all users in the store.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the count fails.
    pub async fn count(&self) -> FederationResult<u64> {
        Ok(self.profiles.count().await?)
    }

    /// Persists attribute mutations made on a user's profile.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the profile no longer exists or the
    /// update fails.
    pub async fn update(&self, user: &FederatedUser) -> FederationResult<()> {
        self.profiles.update(&user.profile).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use parking_lot::RwLock;
    use std::collections::HashMap;
    use uf_storage::error::{StorageError, StorageResult};

    #[derive(Default)]
    struct MemoryProfileStore {
        profiles: RwLock<HashMap<Uuid, Profile>>,
    }

    #[async_trait]
    impl ProfileStore for MemoryProfileStore {
        async fn create(&self, profile: &Profile) -> StorageResult<()> {
            self.profiles.write().insert(profile.id, profile.clone());
            Ok(())
        }

        async fn update(&self, profile: &Profile) -> StorageResult<()> {
            let mut profiles = self.profiles.write();
            if !profiles.contains_key(&profile.id) {
                return Err(StorageError::not_found("Profile", profile.id));
            }
            profiles.insert(profile.id, profile.clone());
            Ok(())
        }

        async fn delete(&self, id: Uuid) -> StorageResult<bool> {
            Ok(self.profiles.write().remove(&id).is_some())
        }

        async fn get_by_id(&self, id: Uuid) -> StorageResult<Option<Profile>> {
            Ok(self.profiles.read().get(&id).cloned())
        }

        async fn get_by_username(&self, username: &str) -> StorageResult<Option<Profile>> {
            Ok(self
                .profiles
                .read()
                .values()
                .find(|p| p.username == username)
                .cloned())
        }

        async fn get_by_email(&self, email: &str) -> StorageResult<Option<Profile>> {
            Ok(self
                .profiles
                .read()
                .values()
                .find(|p| p.email.as_deref() == Some(email))
                .cloned())
        }

        async fn search(&self, criteria: &ProfileSearchCriteria) -> StorageResult<Vec<Profile>> {
            let term = criteria.term.to_lowercase();
            let mut matches: Vec<Profile> = self
                .profiles
                .read()
                .values()
                .filter(|p| {
                    p.username.to_lowercase().contains(&term)
                        || p.email
                            .as_deref()
                            .is_some_and(|e| e.to_lowercase().contains(&term))
                })
                .cloned()
                .collect();
            matches.sort_by(|a, b| a.username.cmp(&b.username));

            let offset = criteria.offset.unwrap_or(0) as usize;
            let matches: Vec<Profile> = matches.into_iter().skip(offset).collect();
            Ok(match criteria.limit {
                Some(limit) => matches.into_iter().take(limit as usize).collect(),
                None => matches,
            })
        }

        async fn count(&self) -> StorageResult<u64> {
            Ok(self.profiles.read().len() as u64)
        }
    }

    fn directory() -> UserDirectory {
        UserDirectory::new(Arc::new(MemoryProfileStore::default()), Uuid::now_v7())
    }

    #[tokio::test]
    async fn register_then_find_by_username() {
        let directory = directory();

        let registered = directory.register("alice").await.unwrap();
        assert_eq!(registered.username(), "alice");

        let found = directory.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(found.profile.username, "alice");
        assert_eq!(found.id, registered.id);
    }

    #[tokio::test]
    async fn find_by_id_roundtrips_namespaced_id() {
        let directory = directory();
        let registered = directory.register("alice").await.unwrap();

        let found = directory.find_by_id(&registered.id).await.unwrap().unwrap();
        assert_eq!(found.profile.id, registered.profile.id);
    }

    #[tokio::test]
    async fn absent_lookups_return_none() {
        let directory = directory();

        let missing_id = StorageId::compose(Uuid::now_v7(), Uuid::now_v7());
        assert!(directory.find_by_id(&missing_id).await.unwrap().is_none());
        assert!(directory.find_by_username("ghost").await.unwrap().is_none());
        assert!(
            directory
                .find_by_email("ghost@example.com")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn malformed_id_is_an_error() {
        let directory = directory();
        assert!(directory.find_by_id("not-an-id").await.is_err());
        assert!(directory.remove("not-an-id").await.is_err());
    }

    #[tokio::test]
    async fn remove_reports_whether_a_row_was_deleted() {
        let directory = directory();
        let registered = directory.register("alice").await.unwrap();
        assert_eq!(directory.count().await.unwrap(), 1);

        let missing_id = StorageId::compose(Uuid::now_v7(), Uuid::now_v7());
        assert!(!directory.remove(&missing_id).await.unwrap());
        assert_eq!(directory.count().await.unwrap(), 1);

        assert!(directory.remove(&registered.id).await.unwrap());
        assert_eq!(directory.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn empty_term_matches_at_least_as_much_as_any_term() {
        let directory = directory();
        directory.register("alice").await.unwrap();
        directory.register("bob").await.unwrap();

        let mut carol = directory.register("carol").await.unwrap();
        carol.profile.email = Some("carol@example.com".to_string());
        directory.update(&carol).await.unwrap();

        let all = directory.search("", None, None).await.unwrap();
        assert_eq!(all.len(), 3);

        for term in ["ali", "CAROL", "example.com", "zzz"] {
            let narrowed = directory.search(term, None, None).await.unwrap();
            assert!(narrowed.len() <= all.len());
        }

        // Case-insensitive matching over username and email
        assert_eq!(directory.search("ALI", None, None).await.unwrap().len(), 1);
        assert_eq!(
            directory
                .search("example.com", None, None)
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn search_pagination_bounds() {
        let directory = directory();
        for name in ["a", "b", "c", "d"] {
            directory.register(name).await.unwrap();
        }

        let page = directory.search("", Some(1), Some(2)).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].username(), "b");
        assert_eq!(page[1].username(), "c");

        let tail = directory.search("", Some(3), None).await.unwrap();
        assert_eq!(tail.len(), 1);
        assert_eq!(tail[0].username(), "d");
    }

    #[tokio::test]
    async fn update_persists_profile_mutation() {
        let directory = directory();
        let mut user = directory.register("alice").await.unwrap();

        user.profile.email = Some("alice@example.com".to_string());
        directory.update(&user).await.unwrap();

        let found = directory
            .find_by_email("alice@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.username(), "alice");
    }
}
