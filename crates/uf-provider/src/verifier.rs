//! Password verification against stored credentials.
//!
//! The verifier decides whether a presented secret matches a profile's
//! stored password and keeps the stored encoding current with the realm's
//! policy. It never surfaces an error to the caller: every failure mode
//! is reported as a failed login, so the host cannot leak which
//! precondition broke.

use std::sync::Arc;

use tracing::{debug, warn};
use uf_hash::{HashProviderRegistry, PasswordHashProvider};
use uf_model::{CredentialInput, CredentialType, StoredCredential};
use uf_storage::CredentialStore;
use uuid::Uuid;

use crate::realm::RealmContext;

/// Validates password credential inputs for federated profiles.
pub struct PasswordVerifier {
    credentials: Arc<dyn CredentialStore>,
    hashers: Arc<HashProviderRegistry>,
}

impl PasswordVerifier {
    /// Creates a verifier over the given credential store and hashing
    /// strategy registry.
    #[must_use]
    pub fn new(credentials: Arc<dyn CredentialStore>, hashers: Arc<HashProviderRegistry>) -> Self {
        Self {
            credentials,
            hashers,
        }
    }

    /// Checks whether this verifier handles the given credential type.
    #[must_use]
    pub const fn supports(&self, credential_type: CredentialType) -> bool {
        matches!(credential_type, CredentialType::Password)
    }

    /// Checks whether the profile has a usable password credential.
    pub async fn is_configured_for(&self, profile_id: Uuid) -> bool {
        matches!(self.credentials.get_password(profile_id).await, Ok(Some(_)))
    }

    /// Verifies a presented credential input against the profile's stored
    /// password.
    ///
    /// Returns `false` for every failure mode: wrong input kind, empty
    /// secret, no stored password, unresolvable algorithm, mismatch, or
    /// any error raised along the way. After a successful match the stored
    /// encoding is opportunistically rehashed to the realm's current
    /// policy before returning `true`; a rehash failure does not change
    /// the outcome.
    pub async fn verify(
        &self,
        realm: &RealmContext,
        profile_id: Uuid,
        input: &CredentialInput,
    ) -> bool {
        let CredentialInput::Password { secret } = input else {
            debug!(%profile_id, "credential input is not a password challenge");
            return false;
        };

        if secret.is_empty() {
            debug!(%profile_id, "empty password input");
            return false;
        }

        let stored = match self.credentials.get_password(profile_id).await {
            Ok(Some(credential)) => credential,
            Ok(None) => {
                debug!(%profile_id, "no password credential stored");
                return false;
            }
            Err(err) => {
                warn!(%profile_id, error = %err, "credential lookup failed, failing verification");
                return false;
            }
        };

        let algorithm = match stored.password_credential_data() {
            Ok(data) => data.algorithm,
            Err(err) => {
                warn!(%profile_id, error = %err, "stored credential metadata undecodable, failing verification");
                return false;
            }
        };

        // An unresolvable tag means the deployment lost a strategy the
        // store still references. Operator problem, user sees a failed login.
        let Some(hasher) = self.hashers.resolve(&algorithm) else {
            warn!(%profile_id, %algorithm, "no hashing strategy registered for stored algorithm");
            return false;
        };

        match hasher.verify(secret, &stored) {
            Ok(true) => {}
            Ok(false) => {
                debug!(%profile_id, "password mismatch");
                return false;
            }
            Err(err) => {
                warn!(%profile_id, error = %err, "password verification errored, failing closed");
                return false;
            }
        }

        self.rehash_if_required(realm, secret, &stored).await;

        true
    }

    /// Re-encodes the stored credential when it no longer satisfies the
    /// realm's policy. The match already decided the login; nothing in
    /// here may change that outcome.
    async fn rehash_if_required(&self, realm: &RealmContext, secret: &str, stored: &StoredCredential) {
        let policy = realm.password_policy.as_ref();

        let provider: Option<Arc<dyn PasswordHashProvider>> =
            match policy.and_then(|p| p.hash_algorithm.as_deref()) {
                Some(algorithm) => self.hashers.resolve(algorithm),
                None => self.hashers.default_provider(),
            };
        let Some(provider) = provider else {
            warn!(credential = %stored.id, "policy hashing strategy unavailable, skipping rehash");
            return;
        };

        if provider.policy_check(policy, stored) {
            return;
        }

        let iterations = policy.and_then(|p| p.hash_iterations);
        let encoded = match provider.encode(secret, iterations) {
            Ok(encoded) => encoded,
            Err(err) => {
                warn!(credential = %stored.id, error = %err, "re-encoding failed, keeping stored credential");
                return;
            }
        };

        let replacement =
            stored.with_password_payload(&encoded.secret_data, &encoded.credential_data);

        match self.credentials.update(&replacement).await {
            Ok(()) => {
                debug!(
                    credential = %stored.id,
                    algorithm = provider.algorithm(),
                    "rehashed stored credential to current policy"
                );
            }
            Err(err) => {
                warn!(
                    credential = %stored.id,
                    error = %err,
                    "persisting rehashed credential failed, login outcome unaffected"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use parking_lot::RwLock;
    use uf_hash::{Argon2HashProvider, Pbkdf2HashProvider};
    use uf_model::{PasswordPolicy, StoredCredential};
    use uf_storage::error::{StorageError, StorageResult};

    /// In-memory credential store with a switch to make updates fail.
    #[derive(Default)]
    struct MemoryCredentialStore {
        credentials: RwLock<Vec<StoredCredential>>,
        fail_updates: bool,
    }

    impl MemoryCredentialStore {
        fn with(credential: StoredCredential) -> Self {
            Self {
                credentials: RwLock::new(vec![credential]),
                fail_updates: false,
            }
        }

        fn failing_updates(credential: StoredCredential) -> Self {
            Self {
                credentials: RwLock::new(vec![credential]),
                fail_updates: true,
            }
        }

        fn snapshot(&self) -> Vec<StoredCredential> {
            self.credentials.read().clone()
        }
    }

    #[async_trait]
    impl CredentialStore for MemoryCredentialStore {
        async fn create(&self, credential: &StoredCredential) -> StorageResult<()> {
            self.credentials.write().push(credential.clone());
            Ok(())
        }

        async fn update(&self, credential: &StoredCredential) -> StorageResult<()> {
            if self.fail_updates {
                return Err(StorageError::Connection("simulated outage".to_string()));
            }
            let mut credentials = self.credentials.write();
            let entry = credentials
                .iter_mut()
                .find(|c| c.id == credential.id)
                .ok_or(StorageError::not_found("Credential", credential.id))?;
            *entry = credential.clone();
            Ok(())
        }

        async fn delete(&self, _profile_id: Uuid, id: Uuid) -> StorageResult<()> {
            let mut credentials = self.credentials.write();
            let before = credentials.len();
            credentials.retain(|c| c.id != id);
            if credentials.len() == before {
                return Err(StorageError::not_found("Credential", id));
            }
            Ok(())
        }

        async fn list_by_type(
            &self,
            profile_id: Uuid,
            credential_type: CredentialType,
        ) -> StorageResult<Vec<StoredCredential>> {
            Ok(self
                .credentials
                .read()
                .iter()
                .filter(|c| c.profile_id == profile_id && c.credential_type == credential_type)
                .cloned()
                .collect())
        }
    }

    fn registry() -> Arc<HashProviderRegistry> {
        Arc::new(HashProviderRegistry::with_defaults())
    }

    fn argon2_credential(profile_id: Uuid, secret: &str, iterations: u32) -> StoredCredential {
        let encoded = Argon2HashProvider::new()
            .encode(secret, Some(iterations))
            .unwrap();
        StoredCredential::new_password(profile_id, &encoded.secret_data, &encoded.credential_data)
    }

    fn pbkdf2_credential(profile_id: Uuid, secret: &str, iterations: u32) -> StoredCredential {
        let encoded = Pbkdf2HashProvider::new()
            .encode(secret, Some(iterations))
            .unwrap();
        StoredCredential::new_password(profile_id, &encoded.secret_data, &encoded.credential_data)
    }

    #[tokio::test]
    async fn correct_secret_verifies() {
        let profile_id = Uuid::now_v7();
        let store = Arc::new(MemoryCredentialStore::with(argon2_credential(
            profile_id, "s3cret", 2,
        )));
        let verifier = PasswordVerifier::new(store, registry());

        let realm = RealmContext::new(Uuid::now_v7());
        assert!(
            verifier
                .verify(&realm, profile_id, &CredentialInput::password("s3cret"))
                .await
        );
    }

    #[tokio::test]
    async fn wrong_secret_fails_and_leaves_credential_untouched() {
        let profile_id = Uuid::now_v7();
        let store = Arc::new(MemoryCredentialStore::with(argon2_credential(
            profile_id, "s3cret", 2,
        )));
        let before = store.snapshot();
        let verifier = PasswordVerifier::new(store.clone(), registry());

        // Policy would demand a rehash, but a failed match must never write
        let realm = RealmContext::new(Uuid::now_v7())
            .with_password_policy(PasswordPolicy::new("argon2id", 3));
        assert!(
            !verifier
                .verify(&realm, profile_id, &CredentialInput::password("wrong"))
                .await
        );
        assert_eq!(store.snapshot()[0].secret_data, before[0].secret_data);
    }

    #[tokio::test]
    async fn non_password_input_fails() {
        let profile_id = Uuid::now_v7();
        let store = Arc::new(MemoryCredentialStore::with(argon2_credential(
            profile_id, "s3cret", 2,
        )));
        let verifier = PasswordVerifier::new(store, registry());

        let realm = RealmContext::new(Uuid::now_v7());
        let otp = CredentialInput::Otp {
            code: "123456".to_string(),
        };
        assert!(!verifier.verify(&realm, profile_id, &otp).await);
    }

    #[tokio::test]
    async fn empty_secret_fails() {
        let profile_id = Uuid::now_v7();
        let store = Arc::new(MemoryCredentialStore::with(argon2_credential(
            profile_id, "s3cret", 2,
        )));
        let verifier = PasswordVerifier::new(store, registry());

        let realm = RealmContext::new(Uuid::now_v7());
        assert!(
            !verifier
                .verify(&realm, profile_id, &CredentialInput::password(""))
                .await
        );
    }

    #[tokio::test]
    async fn missing_credential_fails() {
        let store = Arc::new(MemoryCredentialStore::default());
        let verifier = PasswordVerifier::new(store, registry());

        let realm = RealmContext::new(Uuid::now_v7());
        assert!(
            !verifier
                .verify(&realm, Uuid::now_v7(), &CredentialInput::password("s3cret"))
                .await
        );
    }

    #[tokio::test]
    async fn unresolvable_algorithm_fails() {
        let profile_id = Uuid::now_v7();
        let credential = StoredCredential::new_password(
            profile_id,
            &uf_model::PasswordSecretData::new("whatever"),
            &uf_model::PasswordCredentialData::new("bcrypt", None),
        );
        let store = Arc::new(MemoryCredentialStore::with(credential));
        let verifier = PasswordVerifier::new(store, registry());

        let realm = RealmContext::new(Uuid::now_v7());
        assert!(
            !verifier
                .verify(&realm, profile_id, &CredentialInput::password("s3cret"))
                .await
        );
    }

    #[tokio::test]
    async fn malformed_stored_payload_fails_closed() {
        let profile_id = Uuid::now_v7();
        let credential =
            StoredCredential::new(profile_id, CredentialType::Password, "not json", "not json");
        let store = Arc::new(MemoryCredentialStore::with(credential));
        let verifier = PasswordVerifier::new(store, registry());

        let realm = RealmContext::new(Uuid::now_v7());
        assert!(
            !verifier
                .verify(&realm, profile_id, &CredentialInput::password("s3cret"))
                .await
        );
    }

    #[tokio::test]
    async fn stale_credential_is_rehashed_preserving_identity() {
        let profile_id = Uuid::now_v7();
        let stored = pbkdf2_credential(profile_id, "s3cret", 1_000).with_label("Main password");
        let original_id = stored.id;
        let original_created_at = stored.created_at;
        let store = Arc::new(MemoryCredentialStore::with(stored));
        let verifier = PasswordVerifier::new(store.clone(), registry());

        // Realm policy moved to argon2id, so the pbkdf2 encoding is stale
        let realm = RealmContext::new(Uuid::now_v7())
            .with_password_policy(PasswordPolicy::new("argon2id", 2));
        assert!(
            verifier
                .verify(&realm, profile_id, &CredentialInput::password("s3cret"))
                .await
        );

        let after = store.snapshot();
        assert_eq!(after.len(), 1);
        let replaced = &after[0];
        assert_eq!(replaced.id, original_id);
        assert_eq!(replaced.created_at, original_created_at);
        assert_eq!(replaced.user_label.as_deref(), Some("Main password"));

        let data = replaced.password_credential_data().unwrap();
        assert_eq!(data.algorithm, "argon2id");
        assert_eq!(data.hash_iterations, Some(2));

        // The new encoding must verify the same secret
        assert!(
            verifier
                .verify(&realm, profile_id, &CredentialInput::password("s3cret"))
                .await
        );
    }

    #[tokio::test]
    async fn iteration_bump_triggers_rehash() {
        let profile_id = Uuid::now_v7();
        let store = Arc::new(MemoryCredentialStore::with(pbkdf2_credential(
            profile_id, "s3cret", 1_000,
        )));
        let verifier = PasswordVerifier::new(store.clone(), registry());

        let realm = RealmContext::new(Uuid::now_v7())
            .with_password_policy(PasswordPolicy::new("pbkdf2-sha512", 2_000));
        assert!(
            verifier
                .verify(&realm, profile_id, &CredentialInput::password("s3cret"))
                .await
        );

        let data = store.snapshot()[0].password_credential_data().unwrap();
        assert_eq!(data.algorithm, "pbkdf2-sha512");
        assert_eq!(data.hash_iterations, Some(2_000));
    }

    #[tokio::test]
    async fn compliant_credential_is_not_rewritten() {
        let profile_id = Uuid::now_v7();
        let store = Arc::new(MemoryCredentialStore::with(argon2_credential(
            profile_id, "s3cret", 3,
        )));
        let before = store.snapshot();
        let verifier = PasswordVerifier::new(store.clone(), registry());

        let realm = RealmContext::new(Uuid::now_v7())
            .with_password_policy(PasswordPolicy::new("argon2id", 3));
        assert!(
            verifier
                .verify(&realm, profile_id, &CredentialInput::password("s3cret"))
                .await
        );

        assert_eq!(store.snapshot()[0].secret_data, before[0].secret_data);
    }

    #[tokio::test]
    async fn rehash_persistence_failure_does_not_fail_login() {
        let profile_id = Uuid::now_v7();
        let store = Arc::new(MemoryCredentialStore::failing_updates(pbkdf2_credential(
            profile_id, "s3cret", 1_000,
        )));
        let verifier = PasswordVerifier::new(store, registry());

        let realm = RealmContext::new(Uuid::now_v7())
            .with_password_policy(PasswordPolicy::new("argon2id", 2));
        assert!(
            verifier
                .verify(&realm, profile_id, &CredentialInput::password("s3cret"))
                .await
        );
    }

    #[tokio::test]
    async fn no_policy_uses_default_strategy_for_rehash() {
        let profile_id = Uuid::now_v7();
        let store = Arc::new(MemoryCredentialStore::with(pbkdf2_credential(
            profile_id, "s3cret", 1_000,
        )));
        let verifier = PasswordVerifier::new(store.clone(), registry());

        // No policy: the registry default (argon2id) decides compliance
        let realm = RealmContext::new(Uuid::now_v7());
        assert!(
            verifier
                .verify(&realm, profile_id, &CredentialInput::password("s3cret"))
                .await
        );

        let data = store.snapshot()[0].password_credential_data().unwrap();
        assert_eq!(data.algorithm, "argon2id");
    }

    #[tokio::test]
    async fn first_stored_credential_wins() {
        let profile_id = Uuid::now_v7();
        let first = argon2_credential(profile_id, "first-secret", 2);
        let second = argon2_credential(profile_id, "second-secret", 2);
        let store = Arc::new(MemoryCredentialStore::default());
        store.create(&first).await.unwrap();
        store.create(&second).await.unwrap();
        let verifier = PasswordVerifier::new(store, registry());

        let realm = RealmContext::new(Uuid::now_v7());
        assert!(
            verifier
                .verify(&realm, profile_id, &CredentialInput::password("first-secret"))
                .await
        );
        assert!(
            !verifier
                .verify(&realm, profile_id, &CredentialInput::password("second-secret"))
                .await
        );
    }

    #[tokio::test]
    async fn configuration_probes() {
        let profile_id = Uuid::now_v7();
        let store = Arc::new(MemoryCredentialStore::with(argon2_credential(
            profile_id, "s3cret", 2,
        )));
        let verifier = PasswordVerifier::new(store, registry());

        assert!(verifier.supports(CredentialType::Password));
        assert!(!verifier.supports(CredentialType::Totp));
        assert!(verifier.is_configured_for(profile_id).await);
        assert!(!verifier.is_configured_for(Uuid::now_v7()).await);
    }
}
