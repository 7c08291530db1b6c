//! Hashing strategy registry.
//!
//! Resolves a stored credential's algorithm tag to the strategy that can
//! verify it. Constructed explicitly and handed to the verifier; nothing
//! here is process-global.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::RwLock;

use crate::argon2id::Argon2HashProvider;
use crate::pbkdf2::Pbkdf2HashProvider;
use crate::provider::PasswordHashProvider;

/// Registry of password hashing strategies, keyed by algorithm tag.
#[derive(Default)]
pub struct HashProviderRegistry {
    providers: DashMap<&'static str, Arc<dyn PasswordHashProvider>>,
    default_algorithm: RwLock<Option<&'static str>>,
}

impl HashProviderRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the built-in strategies, defaulting to
    /// Argon2id.
    #[must_use]
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.register(Arc::new(Argon2HashProvider::new()));
        registry.register(Arc::new(Pbkdf2HashProvider::new()));
        registry.set_default(crate::argon2id::ALGORITHM);
        registry
    }

    /// Registers a strategy under its algorithm tag.
    ///
    /// A later registration for the same tag replaces the earlier one.
    pub fn register(&self, provider: Arc<dyn PasswordHashProvider>) {
        self.providers.insert(provider.algorithm(), provider);
    }

    /// Sets the default strategy used when no policy pins an algorithm.
    pub fn set_default(&self, algorithm: &'static str) {
        *self.default_algorithm.write() = Some(algorithm);
    }

    /// Resolves an algorithm tag to its strategy.
    #[must_use]
    pub fn resolve(&self, algorithm: &str) -> Option<Arc<dyn PasswordHashProvider>> {
        self.providers.get(algorithm).map(|entry| entry.value().clone())
    }

    /// Returns the default strategy, if one is configured.
    #[must_use]
    pub fn default_provider(&self) -> Option<Arc<dyn PasswordHashProvider>> {
        let algorithm = (*self.default_algorithm.read())?;
        self.resolve(algorithm)
    }

    /// Lists the registered algorithm tags.
    #[must_use]
    pub fn algorithms(&self) -> Vec<&'static str> {
        self.providers.iter().map(|entry| *entry.key()).collect()
    }
}

impl std::fmt::Debug for HashProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashProviderRegistry")
            .field("algorithms", &self.algorithms())
            .field("default", &*self.default_algorithm.read())
            .finish()
    }
}
