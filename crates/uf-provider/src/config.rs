//! Federation provider configuration.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Configuration for one deployed instance of this provider.
///
/// The component id is assigned by the host when the provider is
/// configured for a realm; it is embedded in every namespaced user id
/// this instance hands out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FederationConfig {
    /// Component id the host assigned to this provider instance.
    pub component_id: Uuid,
    /// Realm this provider instance belongs to.
    pub realm_id: Uuid,
    /// Display name.
    pub name: String,
    /// Whether the provider is enabled.
    pub enabled: bool,
    /// Database connection URL for the profile store.
    pub database_url: String,
}

impl FederationConfig {
    /// Creates a new configuration builder.
    #[must_use]
    pub fn builder() -> FederationConfigBuilder {
        FederationConfigBuilder::default()
    }
}

/// Builder for [`FederationConfig`].
#[derive(Debug, Default)]
pub struct FederationConfigBuilder {
    component_id: Option<Uuid>,
    realm_id: Option<Uuid>,
    name: Option<String>,
    enabled: Option<bool>,
    database_url: Option<String>,
}

impl FederationConfigBuilder {
    /// Sets the component id.
    #[must_use]
    pub fn component_id(mut self, id: Uuid) -> Self {
        self.component_id = Some(id);
        self
    }

    /// Sets the realm id.
    #[must_use]
    pub fn realm_id(mut self, realm_id: Uuid) -> Self {
        self.realm_id = Some(realm_id);
        self
    }

    /// Sets the display name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets whether the provider is enabled.
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    /// Sets the database connection URL.
    #[must_use]
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Builds the configuration.
    ///
    /// # Panics
    ///
    /// Panics if required fields are not set.
    #[must_use]
    pub fn build(self) -> FederationConfig {
        FederationConfig {
            component_id: self.component_id.unwrap_or_else(Uuid::now_v7),
            realm_id: self.realm_id.expect("realm_id is required"),
            name: self.name.expect("name is required"),
            enabled: self.enabled.unwrap_or(true),
            database_url: self.database_url.expect("database_url is required"),
        }
    }
}
