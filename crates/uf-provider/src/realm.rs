//! Realm context handed in by the host.

use uf_model::PasswordPolicy;
use uuid::Uuid;

/// The slice of realm state this provider consumes: the realm identity
/// and its password policy, if one is configured.
#[derive(Debug, Clone, Default)]
pub struct RealmContext {
    /// Realm identifier.
    pub realm_id: Uuid,
    /// The realm's password policy, or `None` when unset.
    pub password_policy: Option<PasswordPolicy>,
}

impl RealmContext {
    /// Creates a context without a password policy.
    #[must_use]
    pub const fn new(realm_id: Uuid) -> Self {
        Self {
            realm_id,
            password_policy: None,
        }
    }

    /// Sets the password policy.
    #[must_use]
    pub fn with_password_policy(mut self, policy: PasswordPolicy) -> Self {
        self.password_policy = Some(policy);
        self
    }
}
