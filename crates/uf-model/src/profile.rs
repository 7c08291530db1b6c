//! Profile domain model.
//!
//! A profile is one row in the external user store. It belongs to the
//! store; the provider facade only holds a transient copy while servicing
//! a single request.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user profile held in the external relational store.
///
/// The `id` is generated once at creation and is the stable key the host
/// routes back to this provider. The username is mutable and should be
/// unique within the store, though uniqueness is not enforced at this
/// layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Stable identifier, generated once at creation.
    pub id: Uuid,
    /// Linkage id in the external system, if one exists.
    pub user_id: Option<String>,
    /// Username. Populated at registration; other fields arrive later
    /// through attribute updates.
    pub username: String,
    /// Email address.
    pub email: Option<String>,
    /// First name.
    pub first_name: Option<String>,
    /// Last name.
    pub last_name: Option<String>,
    /// Date of birth.
    pub dob: Option<NaiveDate>,
    /// When the profile row was created.
    pub created_at: DateTime<Utc>,
    /// When the profile row was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Creates a new profile with the given username.
    ///
    /// All other fields start empty and are filled in later via
    /// attribute updates.
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            user_id: None,
            username: username.into(),
            email: None,
            first_name: None,
            last_name: None,
            dob: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the external linkage id.
    #[must_use]
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Sets the email.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the first name.
    #[must_use]
    pub fn with_first_name(mut self, name: impl Into<String>) -> Self {
        self.first_name = Some(name.into());
        self
    }

    /// Sets the last name.
    #[must_use]
    pub fn with_last_name(mut self, name: impl Into<String>) -> Self {
        self.last_name = Some(name.into());
        self
    }

    /// Sets the date of birth.
    #[must_use]
    pub const fn with_dob(mut self, dob: NaiveDate) -> Self {
        self.dob = Some(dob);
        self
    }

    /// Gets the full name, if any name parts are set.
    #[must_use]
    pub fn full_name(&self) -> Option<String> {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            (Some(first), None) => Some(first.clone()),
            (None, Some(last)) => Some(last.clone()),
            (None, None) => None,
        }
    }
}
