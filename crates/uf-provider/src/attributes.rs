//! Attribute access over a federated profile.
//!
//! The host reads and writes user attributes by name. The adapter
//! decorates the names backed by typed profile columns and delegates
//! every other name to a fallback store the host supplies.

use std::collections::HashMap;

use chrono::NaiveDate;
use uf_model::Profile;

use crate::error::{FederationError, FederationResult};

/// Attribute name for the email column.
pub const EMAIL: &str = "email";
/// Attribute name for the first name column.
pub const FIRST_NAME: &str = "firstName";
/// Attribute name for the last name column.
pub const LAST_NAME: &str = "lastName";
/// Attribute name for the date-of-birth column, ISO-8601 encoded.
pub const DOB: &str = "dob";

/// Capability interface for named attribute access.
pub trait AttributeStore: Send + Sync {
    /// Gets an attribute value by name.
    fn get_attribute(&self, name: &str) -> Option<String>;

    /// Sets or clears an attribute.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAttribute` if the value cannot be applied.
    fn set_attribute(&mut self, name: &str, value: Option<String>) -> FederationResult<()>;

    /// Lists the names with a value set.
    fn attribute_names(&self) -> Vec<String>;
}

/// Plain map-backed attribute store, the default fallback for names the
/// profile has no column for.
#[derive(Debug, Clone, Default)]
pub struct MapAttributeStore {
    attributes: HashMap<String, String>,
}

impl MapAttributeStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl AttributeStore for MapAttributeStore {
    fn get_attribute(&self, name: &str) -> Option<String> {
        self.attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, name: &str, value: Option<String>) -> FederationResult<()> {
        match value {
            Some(value) => {
                self.attributes.insert(name.to_string(), value);
            }
            None => {
                self.attributes.remove(name);
            }
        }
        Ok(())
    }

    fn attribute_names(&self) -> Vec<String> {
        self.attributes.keys().cloned().collect()
    }
}

/// Decorates a profile's typed columns as named attributes, delegating
/// unrecognized names to a fallback store.
pub struct ProfileAttributeAdapter<'a, S: AttributeStore> {
    profile: &'a mut Profile,
    fallback: &'a mut S,
}

impl<'a, S: AttributeStore> ProfileAttributeAdapter<'a, S> {
    /// Creates an adapter over the profile and fallback store.
    pub fn new(profile: &'a mut Profile, fallback: &'a mut S) -> Self {
        Self { profile, fallback }
    }
}

impl<S: AttributeStore> AttributeStore for ProfileAttributeAdapter<'_, S> {
    fn get_attribute(&self, name: &str) -> Option<String> {
        match name {
            EMAIL => self.profile.email.clone(),
            FIRST_NAME => self.profile.first_name.clone(),
            LAST_NAME => self.profile.last_name.clone(),
            DOB => self.profile.dob.map(|d| d.to_string()),
            _ => self.fallback.get_attribute(name),
        }
    }

    fn set_attribute(&mut self, name: &str, value: Option<String>) -> FederationResult<()> {
        match name {
            EMAIL => self.profile.email = value,
            FIRST_NAME => self.profile.first_name = value,
            LAST_NAME => self.profile.last_name = value,
            DOB => {
                self.profile.dob = value
                    .map(|v| {
                        NaiveDate::parse_from_str(&v, "%Y-%m-%d").map_err(|e| {
                            FederationError::invalid_attribute(DOB, e.to_string())
                        })
                    })
                    .transpose()?;
            }
            _ => return self.fallback.set_attribute(name, value),
        }
        self.profile.updated_at = chrono::Utc::now();
        Ok(())
    }

    fn attribute_names(&self) -> Vec<String> {
        let mut names = self.fallback.attribute_names();
        for (name, present) in [
            (EMAIL, self.profile.email.is_some()),
            (FIRST_NAME, self.profile.first_name.is_some()),
            (LAST_NAME, self.profile.last_name.is_some()),
            (DOB, self.profile.dob.is_some()),
        ] {
            if present {
                names.push(name.to_string());
            }
        }
        names
    }
}
