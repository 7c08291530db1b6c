//! # uf-model
//!
//! Domain models for the userfed federation provider.
//!
//! These types are shared by the storage layer, the hashing strategies,
//! and the provider facade. They carry no persistence or host logic.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod credential;
pub mod policy;
pub mod profile;

pub use credential::{
    CredentialInput, CredentialType, PasswordCredentialData, PasswordSecretData, StoredCredential,
};
pub use policy::PasswordPolicy;
pub use profile::Profile;
