//! # uf-storage
//!
//! Storage abstraction traits for the userfed federation provider.
//!
//! This crate defines the persistence boundary that concrete backends
//! (SQL, in-memory fakes) implement.
//!
//! ## Provider Traits
//!
//! - [`ProfileStore`] - CRUD operations and search over profiles
//! - [`CredentialStore`] - per-profile stored credentials

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod credential;
pub mod error;
pub mod profile;

pub use credential::CredentialStore;
pub use error::{StorageError, StorageResult};
pub use profile::{ProfileSearchCriteria, ProfileStore};
