//! # uf-provider
//!
//! SQL-backed user federation provider.
//!
//! Lets an identity host delegate user lookup, credential verification,
//! and registration to an external relational store of user profiles.
//! The host-facing surface is the [`UserDirectory`] facade and the
//! [`PasswordVerifier`].
//!
//! ## Structure
//!
//! - [`directory`] - identity queries and registration over a profile store
//! - [`verifier`] - password verification with opportunistic rehash
//! - [`attributes`] - attribute access decorating the profile's known fields
//! - [`storage_id`] - external-id namespacing between host and store

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod attributes;
pub mod config;
pub mod directory;
pub mod error;
pub mod realm;
pub mod storage_id;
pub mod verifier;

pub use attributes::{AttributeStore, MapAttributeStore, ProfileAttributeAdapter};
pub use config::FederationConfig;
pub use directory::{FederatedUser, UserDirectory};
pub use error::{FederationError, FederationResult};
pub use realm::RealmContext;
pub use storage_id::StorageId;
pub use verifier::PasswordVerifier;
