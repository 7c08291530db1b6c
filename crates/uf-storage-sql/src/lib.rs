//! # uf-storage-sql
//!
//! `PostgreSQL` implementation of the userfed storage traits, using `SQLx`.
//!
//! Row entities live in [`entities`], conversion to domain models in
//! [`convert`], and the sqlx-to-storage error mapping in [`error`].

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod credential;
mod convert;
mod entities;
pub mod error;
pub mod pool;
pub mod profile;

pub use credential::PgCredentialStore;
pub use pool::{PoolConfig, create_pool};
pub use profile::PgProfileStore;
