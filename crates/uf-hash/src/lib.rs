//! # uf-hash
//!
//! Password hashing strategies for the userfed federation provider.
//!
//! Each strategy implements [`PasswordHashProvider`]; the
//! [`HashProviderRegistry`] resolves a stored credential's algorithm tag
//! to the strategy that can verify it. The registry is an explicit
//! dependency handed to the verifier, not a process-wide singleton.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod argon2id;
pub mod error;
pub mod pbkdf2;
pub mod provider;
pub mod registry;

pub use argon2id::Argon2HashProvider;
pub use error::{HashError, HashResult};
pub use pbkdf2::Pbkdf2HashProvider;
pub use provider::{EncodedPassword, PasswordHashProvider};
pub use registry::HashProviderRegistry;
