//! External-id namespacing.
//!
//! The host prefixes profile ids with the owning provider's component id
//! (`f:<component-id>:<local-id>`) so a user id seen anywhere in the host
//! can be routed back to this provider. Only compose and extract are
//! needed here.

use uuid::Uuid;

use crate::error::{FederationError, FederationResult};

/// Prefix marking a federated user id.
const FEDERATED_PREFIX: &str = "f";

/// Bidirectional mapping between store-local profile ids and the host's
/// namespaced user ids.
#[derive(Debug, Clone, Copy)]
pub struct StorageId;

impl StorageId {
    /// Composes the namespaced id for a local profile id.
    #[must_use]
    pub fn compose(component_id: Uuid, local_id: Uuid) -> String {
        format!("{FEDERATED_PREFIX}:{component_id}:{local_id}")
    }

    /// Extracts the store-local profile id from a namespaced id.
    ///
    /// A bare profile id (no namespace prefix) is accepted as-is, matching
    /// the host convention for ids that never left this provider.
    ///
    /// # Errors
    ///
    /// Returns `FederationError::InvalidId` if the id is neither a
    /// well-formed namespaced id nor a bare profile id.
    pub fn extract_local_id(id: &str) -> FederationResult<Uuid> {
        let local = match id.split_once(':') {
            Some((FEDERATED_PREFIX, rest)) => rest
                .split_once(':')
                .map(|(_, local)| local)
                .ok_or_else(|| FederationError::invalid_id(id))?,
            Some(_) => return Err(FederationError::invalid_id(id)),
            None => id,
        };

        Uuid::parse_str(local).map_err(|_| FederationError::invalid_id(id))
    }
}
