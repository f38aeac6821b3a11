use thiserror::Error;

use crate::types::EntityId;

/// Errors that can occur during entity state replication
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplicationError {
    /// A write to canonical state was attempted by a non-authoritative
    /// participant. Prevented by construction; never silently allowed.
    #[error("Participant is not authoritative for entity {entity:?} (operation: {operation})")]
    NotAuthoritative {
        entity: EntityId,
        operation: &'static str,
    },
}
