use thiserror::Error;

use crate::types::EntityId;

/// Errors that can occur during authority bookkeeping operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthorityError {
    /// Attempted to register an entity that already has an authority channel
    #[error("Entity {entity:?} is already registered with the authority coordinator")]
    EntityAlreadyRegistered { entity: EntityId },

    /// Operation references an entity with no authority channel
    #[error("Entity {entity:?} is not registered with the authority coordinator (operation: {operation})")]
    EntityNotRegistered {
        entity: EntityId,
        operation: &'static str,
    },

    /// Lock on shared authority state was poisoned
    #[error("Lock on authority state is poisoned")]
    LockPoisoned,
}
