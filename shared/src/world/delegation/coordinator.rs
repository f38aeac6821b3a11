use std::collections::HashMap;

use log::info;

use crate::transport::SessionInfo;
use crate::types::EntityId;
use crate::world::delegation::authority_channel::{
    AuthorityAccessor, AuthorityChannel, AuthorityMutator, AuthorityStatus,
};
use crate::world::delegation::error::AuthorityError;

/// Tracks which participant is authoritative for each shared entity.
///
/// Authority is derived from session coordinatorship: the transport layer
/// elects exactly one coordinating participant, and that participant holds
/// authority over every shared entity. Per-entity voting is deliberately
/// absent. When the coordinator migrates (prior coordinator disconnected),
/// the host calls [`refresh`] and every channel flips in one step, bumping
/// its epoch so replicators re-synchronize their warm-up/staleness state.
///
/// [`refresh`]: AuthorityCoordinator::refresh
pub struct AuthorityCoordinator {
    local_is_authority: bool,
    channels: HashMap<EntityId, (AuthorityMutator, AuthorityAccessor)>,
}

impl AuthorityCoordinator {
    pub fn new(session: &dyn SessionInfo) -> Self {
        Self {
            local_is_authority: session.is_coordinator(),
            channels: HashMap::new(),
        }
    }

    fn local_status(&self) -> AuthorityStatus {
        if self.local_is_authority {
            AuthorityStatus::Authoritative
        } else {
            AuthorityStatus::Replica
        }
    }

    /// Register an entity with the coordinator
    ///
    /// # Panics
    ///
    /// Panics if the entity is already registered.
    /// Consider using `try_register_entity` for non-panicking error handling.
    pub fn register_entity(&mut self, entity: EntityId) -> AuthorityAccessor {
        self.try_register_entity(entity)
            .expect("Entity cannot register with the authority coordinator more than once!")
    }

    /// Register an entity with the coordinator
    ///
    /// Returns an error if the entity is already registered.
    pub fn try_register_entity(
        &mut self,
        entity: EntityId,
    ) -> Result<AuthorityAccessor, AuthorityError> {
        if self.channels.contains_key(&entity) {
            return Err(AuthorityError::EntityAlreadyRegistered { entity });
        }

        let (mutator, accessor) = AuthorityChannel::new_channel(self.local_status());
        self.channels.insert(entity, (mutator, accessor.clone()));

        Ok(accessor)
    }

    pub fn deregister_entity(&mut self, entity: EntityId) {
        self.channels.remove(&entity);
    }

    /// Get the accessor for an entity
    ///
    /// Returns an error if the entity is not registered.
    pub fn try_accessor(&self, entity: EntityId) -> Result<AuthorityAccessor, AuthorityError> {
        let (_, accessor) =
            self.channels
                .get(&entity)
                .ok_or(AuthorityError::EntityNotRegistered {
                    entity,
                    operation: "try_accessor",
                })?;
        Ok(accessor.clone())
    }

    /// Whether the local participant is authoritative for `entity`.
    /// Unregistered entities are never considered authoritative.
    pub fn is_authority(&self, entity: EntityId) -> bool {
        match self.channels.get(&entity) {
            Some((_, accessor)) => accessor.status().is_authoritative(),
            None => false,
        }
    }

    /// Re-derives authority from current session membership. Call when the
    /// transport reports a coordinator change (host migration).
    pub fn refresh(&mut self, session: &dyn SessionInfo) -> Result<(), AuthorityError> {
        let was_authority = self.local_is_authority;
        self.local_is_authority = session.is_coordinator();

        if was_authority != self.local_is_authority {
            info!(
                "Local authority changed: {} -> {} ({} entities affected)",
                was_authority,
                self.local_is_authority,
                self.channels.len()
            );
        }

        let status = self.local_status();
        for (mutator, _) in self.channels.values() {
            mutator.try_set_status(status)?;
        }
        Ok(())
    }

    pub fn entity_count(&self) -> usize {
        self.channels.len()
    }
}
