use std::sync::{Arc, RwLock};

use crate::world::delegation::error::AuthorityError;

/// Whether the local participant holds write authority over an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthorityStatus {
    /// This participant writes the canonical state and broadcasts snapshots.
    Authoritative,
    /// This participant reconciles its local copy toward received snapshots.
    Replica,
}

impl AuthorityStatus {
    pub fn is_authoritative(self) -> bool {
        matches!(self, AuthorityStatus::Authoritative)
    }
}

// AuthorityChannel
//
// One channel per registered entity, split into a single mutator (held by
// the coordinator) and any number of cloneable accessors (held by
// replicators and other readers). The epoch increments on every status
// flip, so readers can detect host migration by polling instead of needing
// a callback wired through.
#[derive(Clone, Debug)]
pub(crate) struct AuthorityChannel {
    data: Arc<RwLock<AuthorityData>>,
}

impl PartialEq for AuthorityChannel {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

impl AuthorityChannel {
    pub(crate) fn new_channel(initial: AuthorityStatus) -> (AuthorityMutator, AuthorityAccessor) {
        let channel = Self {
            data: Arc::new(RwLock::new(AuthorityData {
                status: initial,
                epoch: 0,
            })),
        };

        let mutator = AuthorityMutator::new(&channel);
        let accessor = AuthorityAccessor::new(&channel);

        (mutator, accessor)
    }

    fn read(&self) -> Result<(AuthorityStatus, u64), AuthorityError> {
        let data = self
            .data
            .as_ref()
            .read()
            .map_err(|_| AuthorityError::LockPoisoned)?;
        Ok((data.status, data.epoch))
    }

    fn set_status(&self, status: AuthorityStatus) -> Result<(), AuthorityError> {
        let mut data = self
            .data
            .as_ref()
            .write()
            .map_err(|_| AuthorityError::LockPoisoned)?;
        if data.status != status {
            data.status = status;
            data.epoch += 1;
        }
        Ok(())
    }
}

#[derive(Debug)]
struct AuthorityData {
    status: AuthorityStatus,
    epoch: u64,
}

// AuthorityAccessor
#[derive(Clone, Debug, PartialEq)]
pub struct AuthorityAccessor {
    channel: AuthorityChannel,
}

impl AuthorityAccessor {
    fn new(channel: &AuthorityChannel) -> Self {
        Self {
            channel: channel.clone(),
        }
    }

    /// Get the current status (panicking version)
    ///
    /// # Panics
    ///
    /// Panics if the lock is poisoned.
    /// Consider using `try_status` for non-panicking error handling.
    pub fn status(&self) -> AuthorityStatus {
        self.try_status()
            .expect("Lock on authority state is held by current thread")
    }

    /// Get the current status (non-panicking version)
    pub fn try_status(&self) -> Result<AuthorityStatus, AuthorityError> {
        Ok(self.channel.read()?.0)
    }

    /// Epoch of the last status flip; compare against a remembered value to
    /// detect authority changes since the last poll.
    pub fn epoch(&self) -> u64 {
        self.try_epoch()
            .expect("Lock on authority state is held by current thread")
    }

    pub fn try_epoch(&self) -> Result<u64, AuthorityError> {
        Ok(self.channel.read()?.1)
    }
}

// AuthorityMutator
// no Clone necessary
pub(crate) struct AuthorityMutator {
    channel: AuthorityChannel,
}

impl AuthorityMutator {
    fn new(channel: &AuthorityChannel) -> Self {
        Self {
            channel: channel.clone(),
        }
    }

    pub(crate) fn try_set_status(&self, status: AuthorityStatus) -> Result<(), AuthorityError> {
        self.channel.set_status(status)
    }
}
