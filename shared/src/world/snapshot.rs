use serde::{Deserialize, Serialize};

use crate::time::SessionInstant;
use crate::types::EntityId;
use crate::world::physics::RigidState;

/// A timestamped copy of one entity's kinematic state, produced only by the
/// entity's authority holder on the replication cadence.
///
/// Replicas keep at most one snapshot per entity: last-writer-wins by
/// capture stamp, so out-of-order delivery resolves itself and a superseded
/// snapshot is dropped on arrival.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub entity: EntityId,
    pub state: RigidState,
    pub captured_at: SessionInstant,
}

impl StateSnapshot {
    /// Whether this snapshot may replace `last_applied`. A snapshot with the
    /// same stamp is accepted, which makes redelivery of the latest snapshot
    /// harmless.
    pub fn supersedes(&self, last_applied: Option<&SessionInstant>) -> bool {
        match last_applied {
            None => true,
            Some(last) => !last.is_more_recent_than(&self.captured_at),
        }
    }
}
