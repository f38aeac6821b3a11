use serde::{Deserialize, Serialize};

/// Wrapping per-sender counter used to deduplicate one-shot events.
pub type SequenceIndex = u16;

/// Stable identifier for a participant in a session, assigned by the
/// transport layer when the participant joins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticipantId(pub u64);

/// Stable identifier for a shared simulated entity, valid for the whole
/// session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    Home,
    Away,
}

impl Team {
    pub fn opponent(self) -> Self {
        match self {
            Team::Home => Team::Away,
            Team::Away => Team::Home,
        }
    }
}
