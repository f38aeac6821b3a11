//! # Pitchnet Shared
//! State-synchronization and event-deduplication functionality shared
//! between all participants of a pitchnet session.
//!
//! One participant per session (the transport layer's elected coordinator)
//! holds write authority over each shared entity and broadcasts
//! timestamped state snapshots on a fixed cadence. Every other participant
//! reconciles its locally simulated copy toward the latest snapshot,
//! blending small errors and hard-snapping large ones. One-shot impulse
//! events may originate anywhere and are deduplicated per sender by
//! sequence index before deterministic application on the fixed step.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod scoreboard;
mod sequence;
mod session;
mod time;
mod types;

pub mod messages;
pub mod reset;
pub mod transport;
pub mod world;

pub use messages::{
    deduplicator::SequencedEventDeduplicator, impulse::ImpulseEvent, queue::ImpulseQueue,
};
pub use reset::{
    config::ResetConfig,
    dependents::DependentRegistry,
    protocol::{GoalEvent, GoalResetProtocol, ResetPhase},
};
pub use transport::{
    error::{TransportError, WireError},
    event_code::EventCode,
    wire::{decode_impulse, decode_snapshot, encode_impulse, encode_snapshot},
    Reliability, SessionInfo, TransportChannel,
};
pub use world::{
    delegation::{
        authority_channel::{AuthorityAccessor, AuthorityStatus},
        coordinator::AuthorityCoordinator,
        error::AuthorityError,
    },
    physics::{BodyAccess, PhysicsBody, RigidState},
    replication::{
        config::ReplicatorConfig, error::ReplicationError, replicator::EntityStateReplicator,
    },
    snapshot::StateSnapshot,
};

pub use scoreboard::ScoreBoard;
pub use sequence::{
    sequence_distance, sequence_greater_than, sequence_less_than, SequenceCounter,
};
pub use session::{SessionConfig, SessionError, SyncSession};
pub use time::{Countdown, SessionInstant};
pub use types::{EntityId, ParticipantId, SequenceIndex, Team};
