use glam::Vec3;
use pitchnet_shared::{
    EntityId, ParticipantId, RigidState, SessionConfig, SyncSession,
};

use super::{
    CountingRegistry, MembershipHandle, RecordingChannel, RegistryHandle, SentLog, SharedBody,
    TestMembership,
};

/// The shared ball entity used by most scenarios.
pub const BALL: EntityId = EntityId(1);

/// One fully wired session under test, with handles onto all of its seams.
pub struct TestParticipant {
    pub id: ParticipantId,
    pub session: SyncSession,
    pub outbox: SentLog,
    pub membership: MembershipHandle,
    pub registry: RegistryHandle,
}

impl TestParticipant {
    pub fn new(id: ParticipantId, coordinator: ParticipantId, config: SessionConfig) -> Self {
        let (channel, outbox) = RecordingChannel::new();
        let (membership, membership_handle) = TestMembership::new(id, coordinator);
        let (registry, registry_handle) = CountingRegistry::new();

        let session = SyncSession::new(
            Box::new(channel),
            Box::new(membership),
            Box::new(registry),
            config,
        );

        Self {
            id,
            session,
            outbox,
            membership: membership_handle,
            registry: registry_handle,
        }
    }

    /// Registers a ball body at `position`, which doubles as the goal-reset
    /// spawn pose. Returns the test's handle onto the body.
    pub fn add_ball(&mut self, position: Vec3) -> SharedBody {
        let body = SharedBody::at_rest(position);
        let spawn = RigidState::at_rest(position, glam::Quat::IDENTITY);
        self.session
            .register_entity(BALL, Box::new(body.clone()), Some(spawn))
            .expect("ball registers once");
        body
    }
}
