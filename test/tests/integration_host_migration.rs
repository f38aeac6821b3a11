//! Coordinator migration: the surviving participant is elected, takes
//! authority over shared entities, and starts broadcasting snapshots,
//! while its replication state from the old authority is discarded.

use glam::Vec3;
use pitchnet_shared::{
    ParticipantId, ReplicatorConfig, SessionConfig, SessionInstant,
};
use pitchnet_test::{deliver_all, TestParticipant, BALL};

const FIRST_HOST: ParticipantId = ParticipantId(1);
const SURVIVOR: ParticipantId = ParticipantId(2);

fn fast_config() -> SessionConfig {
    SessionConfig {
        replicator: ReplicatorConfig {
            warmup_seconds: 0.0,
            snapshot_interval: 0.05,
            ..ReplicatorConfig::default()
        },
        ..SessionConfig::default()
    }
}

#[test]
fn survivor_takes_over_authority_and_broadcasting() {
    let mut host = TestParticipant::new(FIRST_HOST, FIRST_HOST, fast_config());
    let mut survivor = TestParticipant::new(SURVIVOR, FIRST_HOST, fast_config());

    host.add_ball(Vec3::ZERO);
    survivor.add_ball(Vec3::ZERO);

    // Normal operation: host broadcasts, survivor replicates.
    host.session
        .fixed_tick(0.05, SessionInstant::from_millis(100));
    deliver_all(&host.outbox, FIRST_HOST, &mut survivor.session);
    assert!(survivor.session.reconciliation_target(BALL).is_some());
    assert!(!survivor.session.is_authority(BALL));

    // Host drops; the transport elects the survivor and tells it so.
    survivor.membership.set_coordinator(SURVIVOR);
    survivor.session.membership_changed().unwrap();

    assert!(survivor.session.is_authority(BALL));

    // First tick as authority: the stale reconciliation target from the old
    // host is forgotten, and the survivor now broadcasts snapshots itself.
    survivor
        .session
        .fixed_tick(0.05, SessionInstant::from_millis(200));

    assert!(survivor.session.reconciliation_target(BALL).is_none());
    assert!(!survivor.outbox.is_empty());
}

#[test]
fn departed_participant_dedup_state_is_pruned() {
    let mut kicker = TestParticipant::new(FIRST_HOST, FIRST_HOST, fast_config());
    let mut receiver = TestParticipant::new(SURVIVOR, FIRST_HOST, fast_config());

    kicker.add_ball(Vec3::ZERO);
    receiver.add_ball(Vec3::ZERO);

    kicker
        .session
        .send_impulse(BALL, Vec3::X, 0.0, None, SessionInstant::from_millis(100))
        .unwrap();
    deliver_all(&kicker.outbox, FIRST_HOST, &mut receiver.session);
    receiver
        .session
        .fixed_tick(0.02, SessionInstant::from_millis(150));

    // Kicker leaves; its dedup bookkeeping goes with it.
    receiver.session.participant_left(FIRST_HOST);

    // No panic, and fresh state works if the id is ever reused.
    receiver
        .session
        .fixed_tick(0.02, SessionInstant::from_millis(200));
}
