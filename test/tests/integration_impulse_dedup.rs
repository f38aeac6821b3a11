//! One-shot impulse events: broadcast, duplication by the transport, and
//! at-most-once application on the fixed step.

use glam::Vec3;
use pitchnet_shared::{ParticipantId, SessionConfig, SessionInstant};
use pitchnet_test::{FailingChannel, TestParticipant, BALL};

const COORDINATOR: ParticipantId = ParticipantId(1);
const KICKER: ParticipantId = ParticipantId(2);

#[test]
fn duplicated_delivery_applies_exactly_once() {
    let mut kicker = TestParticipant::new(KICKER, COORDINATOR, SessionConfig::default());
    let mut receiver = TestParticipant::new(COORDINATOR, COORDINATOR, SessionConfig::default());

    kicker.add_ball(Vec3::ZERO);
    let receiver_ball = receiver.add_ball(Vec3::ZERO);

    kicker
        .session
        .send_impulse(
            BALL,
            Vec3::new(5.0, 0.0, 0.0),
            2.0,
            None,
            SessionInstant::from_millis(100),
        )
        .unwrap();

    // The transport duplicates the broadcast.
    let sent = kicker.outbox.drain();
    assert_eq!(sent.len(), 1);
    let event = &sent[0];
    receiver
        .session
        .handle_event(KICKER, event.code.to_byte(), &event.payload);
    receiver
        .session
        .handle_event(KICKER, event.code.to_byte(), &event.payload);

    assert_eq!(receiver.session.queued_impulses(), 1);

    receiver
        .session
        .fixed_tick(0.02, SessionInstant::from_millis(150));

    assert_eq!(receiver_ball.applied_impulses().len(), 1);
    assert_eq!(receiver_ball.linear_velocity(), Vec3::new(5.0, 2.0, 0.0));
}

#[test]
fn transport_echo_of_own_impulse_is_filtered() {
    let mut kicker = TestParticipant::new(KICKER, COORDINATOR, SessionConfig::default());
    let ball = kicker.add_ball(Vec3::ZERO);

    kicker
        .session
        .send_impulse(
            BALL,
            Vec3::new(3.0, 0.0, 0.0),
            0.0,
            None,
            SessionInstant::from_millis(100),
        )
        .unwrap();

    // The relay echoes our own broadcast back at us.
    let sent = kicker.outbox.drain();
    let event = &sent[0];
    kicker
        .session
        .handle_event(KICKER, event.code.to_byte(), &event.payload);

    kicker
        .session
        .fixed_tick(0.02, SessionInstant::from_millis(150));

    assert_eq!(ball.applied_impulses().len(), 1);
}

#[test]
fn impulses_apply_in_arrival_order() {
    let mut kicker = TestParticipant::new(KICKER, COORDINATOR, SessionConfig::default());
    let mut receiver = TestParticipant::new(COORDINATOR, COORDINATOR, SessionConfig::default());

    kicker.add_ball(Vec3::ZERO);
    let receiver_ball = receiver.add_ball(Vec3::ZERO);

    kicker
        .session
        .send_impulse(BALL, Vec3::X, 0.0, None, SessionInstant::from_millis(100))
        .unwrap();
    kicker
        .session
        .send_impulse(BALL, Vec3::Z, 0.0, None, SessionInstant::from_millis(110))
        .unwrap();

    // Delivered in reverse send order; no reordering is attempted.
    let mut sent = kicker.outbox.drain();
    sent.reverse();
    for event in &sent {
        receiver
            .session
            .handle_event(KICKER, event.code.to_byte(), &event.payload);
    }

    receiver
        .session
        .fixed_tick(0.02, SessionInstant::from_millis(200));

    assert_eq!(
        receiver_ball.applied_impulses(),
        vec![Vec3::Z, Vec3::X],
        "arrival order is application order"
    );
}

#[test]
fn send_failure_still_applies_locally() {
    let (membership, _handle) =
        pitchnet_test::TestMembership::new(KICKER, COORDINATOR);
    let (registry, _registry_handle) = pitchnet_test::CountingRegistry::new();
    let mut session = pitchnet_shared::SyncSession::new(
        Box::new(FailingChannel),
        Box::new(membership),
        Box::new(registry),
        SessionConfig::default(),
    );

    let ball = pitchnet_test::SharedBody::at_rest(Vec3::ZERO);
    session
        .register_entity(BALL, Box::new(ball.clone()), None)
        .unwrap();

    let result = session.send_impulse(
        BALL,
        Vec3::new(1.0, 0.0, 0.0),
        0.0,
        None,
        SessionInstant::from_millis(100),
    );
    assert!(result.is_err(), "broadcast failure is reported, once");

    // The locally observed trigger still lands on the local simulation.
    session.fixed_tick(0.02, SessionInstant::from_millis(150));
    assert_eq!(ball.applied_impulses().len(), 1);
}

#[test]
fn impulse_for_unregistered_entity_is_skipped() {
    let mut kicker = TestParticipant::new(KICKER, COORDINATOR, SessionConfig::default());
    let mut receiver = TestParticipant::new(COORDINATOR, COORDINATOR, SessionConfig::default());

    kicker.add_ball(Vec3::ZERO);
    // Receiver has no entities registered at all.

    kicker
        .session
        .send_impulse(BALL, Vec3::X, 0.0, None, SessionInstant::from_millis(100))
        .unwrap();

    let sent = kicker.outbox.drain();
    let event = &sent[0];
    receiver
        .session
        .handle_event(KICKER, event.code.to_byte(), &event.payload);

    // Logged and skipped; no panic.
    receiver
        .session
        .fixed_tick(0.02, SessionInstant::from_millis(150));
}

#[test]
fn malformed_payloads_are_dropped_without_panic() {
    let mut receiver = TestParticipant::new(COORDINATOR, COORDINATOR, SessionConfig::default());
    receiver.add_ball(Vec3::ZERO);

    // Unknown event code.
    receiver.session.handle_event(KICKER, 99, &[1, 2, 3]);
    // Valid code, garbage payload.
    receiver.session.handle_event(KICKER, 2, &[0xde, 0xad]);
    receiver.session.handle_event(KICKER, 1, &[]);

    assert_eq!(receiver.session.queued_impulses(), 0);
}
