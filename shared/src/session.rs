use std::collections::HashMap;

use glam::Vec3;
use log::{info, warn};
use thiserror::Error;

use crate::messages::deduplicator::SequencedEventDeduplicator;
use crate::messages::impulse::ImpulseEvent;
use crate::messages::queue::ImpulseQueue;
use crate::reset::config::ResetConfig;
use crate::reset::dependents::DependentRegistry;
use crate::reset::protocol::{GoalEvent, GoalResetProtocol, ResetPhase};
use crate::scoreboard::ScoreBoard;
use crate::sequence::SequenceCounter;
use crate::time::SessionInstant;
use crate::transport::error::{TransportError, WireError};
use crate::transport::event_code::EventCode;
use crate::transport::wire;
use crate::transport::{Reliability, SessionInfo, TransportChannel};
use crate::types::{EntityId, ParticipantId};
use crate::world::delegation::coordinator::AuthorityCoordinator;
use crate::world::delegation::error::AuthorityError;
use crate::world::physics::{BodyAccess, PhysicsBody, RigidState};
use crate::world::replication::config::ReplicatorConfig;
use crate::world::replication::replicator::EntityStateReplicator;

/// Errors surfaced by session-level operations
#[derive(Debug, Error)]
pub enum SessionError {
    /// Authority bookkeeping error
    #[error("Authority error: {0}")]
    Authority(#[from] AuthorityError),

    /// Transport send error
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Payload codec error
    #[error("Wire error: {0}")]
    Wire(#[from] WireError),
}

/// Tuning for one session's synchronization behavior.
#[derive(Clone, Debug, Default)]
pub struct SessionConfig {
    pub replicator: ReplicatorConfig,
    pub reset: ResetConfig,
}

/// The single owner of all synchronization state for one session.
///
/// Created when the local participant joins a session and dropped when it
/// leaves; everything it needs arrives through the constructor, so there is
/// no process-wide instance to reach for. The host engine drives it from
/// three places:
///
/// - `handle_event` from the transport receive callback (main update cycle);
/// - `fixed_tick` from the fixed physics step;
/// - `goal_scored` / `send_impulse` from domain triggers.
///
/// Receive-path problems (unknown codes, undecodable payloads, unregistered
/// entities) are logged and dropped; nothing in here ever takes the hosting
/// process down.
pub struct SyncSession {
    transport: Box<dyn TransportChannel>,
    membership: Box<dyn SessionInfo>,
    dependents: Box<dyn DependentRegistry>,
    replicator_config: ReplicatorConfig,
    authority: AuthorityCoordinator,
    replicators: HashMap<EntityId, EntityStateReplicator>,
    bodies: HashMap<EntityId, Box<dyn PhysicsBody>>,
    deduplicator: SequencedEventDeduplicator,
    impulse_queue: ImpulseQueue,
    sequence_counter: SequenceCounter,
    reset: GoalResetProtocol,
    scoreboard: ScoreBoard,
}

impl SyncSession {
    pub fn new(
        transport: Box<dyn TransportChannel>,
        membership: Box<dyn SessionInfo>,
        dependents: Box<dyn DependentRegistry>,
        config: SessionConfig,
    ) -> Self {
        let authority = AuthorityCoordinator::new(membership.as_ref());
        Self {
            transport,
            membership,
            dependents,
            replicator_config: config.replicator,
            authority,
            replicators: HashMap::new(),
            bodies: HashMap::new(),
            deduplicator: SequencedEventDeduplicator::new(),
            impulse_queue: ImpulseQueue::new(),
            sequence_counter: SequenceCounter::new(),
            reset: GoalResetProtocol::new(config.reset),
            scoreboard: ScoreBoard::new(),
        }
    }

    /// Brings a shared entity under synchronization. `spawn_pose`, when
    /// given, is where goal resets snap the entity back to.
    pub fn register_entity(
        &mut self,
        entity: EntityId,
        body: Box<dyn PhysicsBody>,
        spawn_pose: Option<RigidState>,
    ) -> Result<(), SessionError> {
        let accessor = self.authority.try_register_entity(entity)?;
        self.replicators.insert(
            entity,
            EntityStateReplicator::new(entity, self.replicator_config.clone(), accessor),
        );
        self.bodies.insert(entity, body);
        if let Some(pose) = spawn_pose {
            self.reset.register_spawn_pose(entity, pose);
        }
        info!("Entity {:?} registered for synchronization", entity);
        Ok(())
    }

    pub fn deregister_entity(&mut self, entity: EntityId) {
        self.authority.deregister_entity(entity);
        self.replicators.remove(&entity);
        self.bodies.remove(&entity);
        self.reset.deregister_spawn_pose(entity);
    }

    /// Call when the transport reports a coordinator change (host
    /// migration). Authority flips atomically for every registered entity;
    /// replicators pick the change up on their next tick.
    pub fn membership_changed(&mut self) -> Result<(), SessionError> {
        self.authority.refresh(self.membership.as_ref())?;
        Ok(())
    }

    /// Call when a participant leaves, so its dedup bookkeeping is pruned.
    pub fn participant_left(&mut self, participant: ParticipantId) {
        self.deduplicator.remove_sender(participant);
    }

    /// Transport receive callback: decodes, filters, and enqueues. Nothing
    /// is applied here; application happens on the next `fixed_tick`.
    pub fn handle_event(&mut self, sender: ParticipantId, code: u8, payload: &[u8]) {
        let code = match EventCode::from_byte(code) {
            Ok(code) => code,
            Err(error) => {
                warn!("Dropping payload from {:?}: {}", sender, error);
                return;
            }
        };

        match code {
            EventCode::Snapshot => match wire::decode_snapshot(payload) {
                Ok(snapshot) => match self.replicators.get_mut(&snapshot.entity) {
                    Some(replicator) => {
                        replicator.apply_snapshot(snapshot);
                    }
                    None => {
                        warn!(
                            "Snapshot for unregistered entity {:?} from {:?}; dropping",
                            snapshot.entity, sender
                        );
                    }
                },
                Err(error) => {
                    warn!("Undecodable snapshot payload from {:?}: {}", sender, error);
                }
            },
            EventCode::Impulse => match wire::decode_impulse(payload) {
                Ok(event) => {
                    // Dedup keys off the event's own sender field; the
                    // transport-level sender only matters for logging.
                    if self.deduplicator.should_apply(event.sender, event.sequence) {
                        self.impulse_queue.push(event);
                    }
                }
                Err(error) => {
                    warn!("Undecodable impulse payload from {:?}: {}", sender, error);
                }
            },
        }
    }

    /// Broadcasts a locally triggered impulse and queues it for local
    /// application on the next fixed tick.
    ///
    /// One send attempt only: on transport failure the error is returned
    /// for the caller to log, the local application still happens, and the
    /// snapshot stream re-converges remote state either way.
    pub fn send_impulse(
        &mut self,
        entity: EntityId,
        impulse: Vec3,
        lift: f32,
        contact_point: Option<Vec3>,
        now: SessionInstant,
    ) -> Result<(), SessionError> {
        let event = ImpulseEvent {
            entity,
            impulse,
            lift,
            contact_point,
            sender: self.membership.local_participant(),
            sequence: self.sequence_counter.advance(),
            sent_at: now,
        };

        // Local application goes through the same dedup filter, so a
        // transport echo of our own broadcast is rejected later.
        if self.deduplicator.should_apply(event.sender, event.sequence) {
            self.impulse_queue.push(event);
        }

        let payload = wire::encode_impulse(&event)?;
        self.transport
            .broadcast(EventCode::Impulse, &payload, Reliability::Reliable)?;
        Ok(())
    }

    /// Domain "goal scored" notification from the host's goal trigger.
    pub fn goal_scored(&mut self, event: GoalEvent) {
        self.scoreboard.record_goal(event.scoring_team);
        self.reset.goal_scored(event);
    }

    /// The fixed simulation step: applies queued impulses, runs snapshot
    /// send/reconcile for every registered entity, and advances the reset
    /// cycle.
    pub fn fixed_tick(&mut self, dt: f32, now: SessionInstant) {
        for event in self.impulse_queue.drain() {
            match self.bodies.body_mut(event.entity) {
                Some(body) => {
                    body.apply_impulse(event.resolved_impulse(), event.contact_point);
                }
                None => {
                    warn!(
                        "Impulse for unregistered entity {:?} from {:?}; skipping",
                        event.entity, event.sender
                    );
                }
            }
        }

        let transport = &mut self.transport;
        for (entity, replicator) in self.replicators.iter_mut() {
            let Some(body) = self.bodies.get_mut(entity) else {
                warn!("No body registered for {:?}; skipping replication", entity);
                continue;
            };

            if replicator.poll_send(dt) {
                let snapshot = match replicator.capture_snapshot(body.as_ref(), now) {
                    Ok(snapshot) => snapshot,
                    Err(error) => {
                        warn!("Snapshot capture failed: {}", error);
                        continue;
                    }
                };
                match wire::encode_snapshot(&snapshot) {
                    Ok(payload) => {
                        if let Err(error) = transport.broadcast(
                            EventCode::Snapshot,
                            &payload,
                            Reliability::UnreliableSequenced,
                        ) {
                            // No retry; the next cadence tick sends a
                            // fresher snapshot anyway.
                            warn!("Snapshot broadcast failed: {}", error);
                        }
                    }
                    Err(error) => {
                        warn!("Snapshot encode failed: {}", error);
                    }
                }
            } else if !replicator.is_authoritative() {
                replicator.reconcile_tick(body.as_mut(), dt);
            }
        }

        self.reset
            .tick(dt, &self.authority, &mut self.bodies, self.dependents.as_mut());
    }

    pub fn is_authority(&self, entity: EntityId) -> bool {
        self.authority.is_authority(entity)
    }

    pub fn scoreboard(&self) -> &ScoreBoard {
        &self.scoreboard
    }

    pub fn reset_phase(&self) -> ResetPhase {
        self.reset.phase()
    }

    pub fn queued_impulses(&self) -> usize {
        self.impulse_queue.len()
    }

    /// Current reconciliation target for an entity, mainly useful for
    /// diagnostics.
    pub fn reconciliation_target(&self, entity: EntityId) -> Option<RigidState> {
        self.replicators
            .get(&entity)
            .and_then(|replicator| replicator.target())
            .map(|snapshot| snapshot.state)
    }
}
