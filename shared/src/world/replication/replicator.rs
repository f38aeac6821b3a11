use log::{info, warn};

use crate::time::SessionInstant;
use crate::types::EntityId;
use crate::world::delegation::authority_channel::AuthorityAccessor;
use crate::world::physics::PhysicsBody;
use crate::world::replication::config::ReplicatorConfig;
use crate::world::replication::error::ReplicationError;
use crate::world::snapshot::StateSnapshot;

/// Keeps one shared entity's simulated state consistent across participants
/// without giving every participant full simulation authority.
///
/// On the authority holder, [`poll_send`] paces snapshot capture on the
/// replication cadence and [`capture_snapshot`] reads the body. On every
/// other participant, [`apply_snapshot`] stores arriving snapshots as the
/// reconciliation target (last-writer-wins by capture stamp) and
/// [`reconcile_tick`] pulls the locally simulated copy toward the target
/// every fixed step: a hard snap when the error exceeds the teleport
/// thresholds, an exponential blend otherwise.
///
/// Authority can change mid-session (host migration). The replicator polls
/// its [`AuthorityAccessor`]'s epoch and, on a change, forgets its target,
/// its staleness cursor and its warm-up progress, so a stale stamp from the
/// previous authority's clock can never wedge snapshot acceptance and the
/// fresh connection window gets the same snap suppression as a new join.
///
/// A replica that stops hearing snapshots simply stops correcting; local
/// simulation carries on until the stream resumes.
///
/// [`poll_send`]: EntityStateReplicator::poll_send
/// [`capture_snapshot`]: EntityStateReplicator::capture_snapshot
/// [`apply_snapshot`]: EntityStateReplicator::apply_snapshot
/// [`reconcile_tick`]: EntityStateReplicator::reconcile_tick
pub struct EntityStateReplicator {
    entity: EntityId,
    config: ReplicatorConfig,
    authority: AuthorityAccessor,
    observed_epoch: u64,
    target: Option<StateSnapshot>,
    last_applied: Option<SessionInstant>,
    /// Seconds since creation or the last authority change.
    active_for: f32,
    send_accumulator: f32,
}

impl EntityStateReplicator {
    pub fn new(entity: EntityId, config: ReplicatorConfig, authority: AuthorityAccessor) -> Self {
        let observed_epoch = authority.epoch();
        Self {
            entity,
            config,
            authority,
            observed_epoch,
            target: None,
            last_applied: None,
            active_for: 0.0,
            send_accumulator: 0.0,
        }
    }

    pub fn entity(&self) -> EntityId {
        self.entity
    }

    pub fn is_authoritative(&self) -> bool {
        self.authority.status().is_authoritative()
    }

    /// The current reconciliation target, if any snapshot has been accepted
    /// since the last authority change.
    pub fn target(&self) -> Option<&StateSnapshot> {
        self.target.as_ref()
    }

    fn sync_authority_epoch(&mut self) {
        let epoch = self.authority.epoch();
        if epoch != self.observed_epoch {
            info!(
                "Authority changed for entity {:?} (epoch {} -> {}), resetting reconciliation state",
                self.entity, self.observed_epoch, epoch
            );
            self.observed_epoch = epoch;
            self.target = None;
            self.last_applied = None;
            self.active_for = 0.0;
            self.send_accumulator = 0.0;
        }
    }

    /// Authority-side cadence check: accumulates `dt` and returns true when
    /// a snapshot is due. Always false on replicas.
    pub fn poll_send(&mut self, dt: f32) -> bool {
        self.sync_authority_epoch();
        if !self.is_authoritative() {
            return false;
        }

        self.send_accumulator += dt;
        if self.send_accumulator >= self.config.snapshot_interval {
            self.send_accumulator -= self.config.snapshot_interval;
            return true;
        }
        false
    }

    /// Authority-only read of the body's current state, stamped with the
    /// session clock. No side effects beyond the read.
    pub fn capture_snapshot(
        &self,
        body: &dyn PhysicsBody,
        now: SessionInstant,
    ) -> Result<StateSnapshot, ReplicationError> {
        if !self.is_authoritative() {
            return Err(ReplicationError::NotAuthoritative {
                entity: self.entity,
                operation: "capture_snapshot",
            });
        }

        Ok(StateSnapshot {
            entity: self.entity,
            state: body.rigid_state(),
            captured_at: now,
        })
    }

    /// Replica-side snapshot intake. Returns true if the snapshot became the
    /// new reconciliation target, false if it was stale, misrouted, or this
    /// participant is the authority.
    pub fn apply_snapshot(&mut self, snapshot: StateSnapshot) -> bool {
        self.sync_authority_epoch();

        if self.is_authoritative() {
            warn!(
                "Authority for entity {:?} received a snapshot broadcast; ignoring",
                self.entity
            );
            return false;
        }

        if snapshot.entity != self.entity {
            warn!(
                "Snapshot for entity {:?} routed to replicator for {:?}; ignoring",
                snapshot.entity, self.entity
            );
            return false;
        }

        if !snapshot.supersedes(self.last_applied.as_ref()) {
            // Stale, out-of-order arrival. Not an error.
            return false;
        }

        self.last_applied = Some(snapshot.captured_at);
        self.target = Some(snapshot);
        true
    }

    /// Replica-side fixed-step reconciliation of the simulated body toward
    /// the current target. No-op on the authority or when no target exists.
    pub fn reconcile_tick(&mut self, body: &mut dyn PhysicsBody, dt: f32) {
        self.sync_authority_epoch();
        if self.is_authoritative() {
            return;
        }

        self.active_for += dt;

        let Some(target) = self.target else {
            return;
        };

        let current = body.rigid_state();
        let distance = current.position.distance(target.state.position);
        let angle = current.rotation.angle_between(target.state.rotation);

        let warmed_up = self.active_for >= self.config.warmup_seconds;
        let beyond_threshold = distance > self.config.teleport_distance
            || angle > self.config.teleport_angle_degrees.to_radians();

        if warmed_up && beyond_threshold {
            // Hard set, never an impulse: correcting through the physics
            // engine would induce spurious velocity.
            body.set_rigid_state(target.state);
            info!(
                "Snapped entity {:?} to target (error: {:.2}m, {:.1}deg)",
                self.entity,
                distance,
                angle.to_degrees()
            );
            return;
        }

        body.set_position(
            current
                .position
                .lerp(target.state.position, self.config.position_blend_rate),
        );
        body.set_rotation(
            current
                .rotation
                .slerp(target.state.rotation, self.config.rotation_blend_rate)
                .normalize(),
        );

        if self.config.follow_velocity {
            body.set_linear_velocity(current.linear_velocity.lerp(
                target.state.linear_velocity,
                self.config.velocity_blend_rate,
            ));
        }
        if self.config.follow_angular_velocity {
            body.set_angular_velocity(current.angular_velocity.lerp(
                target.state.angular_velocity,
                self.config.velocity_blend_rate,
            ));
        }
    }
}
