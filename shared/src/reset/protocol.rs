use std::collections::HashMap;

use log::{info, warn};

use crate::reset::config::ResetConfig;
use crate::reset::dependents::DependentRegistry;
use crate::time::Countdown;
use crate::types::{EntityId, Team};
use crate::world::delegation::coordinator::AuthorityCoordinator;
use crate::world::physics::{BodyAccess, RigidState};

/// Phase of the goal-reset cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetPhase {
    Idle,
    /// Holding still while the freeze delay runs down.
    Frozen,
    /// The authority holder snaps the scored entity back to its spawn pose;
    /// replicas pass through without mutating.
    AwaitingReposition,
    /// Waiting out the respawn delay before dependents are restored.
    RespawningDependents,
}

/// The domain event that starts a reset cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GoalEvent {
    pub scoring_team: Team,
    /// The entity to freeze and reposition (the ball).
    pub entity: EntityId,
}

/// Coordinates the cross-participant reset of a scored entity:
/// freeze, delay, reposition (authority only), respawn dependents
/// (every participant), resume.
///
/// Each participant runs its own copy of this machine off its local clock;
/// there is no network message in the cycle. A new goal always preempts an
/// in-flight cycle (restart semantics): the running countdown is replaced
/// and the generation counter advances, so nothing scheduled by the
/// abandoned cycle can fire later.
pub struct GoalResetProtocol {
    config: ResetConfig,
    phase: ResetPhase,
    /// Increments on every `goal_scored`. A cycle's deferred work lives in
    /// `countdown`, which is owned by the current generation; a restart
    /// replaces it outright.
    generation: u64,
    countdown: Countdown,
    active_goal: Option<GoalEvent>,
    spawn_poses: HashMap<EntityId, RigidState>,
}

impl GoalResetProtocol {
    pub fn new(config: ResetConfig) -> Self {
        Self {
            config,
            phase: ResetPhase::Idle,
            generation: 0,
            countdown: Countdown::idle(),
            active_goal: None,
            spawn_poses: HashMap::new(),
        }
    }

    pub fn phase(&self) -> ResetPhase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn active_goal(&self) -> Option<&GoalEvent> {
        self.active_goal.as_ref()
    }

    /// Records where `entity` should be snapped back to after a goal.
    /// Velocities in `pose` are ignored; the reposition always comes to
    /// rest.
    pub fn register_spawn_pose(&mut self, entity: EntityId, pose: RigidState) {
        self.spawn_poses
            .insert(entity, RigidState::at_rest(pose.position, pose.rotation));
    }

    pub fn deregister_spawn_pose(&mut self, entity: EntityId) {
        self.spawn_poses.remove(&entity);
    }

    /// Starts a reset cycle, preempting any cycle still in flight.
    pub fn goal_scored(&mut self, event: GoalEvent) {
        if self.phase != ResetPhase::Idle {
            info!(
                "Goal for {:?} preempts reset cycle {} (was in {:?})",
                event.scoring_team, self.generation, self.phase
            );
        }

        self.generation += 1;
        self.phase = ResetPhase::Frozen;
        self.countdown = Countdown::start(self.config.freeze_delay);
        self.active_goal = Some(event);

        info!(
            "Reset cycle {} started: goal for {:?}, freezing {:?} for {}s",
            self.generation, event.scoring_team, event.entity, self.config.freeze_delay
        );
    }

    /// Advances the cycle by one fixed step. Repositioning happens on the
    /// tick the freeze delay expires; dependents are restored when the
    /// respawn delay expires after that.
    pub fn tick(
        &mut self,
        dt: f32,
        authority: &AuthorityCoordinator,
        bodies: &mut dyn BodyAccess,
        dependents: &mut dyn DependentRegistry,
    ) {
        match self.phase {
            ResetPhase::Idle => {}
            ResetPhase::Frozen => {
                if self.countdown.tick(dt) {
                    self.phase = ResetPhase::AwaitingReposition;
                    self.reposition(authority, bodies);
                    self.phase = ResetPhase::RespawningDependents;
                    self.countdown = Countdown::start(self.config.respawn_delay);
                }
            }
            // Entered and left within the Frozen arm above; nothing waits
            // here across ticks.
            ResetPhase::AwaitingReposition => {}
            ResetPhase::RespawningDependents => {
                if self.countdown.tick(dt) {
                    dependents.restore_intact();
                    dependents.respawn_missing();
                    info!("Reset cycle {} complete", self.generation);
                    self.phase = ResetPhase::Idle;
                    self.active_goal = None;
                }
            }
        }
    }

    fn reposition(&mut self, authority: &AuthorityCoordinator, bodies: &mut dyn BodyAccess) {
        let Some(goal) = self.active_goal else {
            return;
        };

        if !authority.is_authority(goal.entity) {
            // Replicas wait out the same window without mutating; the
            // authoritative pose arrives through the snapshot stream.
            return;
        }

        let Some(pose) = self.spawn_poses.get(&goal.entity) else {
            warn!(
                "No spawn pose registered for {:?}; skipping reposition",
                goal.entity
            );
            return;
        };

        match bodies.body_mut(goal.entity) {
            Some(body) => {
                body.set_rigid_state(*pose);
                info!(
                    "Repositioned {:?} to spawn pose at {:?}",
                    goal.entity, pose.position
                );
            }
            None => {
                warn!("No body registered for {:?}; skipping reposition", goal.entity);
            }
        }
    }
}
