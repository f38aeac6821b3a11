use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::types::EntityId;

/// Full kinematic state of one simulated rigid body: the fields the
/// authority holder broadcasts and replicas reconcile toward.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RigidState {
    pub position: Vec3,
    pub rotation: Quat,
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,
}

impl RigidState {
    /// A pose with zeroed velocities, e.g. a registered spawn pose.
    pub fn at_rest(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
        }
    }
}

impl Default for RigidState {
    fn default() -> Self {
        Self::at_rest(Vec3::ZERO, Quat::IDENTITY)
    }
}

/// Seam to the host physics engine for one entity. The library never
/// simulates; it only reads state, hard-sets state, blends fields, and
/// requests instantaneous impulses through this trait.
pub trait PhysicsBody {
    fn rigid_state(&self) -> RigidState;

    /// Hard-set of the full state, with no impulse and no induced velocity.
    fn set_rigid_state(&mut self, state: RigidState);

    fn set_position(&mut self, position: Vec3);
    fn set_rotation(&mut self, rotation: Quat);
    fn set_linear_velocity(&mut self, velocity: Vec3);
    fn set_angular_velocity(&mut self, velocity: Vec3);

    /// Adds to velocity instantaneously. `contact_point` lets engines that
    /// support it induce spin from off-center hits; engines that don't may
    /// ignore it.
    fn apply_impulse(&mut self, impulse: Vec3, contact_point: Option<Vec3>);
}

/// Lookup of the engine-side body handle for an entity. The session
/// implements this over its registry; tests implement it directly.
pub trait BodyAccess {
    fn body_mut(&mut self, entity: EntityId) -> Option<&mut dyn PhysicsBody>;
}

impl BodyAccess for std::collections::HashMap<EntityId, Box<dyn PhysicsBody>> {
    fn body_mut(&mut self, entity: EntityId) -> Option<&mut dyn PhysicsBody> {
        self.get_mut(&entity).map(|body| body.as_mut() as &mut dyn PhysicsBody)
    }
}
