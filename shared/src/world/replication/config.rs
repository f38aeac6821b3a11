/// Numeric knobs governing snapshot cadence and replica reconciliation.
///
/// Cloned into every [`EntityStateReplicator`] at construction; no run-time
/// mutation. The blend rates are per-tick factors, so blending behaves as a
/// first-order low-pass filter on the replica's pose rather than a linear
/// interpolation between raw values.
///
/// [`EntityStateReplicator`]: crate::world::replication::EntityStateReplicator
#[derive(Clone, Debug)]
pub struct ReplicatorConfig {
    /// Positional error beyond which reconciliation hard-snaps instead of
    /// blending. Meters.
    pub teleport_distance: f32,
    /// Rotational error beyond which reconciliation hard-snaps. Degrees.
    pub teleport_angle_degrees: f32,
    /// Per-tick blend factor for position, in (0, 1]. 1.0 lands on the
    /// target in a single tick.
    pub position_blend_rate: f32,
    /// Per-tick blend factor for rotation, in (0, 1].
    pub rotation_blend_rate: f32,
    /// Per-tick blend factor for velocities, in (0, 1]. Only used when the
    /// follow flags below are set.
    pub velocity_blend_rate: f32,
    /// Blend linear velocity toward the snapshot value. Constant velocity
    /// overwriting can fight local collision response, so this is opt-out.
    pub follow_velocity: bool,
    /// Blend angular velocity toward the snapshot value.
    pub follow_angular_velocity: bool,
    /// Grace period after creation or an authority change during which
    /// hard-snap correction is suppressed. Seconds.
    pub warmup_seconds: f32,
    /// Interval between authority-side snapshot broadcasts. Seconds.
    pub snapshot_interval: f32,
}

impl Default for ReplicatorConfig {
    fn default() -> Self {
        Self {
            teleport_distance: 2.0,
            teleport_angle_degrees: 60.0,
            position_blend_rate: 0.25,
            rotation_blend_rate: 0.25,
            velocity_blend_rate: 0.5,
            follow_velocity: true,
            follow_angular_velocity: false,
            warmup_seconds: 1.0,
            snapshot_interval: 0.05,
        }
    }
}
