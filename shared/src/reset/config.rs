/// Timing knobs for the goal-reset cycle.
///
/// Every participant runs these delays on its own clock; there is no resume
/// handshake, so small real-world skew between participants is tolerated.
#[derive(Clone, Debug)]
pub struct ResetConfig {
    /// Seconds the scored entity stays frozen before repositioning.
    pub freeze_delay: f32,
    /// Additional seconds after repositioning before dependent decorative
    /// entities are respawned.
    pub respawn_delay: f32,
}

impl Default for ResetConfig {
    fn default() -> Self {
        Self {
            freeze_delay: 3.0,
            respawn_delay: 0.5,
        }
    }
}
