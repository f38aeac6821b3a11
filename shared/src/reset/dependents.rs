/// Registry of locally owned decorative entities (e.g. breakable props)
/// that need restoring after a goal.
///
/// Decorative state is not shared over the network: every participant keeps
/// its own registry, and both operations must be idempotent because the
/// reset cycle invokes them unconditionally. Restoring an already intact
/// prop twice is harmless by contract.
///
/// Dependents register themselves here at creation time; the reset cycle
/// never discovers them by name or tag lookup.
pub trait DependentRegistry {
    /// Returns every registered dependent to its intact state.
    fn restore_intact(&mut self);

    /// Recreates any registered dependent whose instance has been destroyed.
    fn respawn_missing(&mut self);
}
