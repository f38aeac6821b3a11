use std::collections::VecDeque;
use std::mem;

use crate::messages::impulse::ImpulseEvent;

/// Holding pen between the receive callback and the fixed simulation step.
///
/// Deduplicated impulses are pushed here as they arrive and drained in one
/// batch at the start of the next fixed tick, so application time is
/// deterministic within a tick regardless of when delivery happened.
/// Arrival order is preserved; events are never reordered.
pub struct ImpulseQueue {
    pending: VecDeque<ImpulseEvent>,
}

impl ImpulseQueue {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
        }
    }

    pub fn push(&mut self, event: ImpulseEvent) {
        self.pending.push_back(event);
    }

    /// Atomically takes everything queued so far, in arrival order.
    pub fn drain(&mut self) -> Vec<ImpulseEvent> {
        Vec::from(mem::take(&mut self.pending))
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Default for ImpulseQueue {
    fn default() -> Self {
        Self::new()
    }
}
