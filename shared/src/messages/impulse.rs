use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::time::SessionInstant;
use crate::types::{EntityId, ParticipantId, SequenceIndex};

/// A one-shot directional force application request, broadcast by whichever
/// participant observed the local trigger (e.g. a kick contact).
///
/// `(sender, sequence)` uniquely identifies the event. Receivers filter
/// through the deduplicator and then apply each unique pair at most once,
/// regardless of transport duplication or reordering.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImpulseEvent {
    pub entity: EntityId,
    /// Linear impulse in world space.
    pub impulse: Vec3,
    /// Extra vertical component, scaled separately so a flat contact can
    /// still loft the ball.
    pub lift: f32,
    /// World-space contact point, when the trigger knows one.
    pub contact_point: Option<Vec3>,
    pub sender: ParticipantId,
    pub sequence: SequenceIndex,
    pub sent_at: SessionInstant,
}

impl ImpulseEvent {
    /// The impulse actually handed to the physics engine: the directional
    /// component plus the vertical lift.
    pub fn resolved_impulse(&self) -> Vec3 {
        self.impulse + Vec3::Y * self.lift
    }
}
