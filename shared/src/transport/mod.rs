pub mod error;
pub mod event_code;
pub mod wire;

use crate::types::ParticipantId;

use error::TransportError;
use event_code::EventCode;

/// Delivery class requested for a broadcast.
///
/// Snapshots go out `UnreliableSequenced`: losing one is fine because the
/// next supersedes it anyway. Impulses go out `Reliable`: they are one-shot
/// and must eventually arrive, though the transport may duplicate or
/// reorder them (receivers deduplicate).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reliability {
    UnreliableSequenced,
    Reliable,
}

/// Fire-and-forget broadcast seam to the relay/event-bus this library is
/// hosted on. Implementations queue the payload for delivery to every other
/// participant in the session and return without waiting for acknowledgment.
///
/// Failures are reported to the caller exactly once; the library logs them
/// and never retries, because gameplay state is continuously re-synchronized
/// by the snapshot stream regardless.
pub trait TransportChannel {
    fn broadcast(
        &mut self,
        code: EventCode,
        payload: &[u8],
        reliability: Reliability,
    ) -> Result<(), TransportError>;
}

/// Session membership queries answered by the transport layer.
///
/// Coordinator election (and re-election when the prior coordinator
/// disconnects) belongs to the transport layer; this trait only reads the
/// result out.
pub trait SessionInfo {
    fn local_participant(&self) -> ParticipantId;

    /// The currently elected coordinating participant, if the session has
    /// one. `None` means election is still in flight.
    fn coordinator(&self) -> Option<ParticipantId>;

    fn is_coordinator(&self) -> bool {
        self.coordinator() == Some(self.local_participant())
    }
}
