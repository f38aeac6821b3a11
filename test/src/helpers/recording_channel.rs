use std::cell::RefCell;
use std::rc::Rc;

use pitchnet_shared::{
    EventCode, ParticipantId, Reliability, SyncSession, TransportChannel, TransportError,
};

/// One broadcast captured by a [`RecordingChannel`].
#[derive(Clone, Debug)]
pub struct SentEvent {
    pub code: EventCode,
    pub payload: Vec<u8>,
    pub reliability: Reliability,
}

/// Cloneable handle onto a [`RecordingChannel`]'s outbox.
#[derive(Clone, Default)]
pub struct SentLog {
    events: Rc<RefCell<Vec<SentEvent>>>,
}

impl SentLog {
    /// Takes everything broadcast so far, in send order.
    pub fn drain(&self) -> Vec<SentEvent> {
        self.events.borrow_mut().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

/// Transport stand-in that records every broadcast instead of sending it.
/// Tests shuttle the recorded payloads into other sessions by hand, which
/// makes duplication, reordering and loss trivial to stage.
pub struct RecordingChannel {
    log: SentLog,
}

impl RecordingChannel {
    /// Returns the channel and a handle the test keeps for itself.
    pub fn new() -> (Self, SentLog) {
        let log = SentLog::default();
        (Self { log: log.clone() }, log)
    }
}

impl TransportChannel for RecordingChannel {
    fn broadcast(
        &mut self,
        code: EventCode,
        payload: &[u8],
        reliability: Reliability,
    ) -> Result<(), TransportError> {
        self.log.events.borrow_mut().push(SentEvent {
            code,
            payload: payload.to_vec(),
            reliability,
        });
        Ok(())
    }
}

/// Transport stand-in that refuses every broadcast, for exercising the
/// not-connected path.
pub struct FailingChannel;

impl TransportChannel for FailingChannel {
    fn broadcast(
        &mut self,
        code: EventCode,
        _payload: &[u8],
        _reliability: Reliability,
    ) -> Result<(), TransportError> {
        Err(TransportError::NotConnected { code })
    }
}

/// Drains `from`'s outbox and delivers every payload to `to`, as if the
/// relay had fanned the broadcasts out. Returns how many were delivered.
pub fn deliver_all(from: &SentLog, from_id: ParticipantId, to: &mut SyncSession) -> usize {
    let events = from.drain();
    let count = events.len();
    for event in events {
        to.handle_event(from_id, event.code.to_byte(), &event.payload);
    }
    count
}
