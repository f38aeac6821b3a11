//! Byte-level framing of broadcast payloads.
//!
//! Each event code maps to exactly one message kind; the payload bytes are
//! the bincode encoding of that kind. Decode failures surface as
//! [`WireError`] so receive paths can log and drop the payload without
//! panicking on malformed input.

use crate::messages::impulse::ImpulseEvent;
use crate::transport::error::WireError;
use crate::world::snapshot::StateSnapshot;

pub fn encode_snapshot(snapshot: &StateSnapshot) -> Result<Vec<u8>, WireError> {
    Ok(bincode::serialize(snapshot)?)
}

pub fn decode_snapshot(payload: &[u8]) -> Result<StateSnapshot, WireError> {
    Ok(bincode::deserialize(payload)?)
}

pub fn encode_impulse(event: &ImpulseEvent) -> Result<Vec<u8>, WireError> {
    Ok(bincode::serialize(event)?)
}

pub fn decode_impulse(payload: &[u8]) -> Result<ImpulseEvent, WireError> {
    Ok(bincode::deserialize(payload)?)
}
