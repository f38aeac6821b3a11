use crate::transport::error::WireError;

/// One-byte application tag carried alongside every broadcast payload,
/// telling receivers which message kind the payload bytes encode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventCode {
    /// Authoritative entity state snapshot, sent on the replication cadence
    Snapshot,
    /// One-shot sequenced impulse event
    Impulse,
}

impl EventCode {
    pub fn to_byte(self) -> u8 {
        match self {
            EventCode::Snapshot => 1,
            EventCode::Impulse => 2,
        }
    }

    pub fn from_byte(code: u8) -> Result<Self, WireError> {
        match code {
            1 => Ok(EventCode::Snapshot),
            2 => Ok(EventCode::Impulse),
            _ => Err(WireError::UnknownEventCode { code }),
        }
    }
}
