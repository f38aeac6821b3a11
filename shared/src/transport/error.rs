use thiserror::Error;

use crate::transport::event_code::EventCode;

/// Errors that can occur while handing payloads to the transport layer
#[derive(Debug, Error)]
pub enum TransportError {
    /// The transport has no live session to broadcast into
    #[error("Cannot broadcast {code:?} payload: not connected to a session")]
    NotConnected { code: EventCode },

    /// The transport accepted the call but reported a send failure
    #[error("Broadcast of {code:?} payload ({payload_size} bytes) failed: {reason}")]
    SendFailed {
        code: EventCode,
        payload_size: usize,
        reason: String,
    },
}

/// Errors that can occur while encoding or decoding broadcast payloads
#[derive(Debug, Error)]
pub enum WireError {
    /// Payload bytes did not decode as the message kind its event code implies
    #[error("Payload codec error: {0}")]
    Codec(#[from] bincode::Error),

    /// Received an event code outside the application protocol
    #[error("Unknown event code {code} received (valid codes: 1-2). This may indicate a malformed payload or a protocol version mismatch")]
    UnknownEventCode { code: u8 },
}
