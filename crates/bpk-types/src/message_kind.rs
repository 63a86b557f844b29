//! SignalR hub protocol message type tags.
//!
//! These are display hints only. The decoder keeps the kind as an
//! opaque integer, so a tag missing from this table still decodes into
//! a normal message.

pub const INVOCATION: i64 = 1;
pub const STREAM_ITEM: i64 = 2;
pub const COMPLETION: i64 = 3;
pub const STREAM_INVOCATION: i64 = 4;
pub const CANCEL_INVOCATION: i64 = 5;
pub const PING: i64 = 6;
pub const CLOSE: i64 = 7;
pub const ACK: i64 = 8;
pub const SEQUENCE: i64 = 9;

/// Completion result kinds (second element after the headers and id).
pub mod completion {
    pub const ERROR: i64 = 1;
    pub const VOID: i64 = 2;
    pub const NON_VOID: i64 = 3;
}

/// Human-readable name for a known message kind.
pub fn kind_name(kind: i64) -> Option<&'static str> {
    match kind {
        INVOCATION => Some("Invocation"),
        STREAM_ITEM => Some("StreamItem"),
        COMPLETION => Some("Completion"),
        STREAM_INVOCATION => Some("StreamInvocation"),
        CANCEL_INVOCATION => Some("CancelInvocation"),
        PING => Some("Ping"),
        CLOSE => Some("Close"),
        ACK => Some("Ack"),
        SEQUENCE => Some("Sequence"),
        _ => None,
    }
}
