use bpk_wire::varint::MAX_MESSAGE_LENGTH;

/// Default container nesting limit.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Limits applied while decoding untrusted request bodies.
///
/// ```text
/// ┌──────────────────┬──────────────────────────────────────────────┐
/// │ Field            │ Purpose                                      │
/// ├──────────────────┼──────────────────────────────────────────────┤
/// │ max_depth        │ Deepest array/map nesting accepted (64)      │
/// │ max_message_size │ Largest declared frame length (i32::MAX)     │
/// └──────────────────┴──────────────────────────────────────────────┘
/// ```
///
/// Blazor Server itself rejects hub messages above 32 KiB by default;
/// hosts that only want to look at realistic traffic can lower
/// `max_message_size` to match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecoderConfig {
    pub max_depth: usize,
    pub max_message_size: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_message_size: MAX_MESSAGE_LENGTH as usize,
        }
    }
}
