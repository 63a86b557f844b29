use bpk_wire::WireError;

/// Errors that can occur while encoding a BlazorPack payload.
///
/// ```text
///   EncodeError
///   ├── EmptyPayload         ← no messages were added before .encode()
///   ├── ValueTooLarge        ← string/binary/container longer than u32::MAX
///   └── Wire(WireError)      ← frame length overflow or writer failure
/// ```
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("no messages have been added to the encoder")]
    EmptyPayload,

    #[error("{kind} of length {len} cannot be encoded (limit {limit})")]
    ValueTooLarge {
        kind: &'static str,
        len: usize,
        limit: usize,
    },

    #[error(transparent)]
    Wire(#[from] WireError),
}
