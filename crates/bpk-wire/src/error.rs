/// Errors raised while reading or writing the BlazorPack wire layer.
///
/// Offsets are relative to the slice handed to the failing function.
/// Callers that walk a larger buffer add their own base offset before
/// surfacing the error (see `bpk-decoder`).
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// Varint continuation chain exceeded its byte limit, or carried
    /// more bits than fit in a `u64`.
    #[error("varint too long: exceeded {limit}-byte limit")]
    VarintTooLong { limit: usize },

    /// Input ended before a complete varint or fixed-width field could be read.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEof { offset: usize },

    /// A length prefix decoded to a value larger than a message may declare.
    #[error("length prefix {value} exceeds the maximum message length")]
    LengthOverflow { value: u64 },

    /// I/O error during write.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
