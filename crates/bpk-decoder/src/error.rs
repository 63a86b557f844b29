use bpk_wire::WireError;

/// Errors that can occur while decoding a BlazorPack request body.
///
/// Every variant carries the absolute byte offset in the request body
/// where the problem was detected, so an analyst can line the error up
/// with a hex dump.
///
/// ```text
///   DecodeError
///   ├── TruncatedInput      ← buffer ends mid-field
///   ├── IntegerOverflow     ← varint too long, length prefix > i32::MAX,
///   │                         or uint64 above i64::MAX
///   ├── UnsupportedTag      ← ext types, 0xC1
///   ├── InvalidEncoding     ← string bytes are not UTF-8
///   ├── MalformedMessage    ← top-level value not [int, ...]
///   ├── NestingTooDeep      ← container depth limit reached
///   ├── LengthMismatch      ← declared frame length disagrees with content
///   ├── MessageTooLarge     ← declared frame length above configured limit
///   └── Wire(WireError)     ← any other wire-layer failure
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Input ended before a complete field could be read.
    #[error("truncated input: data ends at offset {offset}")]
    TruncatedInput { offset: usize },

    /// An integer or length prefix does not fit its bound.
    #[error("integer overflow at offset {offset}")]
    IntegerOverflow { offset: usize },

    /// The type byte is not one BlazorPack emits.
    #[error("unsupported type tag {tag:#04X} at offset {offset}")]
    UnsupportedTag { offset: usize, tag: u8 },

    /// String bytes were not valid UTF-8.
    ///
    /// The decoder substitutes U+FFFD and keeps going, so this normally
    /// appears as a recovered [`MessageError`](crate::MessageError).
    #[error("invalid UTF-8 in string at offset {offset}")]
    InvalidEncoding { offset: usize },

    /// The top-level value of a frame is not a non-empty array led by an
    /// integer kind.
    #[error("malformed message at offset {offset}: {reason}")]
    MalformedMessage { offset: usize, reason: &'static str },

    /// Containers nested deeper than the configured limit.
    #[error("nesting deeper than {limit} levels at offset {offset}")]
    NestingTooDeep { offset: usize, limit: usize },

    /// A frame's declared length does not match the bytes its content
    /// actually needs, or the frame runs past the end of the buffer.
    #[error("length mismatch for frame at offset {offset}: declared {declared} bytes, found {actual}")]
    LengthMismatch {
        offset: usize,
        declared: usize,
        actual: usize,
    },

    /// A frame declares more bytes than the configured maximum.
    #[error("message at offset {offset} declares {size} bytes, limit is {limit}")]
    MessageTooLarge {
        offset: usize,
        size: usize,
        limit: usize,
    },

    #[error(transparent)]
    Wire(WireError),
}

impl DecodeError {
    /// Map a wire-layer error onto the decode error kinds.
    ///
    /// `base` is the absolute offset of the slice the wire function was
    /// given.
    pub fn from_wire(err: WireError, base: usize) -> Self {
        match err {
            WireError::UnexpectedEof { offset } => Self::TruncatedInput {
                offset: base + offset,
            },
            WireError::VarintTooLong { .. } | WireError::LengthOverflow { .. } => {
                Self::IntegerOverflow { offset: base }
            }
            other @ WireError::Io(_) => Self::Wire(other),
        }
    }

    /// Absolute offset of the failure, when the variant carries one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::TruncatedInput { offset }
            | Self::IntegerOverflow { offset }
            | Self::UnsupportedTag { offset, .. }
            | Self::InvalidEncoding { offset }
            | Self::MalformedMessage { offset, .. }
            | Self::NestingTooDeep { offset, .. }
            | Self::LengthMismatch { offset, .. }
            | Self::MessageTooLarge { offset, .. } => Some(*offset),
            Self::Wire(_) => None,
        }
    }

    /// Stable variant name, used in rendered error markers.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TruncatedInput { .. } => "TruncatedInput",
            Self::IntegerOverflow { .. } => "IntegerOverflow",
            Self::UnsupportedTag { .. } => "UnsupportedTag",
            Self::InvalidEncoding { .. } => "InvalidEncoding",
            Self::MalformedMessage { .. } => "MalformedMessage",
            Self::NestingTooDeep { .. } => "NestingTooDeep",
            Self::LengthMismatch { .. } => "LengthMismatch",
            Self::MessageTooLarge { .. } => "MessageTooLarge",
            Self::Wire(_) => "Wire",
        }
    }
}

impl From<WireError> for DecodeError {
    fn from(err: WireError) -> Self {
        Self::from_wire(err, 0)
    }
}
