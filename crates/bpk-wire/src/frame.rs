use crate::error::WireError;
use crate::varint::{MAX_LENGTH_PREFIX_BYTES, MAX_MESSAGE_LENGTH, decode_length_prefix, encode_varint};

/// Length prefix of one BlazorPack message.
///
/// BlazorPack concatenates messages back to back; each one is framed as:
///
/// ```text
/// ┌──────────────────────────────────────────────────┐
/// │ body_len  (varint, 1-5 bytes, <= i32::MAX)       │
/// │ body      [body_len bytes]: one MessagePack      │
/// │           array: [kind, field, field, ...]       │
/// └──────────────────────────────────────────────────┘
/// ```
///
/// The header is read separately from the body so callers can report
/// the declared length even when the body is cut short.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameHeader {
    /// Declared body length in bytes.
    pub body_len: usize,

    /// Bytes taken by the length prefix itself.
    pub prefix_len: usize,
}

impl FrameHeader {
    /// Read a frame header from the start of `buf`.
    ///
    /// # Errors
    ///
    /// - [`WireError::UnexpectedEof`] if the prefix is cut short.
    /// - [`WireError::VarintTooLong`] / [`WireError::LengthOverflow`] if
    ///   the prefix is longer than five bytes or above `i32::MAX`.
    pub fn read_from(buf: &[u8]) -> Result<Self, WireError> {
        let (body_len, prefix_len) = decode_length_prefix(buf)?;
        Ok(Self { body_len, prefix_len })
    }

    /// Total frame size: prefix plus body.
    pub fn frame_len(self) -> usize {
        self.prefix_len + self.body_len
    }
}

/// Write one length-prefixed message body.
///
/// # Returns
///
/// Total number of bytes written.
///
/// # Errors
///
/// - [`WireError::LengthOverflow`] if `body` is longer than `i32::MAX`.
/// - [`WireError::Io`] if the writer fails.
pub fn write_frame(body: &[u8], w: &mut impl std::io::Write) -> Result<usize, WireError> {
    let len = body.len() as u64;
    if len > MAX_MESSAGE_LENGTH {
        return Err(WireError::LengthOverflow { value: len });
    }

    let mut prefix = [0u8; MAX_LENGTH_PREFIX_BYTES];
    let n = encode_varint(len, &mut prefix);
    w.write_all(&prefix[..n])?;
    w.write_all(body)?;

    Ok(n + body.len())
}
