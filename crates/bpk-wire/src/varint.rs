use crate::error::WireError;

/// Maximum number of bytes a u64 varint can occupy.
/// ceil(64 / 7) = 10 bytes.
pub const MAX_VARINT_BYTES: usize = 10;

/// Maximum number of bytes a message length prefix can occupy.
///
/// SignalR caps binary message lengths at `i32::MAX`, which fits in
/// five 7-bit groups.
pub const MAX_LENGTH_PREFIX_BYTES: usize = 5;

/// Largest message length a prefix may declare.
pub const MAX_MESSAGE_LENGTH: u64 = i32::MAX as u64;

/// Encode a `u64` value as an unsigned LEB128 varint into the provided buffer.
///
/// # Returns
///
/// The number of bytes written (1–10).
///
/// # Panics
///
/// Panics if `buf` is shorter than the required encoding length.
/// A 10-byte buffer is always sufficient for any `u64`.
///
/// # Wire format examples
///
/// | Value   | Encoded bytes        | Length |
/// |---------|----------------------|--------|
/// | 0       | `[0x00]`             | 1      |
/// | 127     | `[0x7F]`             | 1      |
/// | 128     | `[0x80, 0x01]`       | 2      |
/// | 300     | `[0xAC, 0x02]`       | 2      |
/// | 16384   | `[0x80, 0x80, 0x01]` | 3      |
pub fn encode_varint(mut value: u64, buf: &mut [u8]) -> usize {
    let mut i = 0;
    loop {
        let mut byte = (value & 0x7F) as u8;
        value >>= 7;

        if value > 0 {
            byte |= 0x80;
        }

        buf[i] = byte;
        i += 1;

        if value == 0 {
            break;
        }
    }
    i
}

/// Decode an unsigned LEB128 varint from the provided byte slice.
///
/// # Returns
///
/// `(decoded_value, bytes_consumed)` on success.
///
/// # Errors
///
/// - [`WireError::VarintTooLong`] if more than 10 bytes are consumed
///   without finding a terminating byte, or if the tenth byte
///   carries bits above bit 63.
/// - [`WireError::UnexpectedEof`] if the slice ends mid-varint.
pub fn decode_varint(buf: &[u8]) -> Result<(u64, usize), WireError> {
    decode_bounded(buf, MAX_VARINT_BYTES)
}

/// Decode a message length prefix.
///
/// Same encoding as [`decode_varint`], but limited to
/// [`MAX_LENGTH_PREFIX_BYTES`] bytes and to values no larger than
/// [`MAX_MESSAGE_LENGTH`].
///
/// # Errors
///
/// - [`WireError::UnexpectedEof`] if the slice ends mid-prefix.
/// - [`WireError::VarintTooLong`] if the fifth byte still has its
///   continuation bit set.
/// - [`WireError::LengthOverflow`] if the value is above `i32::MAX`.
pub fn decode_length_prefix(buf: &[u8]) -> Result<(usize, usize), WireError> {
    let (value, consumed) = decode_bounded(buf, MAX_LENGTH_PREFIX_BYTES)?;
    if value > MAX_MESSAGE_LENGTH {
        return Err(WireError::LengthOverflow { value });
    }
    let len = usize::try_from(value).map_err(|_| WireError::LengthOverflow { value })?;
    Ok((len, consumed))
}

fn decode_bounded(buf: &[u8], limit: usize) -> Result<(u64, usize), WireError> {
    let mut result: u64 = 0;
    let mut shift: u32 = 0;

    for (i, &byte) in buf.iter().enumerate() {
        if i >= limit {
            return Err(WireError::VarintTooLong { limit });
        }

        // Extract the 7 data bits and shift them into position
        let data = u64::from(byte & 0x7F);
        // The tenth byte may only carry bit 63.
        if shift == 63 && data > 1 {
            return Err(WireError::VarintTooLong { limit });
        }
        result |= data << shift;
        shift += 7;

        if byte & 0x80 == 0 {
            return Ok((result, i + 1));
        }
    }

    Err(WireError::UnexpectedEof { offset: buf.len() })
}
