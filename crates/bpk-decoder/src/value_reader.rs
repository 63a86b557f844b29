use bpk_types::GenericValue;
use bpk_wire::Marker;

use crate::config::DEFAULT_MAX_DEPTH;
use crate::error::DecodeError;

/// Cursor-based reader for one MessagePack value at a time.
///
/// The reader walks a bounded slice and never looks outside it: a
/// frame body handed in by the message decoder is the whole world as
/// far as the reader is concerned. `base` is the absolute offset of
/// `buf[0]` in the request body and is only used to label errors.
///
/// Containers are decoded by recursive descent with an explicit depth
/// counter; a container opened at depth `max_depth` fails with
/// [`DecodeError::NestingTooDeep`] instead of recursing further.
///
/// Strings that are not valid UTF-8 are decoded lossily (U+FFFD) and
/// their offsets are collected in
/// [`invalid_strings`](Self::invalid_strings) so the caller can report
/// them without losing the rest of the message.
pub struct ValueReader<'a> {
    buf: &'a [u8],
    pos: usize,
    base: usize,
    max_depth: usize,
    invalid_strings: Vec<usize>,
}

impl<'a> ValueReader<'a> {
    pub fn new(buf: &'a [u8], base: usize, max_depth: usize) -> Self {
        Self {
            buf,
            pos: 0,
            base,
            max_depth,
            invalid_strings: Vec::new(),
        }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Absolute offsets of strings that were decoded lossily.
    pub fn invalid_strings(&self) -> &[usize] {
        &self.invalid_strings
    }

    /// Read exactly one value and advance past it.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::TruncatedInput`] if the slice ends mid-value.
    /// - [`DecodeError::UnsupportedTag`] for ext types and `0xC1`.
    /// - [`DecodeError::IntegerOverflow`] for `uint64` above `i64::MAX`.
    /// - [`DecodeError::NestingTooDeep`] past the depth limit.
    pub fn read_value(&mut self) -> Result<GenericValue, DecodeError> {
        self.read_nested(0)
    }

    fn read_nested(&mut self, depth: usize) -> Result<GenericValue, DecodeError> {
        let start = self.absolute();
        let byte = self.read_u8()?;

        let value = match Marker::from_byte(byte) {
            Marker::Nil => GenericValue::Null,
            Marker::False => GenericValue::Boolean(false),
            Marker::True => GenericValue::Boolean(true),

            Marker::PositiveFixInt(v) => GenericValue::Integer(i64::from(v)),
            Marker::NegativeFixInt(v) => GenericValue::Integer(i64::from(v)),
            Marker::Uint8 => GenericValue::Integer(i64::from(self.read_u8()?)),
            Marker::Uint16 => GenericValue::Integer(i64::from(self.read_u16()?)),
            Marker::Uint32 => GenericValue::Integer(i64::from(self.read_u32()?)),
            Marker::Uint64 => {
                let v = self.read_u64()?;
                let v = i64::try_from(v).map_err(|_| DecodeError::IntegerOverflow { offset: start })?;
                GenericValue::Integer(v)
            }
            Marker::Int8 => GenericValue::Integer(i64::from(self.read_u8()? as i8)),
            Marker::Int16 => GenericValue::Integer(i64::from(self.read_u16()? as i16)),
            Marker::Int32 => GenericValue::Integer(i64::from(self.read_u32()? as i32)),
            Marker::Int64 => GenericValue::Integer(self.read_u64()? as i64),

            Marker::Float32 => GenericValue::Float(f64::from(f32::from_bits(self.read_u32()?))),
            Marker::Float64 => GenericValue::Float(f64::from_bits(self.read_u64()?)),

            Marker::FixStr(len) => self.read_string(usize::from(len), start)?,
            Marker::Str8 => {
                let len = usize::from(self.read_u8()?);
                self.read_string(len, start)?
            }
            Marker::Str16 => {
                let len = usize::from(self.read_u16()?);
                self.read_string(len, start)?
            }
            Marker::Str32 => {
                let len = self.read_u32_len()?;
                self.read_string(len, start)?
            }

            Marker::Bin8 => {
                let len = usize::from(self.read_u8()?);
                GenericValue::Binary(self.take(len)?.to_vec())
            }
            Marker::Bin16 => {
                let len = usize::from(self.read_u16()?);
                GenericValue::Binary(self.take(len)?.to_vec())
            }
            Marker::Bin32 => {
                let len = self.read_u32_len()?;
                GenericValue::Binary(self.take(len)?.to_vec())
            }

            Marker::FixArray(count) => self.read_array(usize::from(count), depth, start)?,
            Marker::Array16 => {
                let count = usize::from(self.read_u16()?);
                self.read_array(count, depth, start)?
            }
            Marker::Array32 => {
                let count = self.read_u32_len()?;
                self.read_array(count, depth, start)?
            }

            Marker::FixMap(count) => self.read_map(usize::from(count), depth, start)?,
            Marker::Map16 => {
                let count = usize::from(self.read_u16()?);
                self.read_map(count, depth, start)?
            }
            Marker::Map32 => {
                let count = self.read_u32_len()?;
                self.read_map(count, depth, start)?
            }

            Marker::Unsupported(tag) => {
                return Err(DecodeError::UnsupportedTag { offset: start, tag });
            }
        };

        Ok(value)
    }

    fn read_string(&mut self, len: usize, start: usize) -> Result<GenericValue, DecodeError> {
        let bytes = self.take(len)?;
        let text = match std::str::from_utf8(bytes) {
            Ok(s) => s.to_owned(),
            Err(_) => {
                self.invalid_strings.push(start);
                String::from_utf8_lossy(bytes).into_owned()
            }
        };
        Ok(GenericValue::String(text))
    }

    fn read_array(
        &mut self,
        count: usize,
        depth: usize,
        start: usize,
    ) -> Result<GenericValue, DecodeError> {
        self.enter(depth, start)?;
        // Every element takes at least one byte.
        self.ensure(count)?;

        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            items.push(self.read_nested(depth + 1)?);
        }
        Ok(GenericValue::Array(items))
    }

    fn read_map(
        &mut self,
        count: usize,
        depth: usize,
        start: usize,
    ) -> Result<GenericValue, DecodeError> {
        self.enter(depth, start)?;
        self.ensure(count.saturating_mul(2))?;

        let mut pairs = Vec::with_capacity(count);
        for _ in 0..count {
            let key = self.read_nested(depth + 1)?;
            let value = self.read_nested(depth + 1)?;
            pairs.push((key, value));
        }
        Ok(GenericValue::Map(pairs))
    }

    fn enter(&self, depth: usize, start: usize) -> Result<(), DecodeError> {
        if depth >= self.max_depth {
            return Err(DecodeError::NestingTooDeep {
                offset: start,
                limit: self.max_depth,
            });
        }
        Ok(())
    }

    // ── Primitive reads ──────────────────────────────────────────────────
    //
    // All multi-byte quantities are big-endian per MessagePack.

    fn absolute(&self) -> usize {
        self.base + self.pos
    }

    fn ensure(&self, n: usize) -> Result<(), DecodeError> {
        if n > self.remaining() {
            return Err(DecodeError::TruncatedInput {
                offset: self.base + self.buf.len(),
            });
        }
        Ok(())
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        self.ensure(n)?;
        let bytes = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take_array::<1>()?[0])
    }

    fn read_u16(&mut self) -> Result<u16, DecodeError> {
        Ok(u16::from_be_bytes(self.take_array()?))
    }

    fn read_u32(&mut self) -> Result<u32, DecodeError> {
        Ok(u32::from_be_bytes(self.take_array()?))
    }

    fn read_u64(&mut self) -> Result<u64, DecodeError> {
        Ok(u64::from_be_bytes(self.take_array()?))
    }

    fn read_u32_len(&mut self) -> Result<usize, DecodeError> {
        let offset = self.absolute();
        let len = self.read_u32()?;
        usize::try_from(len).map_err(|_| DecodeError::IntegerOverflow { offset })
    }
}

/// Decode a single value starting at `offset` in `buf`.
///
/// Convenience wrapper over [`ValueReader`] with the default depth
/// limit. Lossy string substitutions are not reported.
///
/// # Returns
///
/// `(value, bytes_consumed)`.
///
/// # Errors
///
/// See [`ValueReader::read_value`]. An `offset` past the end of `buf`
/// is [`DecodeError::TruncatedInput`].
pub fn decode_value(buf: &[u8], offset: usize) -> Result<(GenericValue, usize), DecodeError> {
    let slice = buf
        .get(offset..)
        .ok_or(DecodeError::TruncatedInput { offset: buf.len() })?;
    let mut reader = ValueReader::new(slice, offset, DEFAULT_MAX_DEPTH);
    let value = reader.read_value()?;
    Ok((value, reader.position()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bpk_wire::marker::tag;

    fn decode(bytes: &[u8]) -> Result<GenericValue, DecodeError> {
        decode_value(bytes, 0).map(|(value, _)| value)
    }

    #[test]
    fn fixarray_int_and_string() {
        let (value, consumed) = decode_value(&[0x92, 0x01, 0xA2, b'o', b'k'], 0).unwrap();
        assert_eq!(
            value,
            GenericValue::Array(vec![GenericValue::Integer(1), GenericValue::from("ok")])
        );
        assert_eq!(consumed, 5);
    }

    #[test]
    fn scalars() {
        assert_eq!(decode(&[tag::NIL]).unwrap(), GenericValue::Null);
        assert_eq!(decode(&[tag::TRUE]).unwrap(), GenericValue::Boolean(true));
        assert_eq!(decode(&[tag::FALSE]).unwrap(), GenericValue::Boolean(false));
        assert_eq!(decode(&[0xFF]).unwrap(), GenericValue::Integer(-1));
        assert_eq!(decode(&[0x7F]).unwrap(), GenericValue::Integer(127));
    }

    #[test]
    fn integer_widths_are_big_endian() {
        assert_eq!(decode(&[tag::UINT8, 0xFF]).unwrap(), GenericValue::Integer(255));
        assert_eq!(decode(&[tag::UINT16, 0x01, 0x00]).unwrap(), GenericValue::Integer(256));
        assert_eq!(
            decode(&[tag::UINT32, 0xFF, 0xFF, 0xFF, 0xFF]).unwrap(),
            GenericValue::Integer(i64::from(u32::MAX))
        );
        assert_eq!(decode(&[tag::INT8, 0x80]).unwrap(), GenericValue::Integer(-128));
        assert_eq!(decode(&[tag::INT16, 0xFF, 0x38]).unwrap(), GenericValue::Integer(-200));
        assert_eq!(
            decode(&[tag::INT32, 0x80, 0, 0, 0]).unwrap(),
            GenericValue::Integer(i64::from(i32::MIN))
        );
        let mut int64 = vec![tag::INT64];
        int64.extend_from_slice(&i64::MIN.to_be_bytes());
        assert_eq!(decode(&int64).unwrap(), GenericValue::Integer(i64::MIN));
    }

    #[test]
    fn uint64_above_i64_max_overflows() {
        let mut bytes = vec![tag::UINT64];
        bytes.extend_from_slice(&u64::MAX.to_be_bytes());
        assert!(matches!(
            decode(&bytes),
            Err(DecodeError::IntegerOverflow { offset: 0 })
        ));

        let mut fits = vec![tag::UINT64];
        fits.extend_from_slice(&(i64::MAX as u64).to_be_bytes());
        assert_eq!(decode(&fits).unwrap(), GenericValue::Integer(i64::MAX));
    }

    #[test]
    fn floats() {
        let mut f32_bytes = vec![tag::FLOAT32];
        f32_bytes.extend_from_slice(&1.5_f32.to_be_bytes());
        assert_eq!(decode(&f32_bytes).unwrap(), GenericValue::Float(1.5));

        let mut f64_bytes = vec![tag::FLOAT64];
        f64_bytes.extend_from_slice(&0.1_f64.to_be_bytes());
        assert_eq!(decode(&f64_bytes).unwrap(), GenericValue::Float(0.1));
    }

    #[test]
    fn sized_strings_and_binaries() {
        assert_eq!(
            decode(&[tag::STR8, 0x03, b'a', b'b', b'c']).unwrap(),
            GenericValue::from("abc")
        );
        assert_eq!(
            decode(&[tag::STR16, 0x00, 0x01, b'z']).unwrap(),
            GenericValue::from("z")
        );
        assert_eq!(decode(&[0xA0]).unwrap(), GenericValue::from(""));
        assert_eq!(
            decode(&[tag::BIN8, 0x02, 0x00, 0xFF]).unwrap(),
            GenericValue::Binary(vec![0x00, 0xFF])
        );
        assert_eq!(
            decode(&[tag::BIN32, 0, 0, 0, 0]).unwrap(),
            GenericValue::Binary(vec![])
        );
    }

    #[test]
    fn map_preserves_order_and_duplicates() {
        // {"b": 1, "a": 2, "b": 3}
        let bytes = [0x83, 0xA1, b'b', 0x01, 0xA1, b'a', 0x02, 0xA1, b'b', 0x03];
        assert_eq!(
            decode(&bytes).unwrap(),
            GenericValue::Map(vec![
                (GenericValue::from("b"), GenericValue::Integer(1)),
                (GenericValue::from("a"), GenericValue::Integer(2)),
                (GenericValue::from("b"), GenericValue::Integer(3)),
            ])
        );
    }

    #[test]
    fn non_string_map_keys() {
        let bytes = [0x81, 0x01, tag::TRUE];
        assert_eq!(
            decode(&bytes).unwrap(),
            GenericValue::Map(vec![(GenericValue::Integer(1), GenericValue::Boolean(true))])
        );
    }

    #[test]
    fn array16_and_map16() {
        let bytes = [tag::ARRAY16, 0x00, 0x02, tag::NIL, tag::NIL];
        assert_eq!(
            decode(&bytes).unwrap(),
            GenericValue::Array(vec![GenericValue::Null, GenericValue::Null])
        );
        let bytes = [tag::MAP16, 0x00, 0x00];
        assert_eq!(decode(&bytes).unwrap(), GenericValue::Map(vec![]));
    }

    #[test]
    fn unsupported_tag_reports_offset_and_byte() {
        // fixext1 inside an array at offset 1
        let bytes = [0x91, 0xD4, 0x01, 0x00];
        assert!(matches!(
            decode(&bytes),
            Err(DecodeError::UnsupportedTag { offset: 1, tag: 0xD4 })
        ));
    }

    #[test]
    fn truncated_string_body() {
        assert!(matches!(
            decode(&[0xA5, b'h', b'i']),
            Err(DecodeError::TruncatedInput { offset: 3 })
        ));
    }

    #[test]
    fn huge_declared_count_fails_before_allocating() {
        let bytes = [tag::ARRAY32, 0xFF, 0xFF, 0xFF, 0xFF, tag::NIL];
        assert!(matches!(decode(&bytes), Err(DecodeError::TruncatedInput { .. })));
        let bytes = [tag::MAP32, 0x7F, 0xFF, 0xFF, 0xFF];
        assert!(matches!(decode(&bytes), Err(DecodeError::TruncatedInput { .. })));
    }

    #[test]
    fn empty_input() {
        assert!(matches!(decode(&[]), Err(DecodeError::TruncatedInput { offset: 0 })));
        assert!(matches!(
            decode_value(&[0x01], 5),
            Err(DecodeError::TruncatedInput { offset: 1 })
        ));
    }

    #[test]
    fn offsets_are_absolute() {
        let bytes = [0xAA, 0xBB, 0x91, 0xC1];
        assert!(matches!(
            decode_value(&bytes, 2),
            Err(DecodeError::UnsupportedTag { offset: 3, tag: 0xC1 })
        ));
    }

    #[test]
    fn nesting_limit() {
        let deep = |levels: usize| {
            let mut bytes = vec![0x91; levels];
            bytes.push(tag::NIL);
            bytes
        };

        let ok = deep(DEFAULT_MAX_DEPTH);
        assert_eq!(decode(&ok).unwrap().depth(), DEFAULT_MAX_DEPTH);

        let too_deep = deep(DEFAULT_MAX_DEPTH + 1);
        assert!(matches!(
            decode(&too_deep),
            Err(DecodeError::NestingTooDeep { offset: 64, limit: 64 })
        ));
    }

    #[test]
    fn very_deep_input_does_not_overflow_the_stack() {
        let mut bytes = vec![0x91; 1_000_000];
        bytes.push(tag::NIL);
        assert!(matches!(decode(&bytes), Err(DecodeError::NestingTooDeep { .. })));
    }

    #[test]
    fn invalid_utf8_is_replaced_and_recorded() {
        let bytes = [0x92, 0xA2, 0xFF, 0xFE, 0xA1, b'x'];
        let mut reader = ValueReader::new(&bytes, 0, DEFAULT_MAX_DEPTH);
        let value = reader.read_value().unwrap();
        assert_eq!(
            value,
            GenericValue::Array(vec![
                GenericValue::from("\u{FFFD}\u{FFFD}"),
                GenericValue::from("x"),
            ])
        );
        assert_eq!(reader.invalid_strings(), &[1]);
    }
}
