use bpk_types::GenericValue;
use bpk_wire::marker::tag;

use crate::error::EncodeError;

/// Append one value to `buf` using the smallest MessagePack form.
///
/// Integers pick the narrowest signed or unsigned width, strings and
/// containers use the fix* headers when their length allows it, and
/// floats are always written as `float64` so no precision is lost.
///
/// # Errors
///
/// Returns [`EncodeError::ValueTooLarge`] for strings, binaries, or
/// containers longer than `u32::MAX`.
pub fn write_value(buf: &mut Vec<u8>, value: &GenericValue) -> Result<(), EncodeError> {
    match value {
        GenericValue::Null => buf.push(tag::NIL),
        GenericValue::Boolean(false) => buf.push(tag::FALSE),
        GenericValue::Boolean(true) => buf.push(tag::TRUE),
        GenericValue::Integer(v) => write_integer(buf, *v),
        GenericValue::Float(v) => {
            buf.push(tag::FLOAT64);
            buf.extend_from_slice(&v.to_be_bytes());
        }
        GenericValue::String(s) => {
            write_str_header(buf, s.len())?;
            buf.extend_from_slice(s.as_bytes());
        }
        GenericValue::Binary(bytes) => {
            write_sized_header(buf, "binary", bytes.len(), [tag::BIN8, tag::BIN16, tag::BIN32])?;
            buf.extend_from_slice(bytes);
        }
        GenericValue::Array(items) => {
            write_container_header(buf, "array", items.len(), tag::FIXARRAY, [tag::ARRAY16, tag::ARRAY32])?;
            for item in items {
                write_value(buf, item)?;
            }
        }
        GenericValue::Map(pairs) => {
            write_container_header(buf, "map", pairs.len(), tag::FIXMAP, [tag::MAP16, tag::MAP32])?;
            for (key, val) in pairs {
                write_value(buf, key)?;
                write_value(buf, val)?;
            }
        }
    }
    Ok(())
}

fn write_integer(buf: &mut Vec<u8>, v: i64) {
    if v >= 0 {
        let u = v.unsigned_abs();
        if u <= 0x7F {
            buf.push(u as u8);
        } else if let Ok(b) = u8::try_from(u) {
            buf.push(tag::UINT8);
            buf.push(b);
        } else if let Ok(w) = u16::try_from(u) {
            buf.push(tag::UINT16);
            buf.extend_from_slice(&w.to_be_bytes());
        } else if let Ok(d) = u32::try_from(u) {
            buf.push(tag::UINT32);
            buf.extend_from_slice(&d.to_be_bytes());
        } else {
            buf.push(tag::UINT64);
            buf.extend_from_slice(&u.to_be_bytes());
        }
    } else if v >= -32 {
        buf.push(v as u8);
    } else if let Ok(b) = i8::try_from(v) {
        buf.push(tag::INT8);
        buf.extend_from_slice(&b.to_be_bytes());
    } else if let Ok(w) = i16::try_from(v) {
        buf.push(tag::INT16);
        buf.extend_from_slice(&w.to_be_bytes());
    } else if let Ok(d) = i32::try_from(v) {
        buf.push(tag::INT32);
        buf.extend_from_slice(&d.to_be_bytes());
    } else {
        buf.push(tag::INT64);
        buf.extend_from_slice(&v.to_be_bytes());
    }
}

fn write_str_header(buf: &mut Vec<u8>, len: usize) -> Result<(), EncodeError> {
    if len <= tag::FIXSTR_MAX {
        buf.push(tag::FIXSTR | len as u8);
        Ok(())
    } else {
        write_sized_header(buf, "string", len, [tag::STR8, tag::STR16, tag::STR32])
    }
}

/// Header with an 8, 16, or 32-bit big-endian length.
fn write_sized_header(
    buf: &mut Vec<u8>,
    kind: &'static str,
    len: usize,
    tags: [u8; 3],
) -> Result<(), EncodeError> {
    if let Ok(b) = u8::try_from(len) {
        buf.push(tags[0]);
        buf.push(b);
    } else if let Ok(w) = u16::try_from(len) {
        buf.push(tags[1]);
        buf.extend_from_slice(&w.to_be_bytes());
    } else if let Ok(d) = u32::try_from(len) {
        buf.push(tags[2]);
        buf.extend_from_slice(&d.to_be_bytes());
    } else {
        return Err(too_large(kind, len));
    }
    Ok(())
}

/// Array and map headers have no 8-bit form.
fn write_container_header(
    buf: &mut Vec<u8>,
    kind: &'static str,
    len: usize,
    fix: u8,
    tags: [u8; 2],
) -> Result<(), EncodeError> {
    if len <= tag::FIX_CONTAINER_MAX {
        buf.push(fix | len as u8);
    } else if let Ok(w) = u16::try_from(len) {
        buf.push(tags[0]);
        buf.extend_from_slice(&w.to_be_bytes());
    } else if let Ok(d) = u32::try_from(len) {
        buf.push(tags[1]);
        buf.extend_from_slice(&d.to_be_bytes());
    } else {
        return Err(too_large(kind, len));
    }
    Ok(())
}

fn too_large(kind: &'static str, len: usize) -> EncodeError {
    EncodeError::ValueTooLarge {
        kind,
        len,
        limit: u32::MAX as usize,
    }
}
