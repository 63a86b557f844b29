use bpk_types::{GenericMessage, GenericValue, MessageStream};
use serde_json::{Map, Value};

use crate::config::BinaryEncoding;
use crate::error::RenderError;
use crate::render_json::keys;

/// Parse JSON produced by the JSON renderer back into messages.
///
/// Accepts the compact and pretty forms alike. `$binary`, `$map`, and
/// `$float` objects are turned back into their values; `$error`
/// markers from `render_decoded` and `"name"` fields are skipped.
/// `$binary` payloads are read as hex; use
/// [`parse_messages_with`] for text rendered with base64.
///
/// # Errors
///
/// - [`RenderError::Json`] if `text` is not JSON.
/// - [`RenderError::InvalidDocument`] if the JSON does not have the
///   rendered shape.
/// - [`RenderError::InvalidBinary`] if a `$binary` payload is not valid
///   hex.
///
/// # Example
///
/// ```rust
/// use bpk_render::parse_messages;
/// use bpk_types::GenericValue;
///
/// let messages = parse_messages(r#"[{"kind":1,"fields":["m1",42]}]"#).unwrap();
/// assert_eq!(messages[0].kind, 1);
/// assert_eq!(messages[0].fields[1], GenericValue::Integer(42));
/// ```
pub fn parse_messages(text: &str) -> Result<MessageStream, RenderError> {
    parse_messages_with(text, BinaryEncoding::default())
}

/// [`parse_messages`] with an explicit `$binary` encoding.
///
/// # Errors
///
/// See [`parse_messages`].
pub fn parse_messages_with(
    text: &str,
    binary: BinaryEncoding,
) -> Result<MessageStream, RenderError> {
    let document: Value = serde_json::from_str(text)?;
    let Value::Array(items) = document else {
        return Err(invalid("$", "expected an array of messages"));
    };

    let mut messages = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let path = format!("$[{i}]");
        let Value::Object(object) = item else {
            return Err(invalid(&path, "expected a message object"));
        };
        if object.contains_key(keys::ERROR) {
            continue;
        }
        messages.push(parse_message(object, &path, binary)?);
    }
    Ok(messages)
}

fn parse_message(
    object: &Map<String, Value>,
    path: &str,
    binary: BinaryEncoding,
) -> Result<GenericMessage, RenderError> {
    let kind = object
        .get("kind")
        .and_then(Value::as_i64)
        .ok_or_else(|| invalid(path, "missing integer \"kind\""))?;

    let Some(Value::Array(fields)) = object.get("fields") else {
        return Err(invalid(path, "missing \"fields\" array"));
    };

    let fields = fields
        .iter()
        .enumerate()
        .map(|(i, field)| json_to_value(field, &format!("{path}.fields[{i}]"), binary))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(GenericMessage::new(kind, fields))
}

/// Convert one rendered JSON value back into a [`GenericValue`].
///
/// # Errors
///
/// See [`parse_messages`].
pub fn json_to_value(
    value: &Value,
    path: &str,
    binary: BinaryEncoding,
) -> Result<GenericValue, RenderError> {
    let converted = match value {
        Value::Null => GenericValue::Null,
        Value::Bool(b) => GenericValue::Boolean(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                GenericValue::Integer(i)
            } else if n.is_u64() {
                return Err(invalid(path, "integer above i64::MAX"));
            } else {
                let f = n
                    .as_f64()
                    .ok_or_else(|| invalid(path, "number is not representable"))?;
                GenericValue::Float(f)
            }
        }
        Value::String(s) => GenericValue::String(s.clone()),
        Value::Array(items) => GenericValue::Array(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| json_to_value(item, &format!("{path}[{i}]"), binary))
                .collect::<Result<_, _>>()?,
        ),
        Value::Object(object) => parse_object(object, path, binary)?,
    };
    Ok(converted)
}

fn parse_object(
    object: &Map<String, Value>,
    path: &str,
    binary: BinaryEncoding,
) -> Result<GenericValue, RenderError> {
    if object.len() == 1 {
        if let Some((key, inner)) = object.iter().next() {
            if key.starts_with('$') {
                return parse_tagged(key, inner, path, binary);
            }
        }
    }

    let mut pairs = Vec::with_capacity(object.len());
    for (key, inner) in object {
        let value = json_to_value(inner, &format!("{path}.{key}"), binary)?;
        pairs.push((GenericValue::String(key.clone()), value));
    }
    Ok(GenericValue::Map(pairs))
}

fn parse_tagged(
    key: &str,
    inner: &Value,
    path: &str,
    binary: BinaryEncoding,
) -> Result<GenericValue, RenderError> {
    match key {
        keys::BINARY => {
            let text = inner
                .as_str()
                .ok_or_else(|| invalid(path, "$binary payload must be a string"))?;
            binary
                .decode(text)
                .map(GenericValue::Binary)
                .ok_or_else(|| RenderError::InvalidBinary {
                    path: path.to_owned(),
                })
        }
        keys::FLOAT => match inner.as_str() {
            Some("NaN") => Ok(GenericValue::Float(f64::NAN)),
            Some("Infinity") => Ok(GenericValue::Float(f64::INFINITY)),
            Some("-Infinity") => Ok(GenericValue::Float(f64::NEG_INFINITY)),
            _ => Err(invalid(path, "$float must be NaN, Infinity, or -Infinity")),
        },
        keys::MAP => {
            let Value::Array(entries) = inner else {
                return Err(invalid(path, "$map must be an array of pairs"));
            };
            let mut pairs = Vec::with_capacity(entries.len());
            for (i, entry) in entries.iter().enumerate() {
                let entry_path = format!("{path}.$map[{i}]");
                let Some([k, v]) = entry.as_array().map(Vec::as_slice) else {
                    return Err(invalid(&entry_path, "$map entry must be a [key, value] pair"));
                };
                pairs.push((
                    json_to_value(k, &format!("{entry_path}[0]"), binary)?,
                    json_to_value(v, &format!("{entry_path}[1]"), binary)?,
                ));
            }
            Ok(GenericValue::Map(pairs))
        }
        _ => Err(invalid(path, "unknown $-tagged object")),
    }
}

fn invalid(path: &str, reason: &'static str) -> RenderError {
    RenderError::InvalidDocument {
        path: path.to_owned(),
        reason,
    }
}
