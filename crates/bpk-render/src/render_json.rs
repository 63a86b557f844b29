use bpk_decoder::{DecodeError, DecodedStream, MessageError};
use bpk_types::{GenericMessage, GenericValue};
use serde_json::{Map, Number, Value};

use crate::config::{BinaryEncoding, OutputMode, RenderConfig};
use crate::error::RenderError;

/// Keys of the single-entry objects used for values JSON cannot hold.
pub mod keys {
    /// `{"$binary": "<hex or base64>"}`
    pub const BINARY: &str = "$binary";
    /// `{"$map": [[key, value], ...]}` for maps that are not plain objects.
    pub const MAP: &str = "$map";
    /// `{"$float": "NaN" | "Infinity" | "-Infinity"}`
    pub const FLOAT: &str = "$float";
    /// Decode error marker appended by `render_decoded`.
    pub const ERROR: &str = "$error";
}

/// JSON renderer: the stream as an array of message objects.
///
/// ```text
/// [
///   {"kind":1,"fields":[{},null,"OnRenderCompleted",[7,null]]},
///   {"kind":6,"fields":[]},
///   {"$error":{"kind":"LengthMismatch","offset":12,"terminal":true,...}}
/// ]
/// ```
///
/// Value mapping:
///
/// ```text
/// ┌──────────────┬────────────────────────────────────────────────────┐
/// │ GenericValue │ JSON                                               │
/// ├──────────────┼────────────────────────────────────────────────────┤
/// │ Null/Boolean │ null / true / false                                │
/// │ Integer      │ number                                             │
/// │ Float        │ number, or {"$float":"NaN"} when not finite        │
/// │ String       │ string                                             │
/// │ Binary       │ {"$binary":"00ff"}                                 │
/// │ Array        │ array                                              │
/// │ Map          │ object, or {"$map":[[k,v],...]}                    │
/// └──────────────┴────────────────────────────────────────────────────┘
/// ```
///
/// A map becomes a plain object only when every key is a string, no
/// key repeats, and it is not a lone `$`-prefixed key (which would be
/// mistaken for one of the tagged forms). Everything else goes through
/// `$map`, so no map loses keys or order.
pub struct JsonRenderer;

impl JsonRenderer {
    /// # Errors
    ///
    /// Returns [`RenderError::Json`] if serialization fails.
    pub fn render_all(
        messages: &[GenericMessage],
        config: &RenderConfig,
    ) -> Result<String, RenderError> {
        let items = messages
            .iter()
            .map(|message| message_to_json(message, config))
            .collect();
        Self::finish(items, config)
    }

    /// Render messages followed by one `$error` marker per error.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Json`] if serialization fails.
    pub fn render_decoded(
        decoded: &DecodedStream,
        config: &RenderConfig,
    ) -> Result<String, RenderError> {
        let mut items: Vec<Value> = decoded
            .messages
            .iter()
            .map(|message| message_to_json(message, config))
            .collect();
        items.extend(decoded.errors.iter().map(message_error_to_json));
        if let Some(terminal) = &decoded.terminal {
            items.push(terminal_to_json(terminal));
        }
        Self::finish(items, config)
    }

    fn finish(items: Vec<Value>, config: &RenderConfig) -> Result<String, RenderError> {
        let document = Value::Array(items);
        let text = if config.mode == OutputMode::JsonPretty {
            serde_json::to_string_pretty(&document)?
        } else {
            serde_json::to_string(&document)?
        };
        Ok(text)
    }
}

/// `{"kind": N, ["name": "...",] "fields": [...]}`
pub fn message_to_json(message: &GenericMessage, config: &RenderConfig) -> Value {
    let mut object = Map::new();
    object.insert("kind".to_owned(), Value::from(message.kind));
    if config.include_kind_names {
        if let Some(name) = message.kind_name() {
            object.insert("name".to_owned(), Value::from(name));
        }
    }
    object.insert(
        "fields".to_owned(),
        Value::Array(
            message
                .fields
                .iter()
                .map(|field| value_to_json(field, config.binary))
                .collect(),
        ),
    );
    Value::Object(object)
}

pub fn value_to_json(value: &GenericValue, binary: BinaryEncoding) -> Value {
    match value {
        GenericValue::Null => Value::Null,
        GenericValue::Boolean(b) => Value::Bool(*b),
        GenericValue::Integer(i) => Value::from(*i),
        GenericValue::Float(f) => match Number::from_f64(*f) {
            Some(number) => Value::Number(number),
            None => tagged(keys::FLOAT, Value::from(non_finite_name(*f))),
        },
        GenericValue::String(s) => Value::String(s.clone()),
        GenericValue::Binary(bytes) => tagged(keys::BINARY, Value::String(binary.encode(bytes))),
        GenericValue::Array(items) => {
            Value::Array(items.iter().map(|item| value_to_json(item, binary)).collect())
        }
        GenericValue::Map(pairs) => match plain_object(pairs, binary) {
            Some(object) => Value::Object(object),
            None => tagged(
                keys::MAP,
                Value::Array(
                    pairs
                        .iter()
                        .map(|(k, v)| {
                            Value::Array(vec![value_to_json(k, binary), value_to_json(v, binary)])
                        })
                        .collect(),
                ),
            ),
        },
    }
}

fn plain_object(
    pairs: &[(GenericValue, GenericValue)],
    binary: BinaryEncoding,
) -> Option<Map<String, Value>> {
    if let [(GenericValue::String(key), _)] = pairs {
        if key.starts_with('$') {
            return None;
        }
    }

    let mut object = Map::with_capacity(pairs.len());
    for (key, value) in pairs {
        let GenericValue::String(key) = key else {
            return None;
        };
        if object.contains_key(key) {
            return None;
        }
        object.insert(key.clone(), value_to_json(value, binary));
    }
    Some(object)
}

fn non_finite_name(f: f64) -> &'static str {
    if f.is_nan() {
        "NaN"
    } else if f.is_sign_positive() {
        "Infinity"
    } else {
        "-Infinity"
    }
}

fn tagged(key: &str, value: Value) -> Value {
    let mut object = Map::with_capacity(1);
    object.insert(key.to_owned(), value);
    Value::Object(object)
}

fn message_error_to_json(err: &MessageError) -> Value {
    let mut detail = Map::new();
    detail.insert("kind".to_owned(), Value::from(err.error.kind()));
    detail.insert("index".to_owned(), Value::from(err.index));
    detail.insert(
        "offset".to_owned(),
        Value::from(err.error.offset().unwrap_or(err.offset)),
    );
    detail.insert("recovered".to_owned(), Value::Bool(err.recovered));
    detail.insert("message".to_owned(), Value::from(err.error.to_string()));
    tagged(keys::ERROR, Value::Object(detail))
}

fn terminal_to_json(err: &DecodeError) -> Value {
    let mut detail = Map::new();
    detail.insert("kind".to_owned(), Value::from(err.kind()));
    detail.insert("offset".to_owned(), err.offset().map_or(Value::Null, Value::from));
    detail.insert("terminal".to_owned(), Value::Bool(true));
    detail.insert("message".to_owned(), Value::from(err.to_string()));
    tagged(keys::ERROR, Value::Object(detail))
}
