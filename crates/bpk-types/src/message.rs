use crate::message_kind;
use crate::value::GenericValue;

/// One top-level BlazorPack message.
///
/// On the wire a message is a MessagePack array whose first element is
/// the message kind. `fields` holds the remaining elements verbatim;
/// their shape depends on the kind and is not interpreted here.
///
/// ```text
///   [ kind, field_0, field_1, ... ]
///     │     └──────── fields ─────┘
///     └── kind (opaque integer)
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct GenericMessage {
    pub kind: i64,
    pub fields: Vec<GenericValue>,
}

/// All messages decoded from one request body, in wire order.
pub type MessageStream = Vec<GenericMessage>;

impl GenericMessage {
    pub fn new(kind: i64, fields: Vec<GenericValue>) -> Self {
        Self { kind, fields }
    }

    /// SignalR name for this message's kind, if it is a known one.
    pub fn kind_name(&self) -> Option<&'static str> {
        message_kind::kind_name(self.kind)
    }

    /// The message as the array it was decoded from.
    pub fn to_value(&self) -> GenericValue {
        let mut items = Vec::with_capacity(self.fields.len() + 1);
        items.push(GenericValue::Integer(self.kind));
        items.extend(self.fields.iter().cloned());
        GenericValue::Array(items)
    }

    /// Split a decoded array into kind and fields.
    ///
    /// Returns `None` if the array is empty or its first element is not
    /// an integer.
    pub fn from_items(mut items: Vec<GenericValue>) -> Option<Self> {
        let kind = items.first()?.as_i64()?;
        items.remove(0);
        Some(Self { kind, fields: items })
    }
}
