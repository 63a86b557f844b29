use bpk_types::message_kind::{self, completion};
use bpk_types::{GenericMessage, GenericValue};
use bpk_wire::frame::write_frame;

use crate::error::EncodeError;
use crate::value_writer::write_value;

/// BlazorPack encoder: builds a request body from messages.
///
/// The encoder is the inverse of `BlazorPackDecoder`. Messages are
/// accumulated with the `add_*` methods and serialized by
/// [`encode`](Self::encode), each as a varint-length-prefixed
/// MessagePack array.
///
/// The typed helpers follow the SignalR MessagePack hub protocol
/// layouts; [`add_message`](Self::add_message) accepts any kind and
/// field list for everything else.
///
/// ```text
/// Invocation        [1, headers, invocation_id, target, arguments]
/// StreamItem        [2, headers, invocation_id, item]
/// Completion        [3, headers, invocation_id, result_kind, result?]
/// CancelInvocation  [5, headers, invocation_id]
/// Ping              [6]
/// Close             [7, error, allow_reconnect]
/// ```
///
/// # Usage
///
/// ```rust
/// use bpk_encoder::BlazorPackEncoder;
/// use bpk_types::GenericValue;
///
/// let body = BlazorPackEncoder::new()
///     .add_invocation(None, "OnRenderCompleted", vec![GenericValue::Integer(2), GenericValue::Null])
///     .add_ping()
///     .encode()
///     .unwrap();
/// assert_eq!(body[body.len() - 3..], [0x02, 0x91, 0x06]);
/// ```
#[derive(Default)]
pub struct BlazorPackEncoder {
    messages: Vec<GenericMessage>,
}

impl BlazorPackEncoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a message with an arbitrary kind and field list.
    pub fn add_message(&mut self, kind: i64, fields: Vec<GenericValue>) -> &mut Self {
        self.messages.push(GenericMessage::new(kind, fields));
        self
    }

    /// Add already-built messages, e.g. ones parsed back from rendered text.
    pub fn add_messages<I>(&mut self, messages: I) -> &mut Self
    where
        I: IntoIterator<Item = GenericMessage>,
    {
        self.messages.extend(messages);
        self
    }

    /// Add a hub method invocation with empty headers.
    ///
    /// `invocation_id` is `None` for fire-and-forget calls, which is how
    /// Blazor sends most circuit traffic.
    pub fn add_invocation(
        &mut self,
        invocation_id: Option<&str>,
        target: &str,
        arguments: Vec<GenericValue>,
    ) -> &mut Self {
        self.add_message(
            message_kind::INVOCATION,
            vec![
                empty_headers(),
                GenericValue::from(invocation_id),
                GenericValue::from(target),
                GenericValue::Array(arguments),
            ],
        )
    }

    pub fn add_stream_item(&mut self, invocation_id: &str, item: GenericValue) -> &mut Self {
        self.add_message(
            message_kind::STREAM_ITEM,
            vec![empty_headers(), GenericValue::from(invocation_id), item],
        )
    }

    /// Add a completion. `None` produces a void result.
    pub fn add_completion_result(
        &mut self,
        invocation_id: &str,
        result: Option<GenericValue>,
    ) -> &mut Self {
        let mut fields = vec![empty_headers(), GenericValue::from(invocation_id)];
        match result {
            Some(value) => {
                fields.push(GenericValue::Integer(completion::NON_VOID));
                fields.push(value);
            }
            None => fields.push(GenericValue::Integer(completion::VOID)),
        }
        self.add_message(message_kind::COMPLETION, fields)
    }

    pub fn add_completion_error(&mut self, invocation_id: &str, error: &str) -> &mut Self {
        self.add_message(
            message_kind::COMPLETION,
            vec![
                empty_headers(),
                GenericValue::from(invocation_id),
                GenericValue::Integer(completion::ERROR),
                GenericValue::from(error),
            ],
        )
    }

    pub fn add_cancel_invocation(&mut self, invocation_id: &str) -> &mut Self {
        self.add_message(
            message_kind::CANCEL_INVOCATION,
            vec![empty_headers(), GenericValue::from(invocation_id)],
        )
    }

    pub fn add_ping(&mut self) -> &mut Self {
        self.add_message(message_kind::PING, Vec::new())
    }

    pub fn add_close(&mut self, error: Option<&str>, allow_reconnect: bool) -> &mut Self {
        self.add_message(
            message_kind::CLOSE,
            vec![GenericValue::from(error), GenericValue::Boolean(allow_reconnect)],
        )
    }

    /// Serialize all accumulated messages into one request body.
    ///
    /// # Errors
    ///
    /// - [`EncodeError::EmptyPayload`] if no messages were added.
    /// - [`EncodeError::ValueTooLarge`] if a value exceeds MessagePack limits.
    /// - [`EncodeError::Wire`] if a message body exceeds `i32::MAX` bytes.
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        if self.messages.is_empty() {
            return Err(EncodeError::EmptyPayload);
        }

        let mut out = Vec::new();
        let mut body = Vec::new();
        for message in &self.messages {
            body.clear();
            encode_message(&mut body, message)?;
            write_frame(&body, &mut out)?;
        }
        Ok(out)
    }
}

/// Write one message as an unframed MessagePack array.
///
/// # Errors
///
/// Returns [`EncodeError::ValueTooLarge`] if any value exceeds
/// MessagePack limits.
pub fn encode_message(buf: &mut Vec<u8>, message: &GenericMessage) -> Result<(), EncodeError> {
    write_value(buf, &message.to_value())
}

fn empty_headers() -> GenericValue {
    GenericValue::Map(Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bpk_decoder::BlazorPackDecoder;

    #[test]
    fn empty_encoder_is_an_error() {
        assert!(matches!(
            BlazorPackEncoder::new().encode(),
            Err(EncodeError::EmptyPayload)
        ));
    }

    #[test]
    fn ping_bytes() {
        let body = BlazorPackEncoder::new().add_ping().encode().unwrap();
        assert_eq!(body, vec![0x02, 0x91, 0x06]);
    }

    #[test]
    fn invocation_bytes() {
        let body = BlazorPackEncoder::new()
            .add_message(1, vec![GenericValue::from("m1"), GenericValue::Integer(42)])
            .encode()
            .unwrap();
        assert_eq!(body, vec![0x05, 0x93, 0x01, 0xA2, b'm', b'1', 0x2A]);
    }

    #[test]
    fn typed_helpers_decode_back() {
        let body = BlazorPackEncoder::new()
            .add_invocation(Some("0"), "BeginInvokeDotNetFromJS", vec![GenericValue::from("1")])
            .add_stream_item("0", GenericValue::Integer(5))
            .add_completion_result("0", None)
            .add_completion_error("1", "boom")
            .add_cancel_invocation("2")
            .add_close(Some("bye"), true)
            .encode()
            .unwrap();

        let decoded = BlazorPackDecoder::decode(&body);
        assert!(decoded.is_complete());
        let kinds: Vec<i64> = decoded.messages.iter().map(|m| m.kind).collect();
        assert_eq!(kinds, vec![1, 2, 3, 3, 5, 7]);

        let invocation = &decoded.messages[0];
        assert_eq!(invocation.fields[0], GenericValue::Map(vec![]));
        assert_eq!(invocation.fields[1], GenericValue::from("0"));
        assert_eq!(invocation.fields[2], GenericValue::from("BeginInvokeDotNetFromJS"));

        let void = &decoded.messages[2];
        assert_eq!(void.fields[2], GenericValue::Integer(completion::VOID));
        assert_eq!(void.fields.len(), 3);

        let close = &decoded.messages[5];
        assert_eq!(
            close.fields,
            vec![GenericValue::from("bye"), GenericValue::Boolean(true)]
        );
    }
}
