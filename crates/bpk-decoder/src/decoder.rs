use bpk_types::{GenericMessage, GenericValue, MessageStream};
use bpk_wire::frame::FrameHeader;
use tracing::{debug, trace, warn};

use crate::config::DecoderConfig;
use crate::error::DecodeError;
use crate::value_reader::ValueReader;

/// The result of decoding a BlazorPack request body.
///
/// Decoding never fails outright: whatever could be recovered is kept,
/// and every problem is recorded next to it.
///
/// ```text
/// ┌─────────────────────────────────────────────────────────────┐
/// │ DecodedStream                                               │
/// │   messages: MessageStream        ← wire order               │
/// │   errors:   Vec<MessageError>    ← per-frame problems       │
/// │   terminal: Option<DecodeError>  ← why decoding stopped     │
/// │   bytes_consumed: usize          ← end of the last frame    │
/// └─────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Default)]
pub struct DecodedStream {
    /// Successfully decoded messages, in the order they appear.
    pub messages: MessageStream,

    /// Problems confined to a single frame.
    ///
    /// A frame with a non-recovered error contributes no message; a
    /// frame whose errors are all `recovered` still does.
    pub errors: Vec<MessageError>,

    /// The condition that stopped decoding before the end of the body.
    pub terminal: Option<DecodeError>,

    /// Bytes of the body that were walked as whole frames.
    pub bytes_consumed: usize,
}

impl DecodedStream {
    /// `true` when every byte decoded cleanly.
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty() && self.terminal.is_none()
    }

    pub fn has_errors(&self) -> bool {
        !self.is_complete()
    }

    /// Convert to an all-or-nothing result.
    ///
    /// # Errors
    ///
    /// Returns the terminal error if decoding stopped early, otherwise
    /// the first per-frame error, recovered or not.
    pub fn into_result(self) -> Result<MessageStream, DecodeError> {
        if self.is_complete() {
            return Ok(self.messages);
        }
        match self.into_error() {
            Some(err) => Err(err),
            None => Ok(Vec::new()),
        }
    }

    /// The terminal error, or else the first per-frame error.
    pub fn into_error(self) -> Option<DecodeError> {
        self.terminal
            .or_else(|| self.errors.into_iter().next().map(|first| first.error))
    }
}

/// A problem confined to one frame.
#[derive(Debug)]
pub struct MessageError {
    /// Zero-based frame index in the body.
    pub index: usize,

    /// Absolute offset of the frame's length prefix.
    pub offset: usize,

    pub error: DecodeError,

    /// `true` when the frame's message was still produced (lossy string
    /// substitution, trailing bytes inside the frame).
    pub recovered: bool,
}

/// What one frame turned into.
enum Frame {
    Decoded {
        message: GenericMessage,
        warnings: Vec<DecodeError>,
    },
    /// The frame's content is unusable; skip to its declared end.
    Rejected(DecodeError),
    /// The content is a complete value that runs past the declared
    /// end; the framing can no longer be trusted.
    Overrun(DecodeError),
}

/// Synchronous BlazorPack decoder.
///
/// Walks a request body frame by frame. Each frame is a varint length
/// prefix followed by one MessagePack array `[kind, fields...]`:
///
///   1. **Prefix**: read the length. A cut-short or oversized prefix
///      stops decoding.
///   2. **Bounds**: a frame that claims more bytes than remain (or more
///      than `max_message_size`) stops decoding.
///   3. **Value**: decode one value against the frame slice only. It
///      must be a non-empty array led by an integer kind.
///   4. **Advance**: jump to the declared end of the frame, whatever
///      the value consumed.
///
/// Value errors are confined to their frame, including values cut
/// short by garbage lengths. Only a value that decodes completely but
/// needs more bytes than its frame declares stops decoding, because the
/// next frame boundary is then unknown. Messages decoded before any
/// stop are always kept.
///
/// # Example
///
/// ```rust
/// use bpk_decoder::BlazorPackDecoder;
/// use bpk_types::GenericValue;
///
/// let body = [0x05, 0x93, 0x01, 0xA2, b'm', b'1', 0x2A];
/// let decoded = BlazorPackDecoder::decode(&body);
/// assert!(decoded.is_complete());
/// assert_eq!(decoded.messages[0].kind, 1);
/// assert_eq!(decoded.messages[0].fields[1], GenericValue::Integer(42));
/// ```
pub struct BlazorPackDecoder;

impl BlazorPackDecoder {
    /// Decode a request body with the default limits.
    pub fn decode(body: &[u8]) -> DecodedStream {
        Self::decode_with_config(body, &DecoderConfig::default())
    }

    /// Decode a request body with explicit limits.
    pub fn decode_with_config(body: &[u8], config: &DecoderConfig) -> DecodedStream {
        let mut stream = DecodedStream::default();
        let mut cursor = 0;
        let mut index = 0;

        while cursor < body.len() {
            let header = match FrameHeader::read_from(&body[cursor..]) {
                Ok(header) => header,
                Err(err) => {
                    stream.stop(DecodeError::from_wire(err, cursor));
                    break;
                }
            };

            let body_start = cursor + header.prefix_len;
            let available = body.len() - body_start;

            if header.body_len > config.max_message_size {
                stream.stop(DecodeError::MessageTooLarge {
                    offset: cursor,
                    size: header.body_len,
                    limit: config.max_message_size,
                });
                break;
            }
            if header.body_len > available {
                stream.stop(DecodeError::LengthMismatch {
                    offset: cursor,
                    declared: header.body_len,
                    actual: available,
                });
                break;
            }

            let body_end = body_start + header.body_len;
            trace!(index, offset = cursor, len = header.body_len, "frame");

            match Self::decode_frame(body, cursor, body_start, body_end, config) {
                Frame::Decoded { message, warnings } => {
                    for error in warnings {
                        stream.record(index, cursor, error, true);
                    }
                    stream.messages.push(message);
                }
                Frame::Rejected(error) => stream.record(index, cursor, error, false),
                Frame::Overrun(error) => {
                    stream.stop(error);
                    break;
                }
            }

            cursor = body_end;
            index += 1;
        }

        stream.bytes_consumed = cursor;
        stream
    }

    fn decode_frame(
        body: &[u8],
        offset: usize,
        start: usize,
        end: usize,
        config: &DecoderConfig,
    ) -> Frame {
        if start == end {
            return Frame::Rejected(DecodeError::MalformedMessage {
                offset,
                reason: "empty message body",
            });
        }

        let mut reader = ValueReader::new(&body[start..end], start, config.max_depth);
        let value = match reader.read_value() {
            Ok(value) => value,
            Err(err @ DecodeError::TruncatedInput { .. }) => {
                return Self::measure_overrun(body, offset, start, end, config, err);
            }
            Err(err) => return Frame::Rejected(err),
        };

        let message = match Self::into_message(value, start) {
            Ok(message) => message,
            Err(err) => return Frame::Rejected(err),
        };

        let mut warnings: Vec<DecodeError> = reader
            .invalid_strings()
            .iter()
            .map(|&offset| DecodeError::InvalidEncoding { offset })
            .collect();

        let consumed = reader.position();
        if consumed < end - start {
            warnings.push(DecodeError::LengthMismatch {
                offset,
                declared: end - start,
                actual: consumed,
            });
        }

        Frame::Decoded { message, warnings }
    }

    /// Split a top-level array into kind and fields.
    fn into_message(value: GenericValue, offset: usize) -> Result<GenericMessage, DecodeError> {
        let GenericValue::Array(items) = value else {
            return Err(DecodeError::MalformedMessage {
                offset,
                reason: "top-level value is not an array",
            });
        };

        let empty = items.is_empty();
        GenericMessage::from_items(items).ok_or(DecodeError::MalformedMessage {
            offset,
            reason: if empty {
                "empty message array"
            } else {
                "message kind is not an integer"
            },
        })
    }

    /// Re-read a value cut short by its frame against the rest of the
    /// body. If it completes there, the frame overran; otherwise the
    /// frame's own content is bad and only that frame is rejected.
    fn measure_overrun(
        body: &[u8],
        offset: usize,
        start: usize,
        end: usize,
        config: &DecoderConfig,
        truncated: DecodeError,
    ) -> Frame {
        let mut rest = ValueReader::new(&body[start..], start, config.max_depth);
        match rest.read_value() {
            Ok(_) => Frame::Overrun(DecodeError::LengthMismatch {
                offset,
                declared: end - start,
                actual: rest.position(),
            }),
            Err(_) => Frame::Rejected(truncated),
        }
    }
}

impl DecodedStream {
    fn record(&mut self, index: usize, offset: usize, error: DecodeError, recovered: bool) {
        debug!(index, offset, recovered, %error, "message error");
        self.errors.push(MessageError {
            index,
            offset,
            error,
            recovered,
        });
    }

    fn stop(&mut self, error: DecodeError) {
        warn!(messages = self.messages.len(), %error, "decoding stopped");
        self.terminal = Some(error);
    }
}
