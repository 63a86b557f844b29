use bpk_decoder::DecodedStream;
use bpk_types::GenericMessage;
use serde_json::Value;

use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::render_json::value_to_json;

/// Minimal renderer: one line per message, for skimming traffic.
///
/// Each line carries the frame index, the SignalR kind name (or
/// `Unknown`), the numeric kind, and the fields as compact JSON using
/// the same value mapping as the JSON renderer. Errors follow as lines
/// starting with `!`.
///
/// ```text
/// #0 Invocation(1) [{},null,"OnRenderCompleted",[7,null]]
/// #2 Ping(6) []
/// ! #1 UnsupportedTag at offset 29: unsupported type tag 0xD4 at offset 29
/// ! stopped: TruncatedInput: truncated input: data ends at offset 34
/// ```
///
/// An empty stream renders as an empty string.
pub struct MinimalRenderer;

impl MinimalRenderer {
    /// # Errors
    ///
    /// Returns [`RenderError::Json`] if a field list fails to serialize.
    pub fn render_all(
        messages: &[GenericMessage],
        config: &RenderConfig,
    ) -> Result<String, RenderError> {
        let mut lines = Vec::with_capacity(messages.len());
        for (index, message) in messages.iter().enumerate() {
            lines.push(Self::render_message(index, message, config)?);
        }
        Ok(lines.join("\n"))
    }

    /// Message lines are numbered by frame, matching the `! #N` error
    /// lines, so frames rejected by the decoder leave gaps.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Json`] if a field list fails to serialize.
    pub fn render_decoded(
        decoded: &DecodedStream,
        config: &RenderConfig,
    ) -> Result<String, RenderError> {
        let mut lines = Vec::with_capacity(decoded.messages.len() + decoded.errors.len() + 1);

        // Rejected frames produce no message; skip their indices so each
        // line shows the frame it came from.
        let mut rejected = decoded
            .errors
            .iter()
            .filter(|err| !err.recovered)
            .map(|err| err.index)
            .peekable();
        let mut frame = 0;
        for message in &decoded.messages {
            while rejected.next_if_eq(&frame).is_some() {
                frame += 1;
            }
            lines.push(Self::render_message(frame, message, config)?);
            frame += 1;
        }
        for err in &decoded.errors {
            let suffix = if err.recovered { " (recovered)" } else { "" };
            lines.push(format!(
                "! #{} {} at offset {}: {}{suffix}",
                err.index,
                err.error.kind(),
                err.error.offset().unwrap_or(err.offset),
                err.error,
            ));
        }
        if let Some(terminal) = &decoded.terminal {
            lines.push(format!("! stopped: {}: {terminal}", terminal.kind()));
        }
        Ok(lines.join("\n"))
    }

    fn render_message(
        index: usize,
        message: &GenericMessage,
        config: &RenderConfig,
    ) -> Result<String, RenderError> {
        let fields = Value::Array(
            message
                .fields
                .iter()
                .map(|field| value_to_json(field, config.binary))
                .collect(),
        );
        let name = message.kind_name().unwrap_or("Unknown");
        Ok(format!(
            "#{index} {name}({}) {}",
            message.kind,
            serde_json::to_string(&fields)?
        ))
    }
}
