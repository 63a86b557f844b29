use bpk_decoder::DecodedStream;
use bpk_types::GenericMessage;

use crate::config::{OutputMode, RenderConfig};
use crate::error::RenderError;
use crate::render_json::JsonRenderer;
use crate::render_minimal::MinimalRenderer;

/// Core renderer interface: decoded messages in, display text out.
///
/// Implementations are stateless; everything they need comes through
/// [`RenderConfig`].
///
/// ```text
/// &[GenericMessage] ──▶ StreamRenderer::render() ──▶ String
/// &DecodedStream    ──▶ StreamRenderer::render_decoded() ──▶ String
///                              │                      (+ error markers)
///                        RenderConfig
///                        (mode, binary, include_kind_names)
/// ```
pub trait StreamRenderer {
    /// Render messages.
    ///
    /// An empty slice is not an error: JSON modes produce `[]`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Json`] if serialization fails.
    fn render(
        &self,
        messages: &[GenericMessage],
        config: &RenderConfig,
    ) -> Result<String, RenderError>;

    /// Render a decode result, appending one marker per per-frame error
    /// and one for the terminal error, if any.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Json`] if serialization fails.
    fn render_decoded(
        &self,
        decoded: &DecodedStream,
        config: &RenderConfig,
    ) -> Result<String, RenderError>;
}

/// Default renderer, dispatching on [`OutputMode`].
///
/// ```text
/// ┌──────────────────┐     ┌──────────┐     ┌────────────────┐
/// │ &[GenericMessage]│────▶│ dispatch │────▶│ JsonRenderer   │
/// │ &DecodedStream   │     │ on mode  │     │ MinimalRenderer│
/// └──────────────────┘     └──────────┘     └────────────────┘
/// ```
pub struct DefaultRenderer;

impl StreamRenderer for DefaultRenderer {
    fn render(
        &self,
        messages: &[GenericMessage],
        config: &RenderConfig,
    ) -> Result<String, RenderError> {
        match config.mode {
            OutputMode::Json | OutputMode::JsonPretty => JsonRenderer::render_all(messages, config),
            OutputMode::Minimal => MinimalRenderer::render_all(messages, config),
        }
    }

    fn render_decoded(
        &self,
        decoded: &DecodedStream,
        config: &RenderConfig,
    ) -> Result<String, RenderError> {
        match config.mode {
            OutputMode::Json | OutputMode::JsonPretty => {
                JsonRenderer::render_decoded(decoded, config)
            }
            OutputMode::Minimal => MinimalRenderer::render_decoded(decoded, config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bpk_decoder::BlazorPackDecoder;
    use bpk_types::GenericValue;

    fn invocation() -> GenericMessage {
        GenericMessage::new(1, vec![GenericValue::from("m1"), GenericValue::Integer(42)])
    }

    #[test]
    fn empty_input_renders_empty_array() {
        let text = DefaultRenderer
            .render(&[], &RenderConfig::default())
            .unwrap();
        assert_eq!(text, "[]");
    }

    #[test]
    fn json_mode() {
        let text = DefaultRenderer
            .render(&[invocation()], &RenderConfig::default())
            .unwrap();
        assert_eq!(text, r#"[{"kind":1,"fields":["m1",42]}]"#);
    }

    #[test]
    fn pretty_mode_is_the_same_document() {
        let config = RenderConfig {
            mode: OutputMode::JsonPretty,
            ..RenderConfig::default()
        };
        let pretty = DefaultRenderer.render(&[invocation()], &config).unwrap();
        assert!(pretty.contains('\n'));
        let compact = DefaultRenderer
            .render(&[invocation()], &RenderConfig::default())
            .unwrap();
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&pretty).unwrap(),
            serde_json::from_str::<serde_json::Value>(&compact).unwrap()
        );
    }

    #[test]
    fn minimal_mode() {
        let config = RenderConfig {
            mode: OutputMode::Minimal,
            ..RenderConfig::default()
        };
        let text = DefaultRenderer.render(&[invocation()], &config).unwrap();
        assert_eq!(text, r#"#0 Invocation(1) ["m1",42]"#);
    }

    #[test]
    fn decoded_stream_gets_trailing_error_markers() {
        // ping, a frame with an ext tag, then a cut-off prefix
        let body = [0x02, 0x91, 0x06, 0x03, 0x92, 0x01, 0xD4, 0x80];
        let decoded = BlazorPackDecoder::decode(&body);
        let text = DefaultRenderer
            .render_decoded(&decoded, &RenderConfig::default())
            .unwrap();

        let document: serde_json::Value = serde_json::from_str(&text).unwrap();
        let items = document.as_array().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0]["kind"], 6);
        assert_eq!(items[1]["$error"]["kind"], "UnsupportedTag");
        assert_eq!(items[1]["$error"]["offset"], 6);
        assert_eq!(items[1]["$error"]["index"], 1);
        assert_eq!(items[2]["$error"]["kind"], "TruncatedInput");
        assert_eq!(items[2]["$error"]["terminal"], true);
    }

    #[test]
    fn minimal_decoded_lists_errors() {
        let decoded = BlazorPackDecoder::decode(&[0x02, 0x91, 0x06, 0x80]);
        let config = RenderConfig {
            mode: OutputMode::Minimal,
            ..RenderConfig::default()
        };
        let text = DefaultRenderer.render_decoded(&decoded, &config).unwrap();
        assert_eq!(
            text,
            "#0 Ping(6) []\n! stopped: TruncatedInput: truncated input: data ends at offset 4"
        );
    }
}
