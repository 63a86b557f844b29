use bpk_decoder::BlazorPackDecoder;
use bpk_render::{DefaultRenderer, StreamRenderer};
use tracing::{debug, info, warn};

use crate::annotations::Annotations;
use crate::config::InspectorConfig;
use crate::error::InspectError;
use crate::request::InterceptedRequest;

/// What the proxy should do with a request after the received hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReceivedAction {
    /// Forward unchanged.
    Continue,
}

/// Why a request was not inspected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    OutOfScope,
    StructuredContentType,
    UrlMismatch,
    EmptyBody,
}

/// Result of the to-be-sent hook. The request itself always proceeds.
#[derive(Debug)]
pub enum Outcome {
    Skipped(SkipReason),
    /// Notes were set. `complete` is `false` when they include error
    /// markers.
    Annotated { messages: usize, complete: bool },
    /// Nothing could be decoded; no notes were set.
    Failed(InspectError),
}

/// Proxy-side glue: highlights Blazor traffic and annotates it with the
/// decoded messages.
///
/// The inspector owns no proxy state. Hosts call the two hooks from
/// their own request handler and pass adapters implementing
/// [`InterceptedRequest`] and [`Annotations`]:
///
/// ```text
///   request received ──▶ handle_request_received ──▶ highlight?
///                                                    (path + body check only)
///   request to be sent ──▶ handle_request_to_be_sent
///                             │ scope, content type, URL, body filters
///                             ▼
///                          decode ──▶ render ──▶ set_notes
/// ```
///
/// Decoding problems never propagate into the proxy flow: a partially
/// decoded body is annotated with trailing error markers, and an
/// undecodable one is left without notes.
pub struct BlazorInspector {
    config: InspectorConfig,
}

impl BlazorInspector {
    pub fn new(config: InspectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    /// Highlight requests to the Blazor endpoint that carry a body.
    ///
    /// Only the path and body length are looked at; the body is not
    /// decoded here.
    pub fn handle_request_received(
        &self,
        request: &dyn InterceptedRequest,
        annotations: &mut dyn Annotations,
    ) -> ReceivedAction {
        if !request.body().is_empty() && request.path().contains(&self.config.endpoint_marker) {
            debug!(path = request.path(), "highlighting blazor request");
            annotations.set_highlight(self.config.highlight);
        }
        ReceivedAction::Continue
    }

    /// Decode an in-scope BlazorPack body and attach the rendered
    /// messages as notes.
    pub fn handle_request_to_be_sent(
        &self,
        request: &dyn InterceptedRequest,
        annotations: &mut dyn Annotations,
    ) -> Outcome {
        if let Some(reason) = self.skip_reason(request) {
            debug!(url = request.url(), ?reason, "not inspecting");
            return Outcome::Skipped(reason);
        }

        let decoded = BlazorPackDecoder::decode_with_config(request.body(), &self.config.decoder);
        if decoded.messages.is_empty() {
            if let Some(err) = decoded.into_error() {
                warn!(url = request.url(), error = %err, "body did not decode");
                return Outcome::Failed(InspectError::Decode(err));
            }
            // Only an empty body decodes to nothing without an error.
            return Outcome::Skipped(SkipReason::EmptyBody);
        }

        let notes = match DefaultRenderer.render_decoded(&decoded, &self.config.render) {
            Ok(notes) => notes,
            Err(err) => {
                warn!(url = request.url(), error = %err, "render failed");
                return Outcome::Failed(InspectError::Render(err));
            }
        };

        let messages = decoded.messages.len();
        let complete = decoded.is_complete();
        info!(url = request.url(), messages, complete, "annotated blazor request");
        annotations.set_notes(notes);
        Outcome::Annotated { messages, complete }
    }

    /// Decode and render a body directly, without any request filters.
    ///
    /// # Errors
    ///
    /// - [`InspectError::Decode`] if the body is not empty but not a
    ///   single message could be decoded.
    /// - [`InspectError::Render`] if rendering fails.
    pub fn inspect(&self, body: &[u8]) -> Result<String, InspectError> {
        let decoded = BlazorPackDecoder::decode_with_config(body, &self.config.decoder);
        if decoded.messages.is_empty() {
            return match decoded.into_error() {
                Some(err) => Err(InspectError::Decode(err)),
                None => Ok(DefaultRenderer.render(&[], &self.config.render)?),
            };
        }
        Ok(DefaultRenderer.render_decoded(&decoded, &self.config.render)?)
    }

    fn skip_reason(&self, request: &dyn InterceptedRequest) -> Option<SkipReason> {
        if !request.is_in_scope() {
            Some(SkipReason::OutOfScope)
        } else if request.content_type().is_structured_text() {
            Some(SkipReason::StructuredContentType)
        } else if !request.url().contains(&self.config.url_marker) {
            Some(SkipReason::UrlMismatch)
        } else if request.body().is_empty() {
            Some(SkipReason::EmptyBody)
        } else {
            None
        }
    }
}

impl Default for BlazorInspector {
    fn default() -> Self {
        Self::new(InspectorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::HighlightColor;
    use crate::request::ContentType;
    use bpk_decoder::DecodeError;
    use bpk_encoder::BlazorPackEncoder;
    use bpk_render::{OutputMode, RenderConfig};
    use bpk_types::GenericValue;

    struct MockRequest {
        url: String,
        path: String,
        content_type: ContentType,
        body: Vec<u8>,
        in_scope: bool,
    }

    impl MockRequest {
        fn blazor(body: Vec<u8>) -> Self {
            Self {
                url: "https://app.example/_blazor?id=QJ3a0".to_owned(),
                path: "/_blazor?id=QJ3a0".to_owned(),
                content_type: ContentType::Unknown,
                body,
                in_scope: true,
            }
        }
    }

    impl InterceptedRequest for MockRequest {
        fn url(&self) -> &str {
            &self.url
        }
        fn path(&self) -> &str {
            &self.path
        }
        fn content_type(&self) -> ContentType {
            self.content_type
        }
        fn body(&self) -> &[u8] {
            &self.body
        }
        fn is_in_scope(&self) -> bool {
            self.in_scope
        }
    }

    #[derive(Default)]
    struct MockAnnotations {
        highlight: Option<HighlightColor>,
        notes: Option<String>,
    }

    impl Annotations for MockAnnotations {
        fn set_highlight(&mut self, color: HighlightColor) {
            self.highlight = Some(color);
        }
        fn set_notes(&mut self, notes: String) {
            self.notes = Some(notes);
        }
    }

    fn render_completed() -> Vec<u8> {
        BlazorPackEncoder::new()
            .add_invocation(
                None,
                "OnRenderCompleted",
                vec![GenericValue::Integer(2), GenericValue::Null],
            )
            .encode()
            .unwrap()
    }

    // ── Highlighting ──────────────────────────────────────────────────────

    #[test]
    fn highlights_blazor_endpoint_with_body() {
        let inspector = BlazorInspector::default();
        let mut annotations = MockAnnotations::default();
        let action =
            inspector.handle_request_received(&MockRequest::blazor(vec![0xFF]), &mut annotations);
        assert_eq!(action, ReceivedAction::Continue);
        // Highlighting does not depend on the body decoding.
        assert_eq!(annotations.highlight, Some(HighlightColor::Cyan));
    }

    #[test]
    fn no_highlight_without_body_or_marker() {
        let inspector = BlazorInspector::default();

        let mut annotations = MockAnnotations::default();
        inspector.handle_request_received(&MockRequest::blazor(vec![]), &mut annotations);
        assert_eq!(annotations.highlight, None);

        let mut negotiate = MockRequest::blazor(vec![0x01]);
        negotiate.path = "/_blazor/negotiate?negotiateVersion=1".to_owned();
        let mut annotations = MockAnnotations::default();
        inspector.handle_request_received(&negotiate, &mut annotations);
        assert_eq!(annotations.highlight, None);
    }

    // ── Annotation ────────────────────────────────────────────────────────

    #[test]
    fn annotates_decoded_body() {
        let inspector = BlazorInspector::default();
        let mut annotations = MockAnnotations::default();
        let outcome = inspector
            .handle_request_to_be_sent(&MockRequest::blazor(render_completed()), &mut annotations);

        assert!(matches!(
            outcome,
            Outcome::Annotated {
                messages: 1,
                complete: true
            }
        ));
        assert_eq!(
            annotations.notes.as_deref(),
            Some(r#"[{"kind":1,"fields":[{},null,"OnRenderCompleted",[2,null]]}]"#)
        );
    }

    #[test]
    fn partial_body_is_annotated_with_markers() {
        let mut body = render_completed();
        body.extend_from_slice(&[0x09, 0x91]);

        let inspector = BlazorInspector::default();
        let mut annotations = MockAnnotations::default();
        let outcome =
            inspector.handle_request_to_be_sent(&MockRequest::blazor(body), &mut annotations);

        assert!(matches!(
            outcome,
            Outcome::Annotated {
                messages: 1,
                complete: false
            }
        ));
        assert!(annotations.notes.unwrap().contains(r#""$error""#));
    }

    #[test]
    fn undecodable_body_gets_no_notes() {
        let inspector = BlazorInspector::default();
        let mut annotations = MockAnnotations::default();
        let outcome = inspector
            .handle_request_to_be_sent(&MockRequest::blazor(vec![0x80]), &mut annotations);

        assert!(matches!(
            outcome,
            Outcome::Failed(InspectError::Decode(DecodeError::TruncatedInput { .. }))
        ));
        assert_eq!(annotations.notes, None);
    }

    #[test]
    fn filters_are_applied_in_order() {
        let inspector = BlazorInspector::default();
        let cases: [(fn(&mut MockRequest), SkipReason); 4] = [
            (|r| r.in_scope = false, SkipReason::OutOfScope),
            (|r| r.content_type = ContentType::Json, SkipReason::StructuredContentType),
            (|r| r.url = "https://app.example/api/data".to_owned(), SkipReason::UrlMismatch),
            (|r| r.body.clear(), SkipReason::EmptyBody),
        ];

        for (tweak, expected) in cases {
            let mut request = MockRequest::blazor(render_completed());
            tweak(&mut request);
            let mut annotations = MockAnnotations::default();
            match inspector.handle_request_to_be_sent(&request, &mut annotations) {
                Outcome::Skipped(reason) => assert_eq!(reason, expected),
                other => panic!("expected Skipped({expected:?}), got {other:?}"),
            }
            assert_eq!(annotations.notes, None);
        }
    }

    // ── Direct inspection ─────────────────────────────────────────────────

    #[test]
    fn inspect_uses_render_config() {
        let inspector = BlazorInspector::new(InspectorConfig {
            render: RenderConfig {
                mode: OutputMode::Minimal,
                ..RenderConfig::default()
            },
            ..InspectorConfig::default()
        });
        assert_eq!(
            inspector.inspect(&[0x02, 0x91, 0x06]).unwrap(),
            "#0 Ping(6) []"
        );
        assert_eq!(BlazorInspector::default().inspect(&[]).unwrap(), "[]");
        assert!(matches!(
            inspector.inspect(&[0x01, 0xC1]),
            Err(InspectError::Decode(DecodeError::UnsupportedTag { tag: 0xC1, .. }))
        ));
    }
}
