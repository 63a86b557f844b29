/// Configuration for rendering decoded messages.
///
/// ```text
/// ┌────────────────────┬──────────────────────────────────────────────┐
/// │ Field              │ Purpose                                      │
/// ├────────────────────┼──────────────────────────────────────────────┤
/// │ mode               │ Compact JSON, indented JSON, or one line per │
/// │                    │ message                                      │
/// │ binary             │ Text encoding for `$binary` payloads         │
/// │ include_kind_names │ Add a `"name"` field for known SignalR kinds │
/// └────────────────────┴──────────────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderConfig {
    pub mode: OutputMode,
    pub binary: BinaryEncoding,
    pub include_kind_names: bool,
}

/// Output format.
///
/// ```text
/// ┌────────────┬───────────────────────────────────────────────────────┐
/// │ Mode       │ Output                                                │
/// ├────────────┼───────────────────────────────────────────────────────┤
/// │ Json       │ [{"kind":1,"fields":[...]},...] on one line           │
/// │ JsonPretty │ Same document, two-space indented                     │
/// │ Minimal    │ #0 Invocation(1) [{},null,"Target",[...]]             │
/// └────────────┴───────────────────────────────────────────────────────┘
/// ```
///
/// Only the JSON modes can be read back by
/// [`parse_messages`](crate::parse_messages).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputMode {
    #[default]
    Json,
    JsonPretty,
    Minimal,
}

/// How binary values are written inside `{"$binary": ...}`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BinaryEncoding {
    /// Lowercase hex, two characters per byte.
    #[default]
    Hex,
    /// Standard base64 with padding.
    Base64,
}

impl BinaryEncoding {
    pub fn encode(self, bytes: &[u8]) -> String {
        use base64::Engine;

        match self {
            Self::Hex => hex::encode(bytes),
            Self::Base64 => base64::engine::general_purpose::STANDARD.encode(bytes),
        }
    }

    /// Inverse of [`encode`](Self::encode). `None` if `text` is not
    /// valid in this encoding.
    pub fn decode(self, text: &str) -> Option<Vec<u8>> {
        use base64::Engine;

        match self {
            Self::Hex => hex::decode(text).ok(),
            Self::Base64 => base64::engine::general_purpose::STANDARD.decode(text).ok(),
        }
    }
}
