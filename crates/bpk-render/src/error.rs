/// Errors that can occur while rendering or parsing rendered text.
///
/// Rendering itself only fails if the JSON serializer does. Parsing
/// rendered text back into messages can fail in more ways, and every
/// parse error names the JSON path it was found at (`$[2].fields[0]`).
///
/// ```text
/// ┌──────────────────┬───────────────────────────────────────────────┐
/// │ Variant          │ Cause                                         │
/// ├──────────────────┼───────────────────────────────────────────────┤
/// │ Json             │ Text is not JSON, or serialization failed     │
/// │ InvalidDocument  │ JSON does not have the rendered shape         │
/// │ InvalidBinary    │ `$binary` payload is not valid hex/base64     │
/// └──────────────────┴───────────────────────────────────────────────┘
/// ```
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid document at {path}: {reason}")]
    InvalidDocument { path: String, reason: &'static str },

    #[error("invalid $binary payload at {path}")]
    InvalidBinary { path: String },
}
