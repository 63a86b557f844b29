use bpk_decoder::DecodeError;
use bpk_render::RenderError;

/// Errors from inspecting a request body.
///
/// ```text
///   InspectError
///   ├── Decode(DecodeError)  ← nothing could be decoded
///   └── Render(RenderError)  ← decoded messages failed to render
/// ```
#[derive(Debug, thiserror::Error)]
pub enum InspectError {
    #[error("no messages decoded: {0}")]
    Decode(#[from] DecodeError),

    #[error("render failed: {0}")]
    Render(#[from] RenderError),
}
