use bpk_decoder::DecoderConfig;
use bpk_render::RenderConfig;

use crate::annotations::HighlightColor;

/// Path fragment of a Blazor Server circuit request.
pub const BLAZOR_ENDPOINT_MARKER: &str = "_blazor?id";

/// URL fragment shared by every Blazor hub request.
pub const BLAZOR_URL_MARKER: &str = "_blazor";

/// Configuration for [`BlazorInspector`](crate::BlazorInspector).
///
/// ```text
/// ┌─────────────────┬─────────────────────────────────────────────────┐
/// │ Field           │ Purpose                                         │
/// ├─────────────────┼─────────────────────────────────────────────────┤
/// │ endpoint_marker │ Path fragment that triggers highlighting        │
/// │ url_marker      │ URL fragment that triggers decoding             │
/// │ highlight       │ Colour applied to matching requests             │
/// │ render          │ How decoded messages become notes               │
/// │ decoder         │ Limits for untrusted bodies                     │
/// └─────────────────┴─────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InspectorConfig {
    pub endpoint_marker: String,
    pub url_marker: String,
    pub highlight: HighlightColor,
    pub render: RenderConfig,
    pub decoder: DecoderConfig,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            endpoint_marker: BLAZOR_ENDPOINT_MARKER.to_owned(),
            url_marker: BLAZOR_URL_MARKER.to_owned(),
            highlight: HighlightColor::Cyan,
            render: RenderConfig::default(),
            decoder: DecoderConfig::default(),
        }
    }
}
