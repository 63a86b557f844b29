#![no_main]

use bpk_decoder::BlazorPackDecoder;
use bpk_render::{
    parse_messages_with, BinaryEncoding, DefaultRenderer, OutputMode, RenderConfig, StreamRenderer,
};
use libfuzzer_sys::fuzz_target;

// Fuzz target: rendering whatever the decoder recovers.
//
// Input format:
//   byte 0: bit 0 selects base64, bit 1 pretty output
//   bytes 1..: request body
//
// JSON output must parse back into as many messages as were rendered.
// Deeply nested maps are skipped: each map level costs three JSON levels
// and the JSON parser stops at 128.
fuzz_target!(|data: &[u8]| {
    let Some((&selector, body)) = data.split_first() else {
        return;
    };
    let binary = if selector & 1 == 0 {
        BinaryEncoding::Hex
    } else {
        BinaryEncoding::Base64
    };
    let mode = if selector & 2 == 0 {
        OutputMode::Json
    } else {
        OutputMode::JsonPretty
    };
    let config = RenderConfig {
        mode,
        binary,
        include_kind_names: selector & 4 != 0,
    };

    let decoded = BlazorPackDecoder::decode(body);
    let text = DefaultRenderer.render_decoded(&decoded, &config).unwrap();
    let depth = decoded
        .messages
        .iter()
        .flat_map(|m| m.fields.iter())
        .map(|f| f.depth())
        .max()
        .unwrap_or(0);
    if depth <= 32 {
        let parsed = parse_messages_with(&text, binary).unwrap();
        assert_eq!(parsed.len(), decoded.messages.len());
    }

    let minimal = RenderConfig {
        mode: OutputMode::Minimal,
        ..config
    };
    let _ = DefaultRenderer.render_decoded(&decoded, &minimal).unwrap();
});
