/// Implementation of `bpk decode`.
///
/// Reads a request body, decodes it with `BlazorPackDecoder`, then
/// renders the result with `DefaultRenderer::render_decoded`. Per-frame
/// errors and the terminal error (if any) appear as trailing markers in
/// the output, and a one-line summary goes to stderr.
///
/// # Output modes
///
/// ```text
/// ┌─────────┬──────────────────────────────────────────────────────────┐
/// │ Mode    │ Format                                                   │
/// ├─────────┼──────────────────────────────────────────────────────────┤
/// │ json    │ [{"kind":1,"fields":[...]}]                (default)     │
/// │ pretty  │ same document, indented                                  │
/// │ minimal │ #0 Invocation(1) [...]                                   │
/// └─────────┴──────────────────────────────────────────────────────────┘
/// ```
use anyhow::{Context, Result, anyhow};
use bpk_decoder::{BlazorPackDecoder, DecoderConfig};
use bpk_render::{BinaryEncoding, DefaultRenderer, OutputMode, RenderConfig, StreamRenderer};
use tracing::debug;

use crate::DecodeArgs;
use crate::input::{read_body, write_text};

/// Run the `bpk decode` command.
///
/// A partially decodable body still renders and exits 0; use
/// `bpk validate` for a strict check.
///
/// # Errors
///
/// Returns an error if the input cannot be read, a flag value is not
/// recognised, or rendering fails.
pub fn run(args: &DecodeArgs) -> Result<()> {
    let body = read_body(&args.input.file, args.input.hex)?;

    let mut decoder = DecoderConfig::default();
    if let Some(depth) = args.max_depth {
        decoder.max_depth = depth;
    }
    if let Some(size) = args.max_message {
        decoder.max_message_size = size;
    }

    let config = RenderConfig {
        mode: parse_output_mode(&args.mode)?,
        binary: parse_binary_encoding(&args.binary)?,
        include_kind_names: args.names,
    };

    let decoded = BlazorPackDecoder::decode_with_config(&body, &decoder);
    debug!(
        messages = decoded.messages.len(),
        errors = decoded.errors.len(),
        consumed = decoded.bytes_consumed,
        "decoded body"
    );
    let rendered = DefaultRenderer
        .render_decoded(&decoded, &config)
        .context("render failed")?;

    write_text(args.output.as_deref(), &rendered)?;

    if !decoded.is_complete() {
        eprintln!(
            "warning: {} message{} decoded, {} frame error{}{}",
            decoded.messages.len(),
            if decoded.messages.len() == 1 { "" } else { "s" },
            decoded.errors.len(),
            if decoded.errors.len() == 1 { "" } else { "s" },
            if decoded.terminal.is_some() {
                ", stopped early"
            } else {
                ""
            },
        );
    }

    Ok(())
}

// ── Flag parsers ──────────────────────────────────────────────────────────────

/// Parses the `--mode` string to an [`OutputMode`].
///
/// # Errors
///
/// Returns an error for unrecognised mode names.
pub fn parse_output_mode(s: &str) -> Result<OutputMode> {
    match s.to_lowercase().as_str() {
        "json" => Ok(OutputMode::Json),
        "pretty" | "json-pretty" => Ok(OutputMode::JsonPretty),
        "minimal" => Ok(OutputMode::Minimal),
        _ => Err(anyhow!("unknown mode {s:?}, expected json|pretty|minimal")),
    }
}

/// Parses the `--binary` string to a [`BinaryEncoding`].
///
/// # Errors
///
/// Returns an error for unrecognised encoding names.
pub fn parse_binary_encoding(s: &str) -> Result<BinaryEncoding> {
    match s.to_lowercase().as_str() {
        "hex" => Ok(BinaryEncoding::Hex),
        "base64" | "b64" => Ok(BinaryEncoding::Base64),
        _ => Err(anyhow!("unknown binary encoding {s:?}, expected hex|base64")),
    }
}
