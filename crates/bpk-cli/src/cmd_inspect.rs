/// Implementation of `bpk inspect`.
///
/// Decodes a request body and prints one line per frame with its byte
/// offset, declared length, and what it decoded to, followed by any
/// errors for that frame.
///
/// # Output format
///
/// ```text
/// Body: 41 bytes, 3 frames, 2 messages
/// Frame 0 @0: 25 bytes  Invocation(1), 4 fields
/// Frame 1 @26: 3 bytes  rejected
///          ! UnsupportedTag at offset 29: unsupported type tag 0xD4 at offset 29
/// Frame 2 @30: 2 bytes  Ping(6), 0 fields
/// ---
/// stopped at offset 33: truncated input: data ends at offset 41
/// ```
use anyhow::{Context, Result};
use bpk_decoder::BlazorPackDecoder;
use bpk_wire::frame::FrameHeader;

use crate::InspectArgs;
use crate::input::read_body;

/// Run the `bpk inspect` command.
///
/// # Errors
///
/// Returns an error if the input cannot be read.
pub fn run(args: &InspectArgs) -> Result<()> {
    let body = read_body(&args.input.file, args.input.hex)?;
    let decoded = BlazorPackDecoder::decode(&body);

    // Every frame ends in either a message or a non-recovered error, so
    // counting frames from the error list is exact.
    let mut frame_count = decoded.messages.len();
    frame_count += decoded
        .errors
        .iter()
        .filter(|e| !e.recovered)
        .count();

    println!(
        "Body: {} bytes, {frame_count} frame{}, {} message{}",
        body.len(),
        if frame_count == 1 { "" } else { "s" },
        decoded.messages.len(),
        if decoded.messages.len() == 1 { "" } else { "s" },
    );

    let mut messages = decoded.messages.iter();
    let mut cursor = 0;
    for index in 0..frame_count {
        let header = FrameHeader::read_from(&body[cursor..])
            .with_context(|| format!("frame {index} header at offset {cursor}"))?;

        let frame_errors: Vec<_> = decoded.errors.iter().filter(|e| e.index == index).collect();
        let rejected = frame_errors.iter().any(|e| !e.recovered);

        let summary = if rejected {
            "rejected".to_owned()
        } else if let Some(message) = messages.next() {
            format!(
                "{}({}), {} field{}",
                message.kind_name().unwrap_or("Unknown"),
                message.kind,
                message.fields.len(),
                if message.fields.len() == 1 { "" } else { "s" },
            )
        } else {
            "missing".to_owned()
        };
        println!(
            "Frame {index} @{cursor}: {} bytes  {summary}",
            header.body_len
        );

        for err in frame_errors {
            println!(
                "         ! {} at offset {}: {}{}",
                err.error.kind(),
                err.error.offset().unwrap_or(err.offset),
                err.error,
                if err.recovered { " (recovered)" } else { "" },
            );
        }

        cursor += header.frame_len();
    }

    println!("---");
    match &decoded.terminal {
        Some(err) => println!("stopped at offset {cursor}: {err}"),
        None => println!("end of body at offset {cursor}"),
    }

    Ok(())
}
