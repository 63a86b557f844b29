/// Implementation of `bpk validate`.
///
/// Decodes a request body and reports either success checkmarks (`✓`)
/// or one diagnostic line (`✗`) per problem. The command exits with
/// code 0 only when every frame decodes without any error, recovered
/// ones included; the main dispatcher turns the returned `Err` into
/// exit code 1.
///
/// # Success output
///
/// ```text
/// ✓ Frames: 3 messages decoded
/// ✓ Integrity: every frame decodes without error
/// ```
///
/// # Failure output
///
/// ```text
/// ✓ Frames: 1 message decoded
/// ✗ Frame 1: LengthMismatch at offset 3: length mismatch for frame at offset 3: declared 3 bytes, found 6
/// ```
use anyhow::{Result, anyhow};
use bpk_decoder::BlazorPackDecoder;

use crate::ValidateArgs;
use crate::input::read_body;

/// Run the `bpk validate` command.
///
/// # Errors
///
/// Returns an error if the input cannot be read or does not decode
/// cleanly.
pub fn run(args: &ValidateArgs) -> Result<()> {
    let body = read_body(&args.input.file, args.input.hex)?;
    let decoded = BlazorPackDecoder::decode(&body);

    println!(
        "✓ Frames: {} message{} decoded",
        decoded.messages.len(),
        if decoded.messages.len() == 1 { "" } else { "s" }
    );

    if decoded.is_complete() {
        println!("✓ Integrity: every frame decodes without error");
        return Ok(());
    }

    for err in &decoded.errors {
        println!(
            "✗ Frame {}: {} at offset {}: {}",
            err.index,
            err.error.kind(),
            err.error.offset().unwrap_or(err.offset),
            err.error
        );
    }
    if let Some(err) = &decoded.terminal {
        println!("✗ Stopped: {}: {err}", err.kind());
    }

    Err(anyhow!("validation failed"))
}
