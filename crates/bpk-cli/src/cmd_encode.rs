/// Implementation of `bpk encode`.
///
/// Parses rendered JSON back into messages with
/// `bpk_render::parse_messages_with` and packs them with
/// `BlazorPackEncoder`. This is how an analyst turns an edited
/// `bpk decode` dump into a body that can be replayed.
///
/// ```text
/// [{"kind":1,"fields":[{},null,"OnRenderCompleted",[2,null]]}]
///                      │
///                      ▼
/// 19 95 01 80 c0 b1 4f 6e 52 65 6e 64 65 72 ...
/// ```
use std::fs;

use anyhow::{Context, Result, bail};
use bpk_encoder::BlazorPackEncoder;
use bpk_render::parse_messages_with;

use crate::EncodeArgs;
use crate::cmd_decode::parse_binary_encoding;
use crate::input::read_bytes;

/// Run the `bpk encode` command.
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed, it contains
/// no messages, or the output cannot be written.
pub fn run(args: &EncodeArgs) -> Result<()> {
    let raw = read_bytes(&args.input)?;
    let text = String::from_utf8(raw).context("input is not UTF-8")?;
    let binary = parse_binary_encoding(&args.binary)?;

    let messages = parse_messages_with(&text, binary)
        .with_context(|| format!("cannot parse {}", args.input.display()))?;
    if messages.is_empty() {
        bail!("{} contains no messages", args.input.display());
    }
    let count = messages.len();

    let body = BlazorPackEncoder::new()
        .add_messages(messages)
        .encode()
        .context("encoding failed")?;

    let out = if args.hex {
        let mut dump = hex::encode(&body);
        dump.push('\n');
        dump.into_bytes()
    } else {
        body
    };
    fs::write(&args.output, &out)
        .with_context(|| format!("cannot write {}", args.output.display()))?;

    eprintln!(
        "wrote {count} message{} ({} bytes) to {}",
        if count == 1 { "" } else { "s" },
        out.len(),
        args.output.display()
    );
    Ok(())
}
