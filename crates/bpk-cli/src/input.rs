use std::fs;
use std::io::{self, Read as _, Write as _};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

/// Read a file, or stdin when `path` is `-`.
pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    let bytes = if path == Path::new("-") {
        let mut buf = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut buf)
            .context("cannot read stdin")?;
        buf
    } else {
        fs::read(path).with_context(|| format!("cannot read {}", path.display()))?
    };
    debug!(path = %path.display(), len = bytes.len(), "read input");
    Ok(bytes)
}

/// Read a request body, decoding it from hex when `hex` is set.
pub fn read_body(path: &Path, hex: bool) -> Result<Vec<u8>> {
    let bytes = read_bytes(path)?;
    if hex {
        parse_hex(&bytes).with_context(|| format!("{} is not a hex dump", path.display()))
    } else {
        Ok(bytes)
    }
}

/// Decode a hex dump, ignoring whitespace and an optional `0x` prefix.
pub fn parse_hex(text: &[u8]) -> Result<Vec<u8>> {
    let digits: Vec<u8> = text
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    let digits = digits
        .strip_prefix(b"0x")
        .or_else(|| digits.strip_prefix(b"0X"))
        .unwrap_or(&digits);
    Ok(hex::decode(digits)?)
}

/// Write to a file, or stdout when `path` is `None`, ending with a newline
/// on stdout.
pub fn write_text(path: Option<&Path>, text: &str) -> Result<()> {
    if let Some(path) = path {
        fs::write(path, text.as_bytes()).with_context(|| format!("cannot write {}", path.display()))
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(text.as_bytes())
            .context("cannot write to stdout")?;
        if !text.ends_with('\n') {
            handle.write_all(b"\n").context("cannot write to stdout")?;
        }
        Ok(())
    }
}
