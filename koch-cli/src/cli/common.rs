//! Common utilities shared across CLI commands.

use std::fs;
use std::io::{self, Write};

use anyhow::{anyhow, bail, Context, Result};

/// Output format for a rendered scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    Json,
}

impl OutputFormat {
    pub fn from_name(name: &str) -> Option<OutputFormat> {
        match name.to_lowercase().as_str() {
            "svg" => Some(OutputFormat::Svg),
            "png" => Some(OutputFormat::Png),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }

    /// Guess the format from an output file extension.
    pub fn from_path(path: &str) -> Option<OutputFormat> {
        let ext = path.rsplit_once('.')?.1;
        OutputFormat::from_name(ext)
    }
}

/// Take the value following a flag, advancing the cursor past it.
pub fn next_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("{} requires a value", flag))
}

/// Parse a recursion depth. Negative values are a usage error.
pub fn parse_depth(text: &str) -> Result<u32> {
    let depth: i64 = text
        .parse()
        .with_context(|| format!("depth must be an integer, got '{}'", text))?;
    if depth < 0 {
        bail!("depth must be non-negative, got {}", depth);
    }
    u32::try_from(depth).with_context(|| format!("depth {} is too large", depth))
}

/// Parse a real number (length, stroke width, scale).
pub fn parse_number(text: &str, what: &str) -> Result<f64> {
    text.parse()
        .with_context(|| format!("{} must be a number, got '{}'", what, text))
}

/// Write output to a file, or to stdout for `None` / `-`.
pub fn write_output(path: Option<&str>, bytes: &[u8]) -> Result<()> {
    match path {
        Some("-") | None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(bytes).context("failed to write to stdout")?;
            stdout.flush().context("failed to flush stdout")?;
        }
        Some(path) => {
            fs::write(path, bytes).with_context(|| format!("failed to write {}", path))?;
            tracing::info!("Wrote: {}", path);
        }
    }
    Ok(())
}
