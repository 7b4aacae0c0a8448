//! Commands command: print the raw pen command stream.
//!
//! Output is streamed from `KochCurve::commands`, so even a depth-10 curve
//! (two million commands) is never held in memory at once in text mode.

use std::io::{self, BufWriter, Write};

use anyhow::{bail, Context, Result};
use koch::{KochCurve, PenCommand};

use super::common::{next_value, parse_depth, parse_number};

/// Execute the commands command.
pub fn cmd_commands(args: &[String]) -> Result<()> {
    let mut depth: u32 = 4;
    let mut length: f64 = 400.0;
    let mut json = false;

    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "-d" | "--depth" => {
                depth = parse_depth(next_value(args, &mut i, flag)?)?;
            }
            "-l" | "--length" => {
                length = parse_number(next_value(args, &mut i, flag)?, "length")?;
            }
            "--json" => {
                json = true;
            }
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            unknown => {
                bail!("unknown option: {}", unknown);
            }
        }
        i += 1;
    }

    let curve = KochCurve::new(depth, length)?;
    tracing::info!(depth, length, commands = curve.commands().len(), "streaming commands");

    let stdout = io::stdout().lock();
    let mut out = BufWriter::new(stdout);
    if json {
        let commands: Vec<PenCommand> = curve.commands().collect();
        serde_json::to_writer_pretty(&mut out, &commands).context("failed to write JSON")?;
        writeln!(out)?;
    } else {
        write_text(curve, &mut out)?;
    }
    out.flush().context("failed to flush stdout")?;
    Ok(())
}

/// One command per line: `F100`, `L60`, `R120`.
fn write_text<W: Write>(curve: KochCurve, out: &mut W) -> Result<()> {
    for command in curve.commands() {
        writeln!(out, "{}", command.to_short_string())?;
    }
    Ok(())
}

fn print_usage() {
    eprintln!("Usage: koch commands [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -d, --depth <n>     Recursion depth (default: 4)");
    eprintln!("  -l, --length <n>    Curve length (default: 400)");
    eprintln!("  --json              Print a JSON array instead of one command per line");
}
