//! koch - draw Koch curves from the command line
//!
//! Usage:
//!   koch draw [options]       Render a scene (SVG, PNG or JSON)
//!   koch commands [options]   Print the pen command stream
//!   koch help                 Show usage

use std::env;

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{cmd_commands, cmd_draw};

/// Log to stderr so stdout stays clean for SVG/JSON output.
///
/// Honors `RUST_LOG`; defaults to `info`.
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &[String]) -> Result<()> {
    let prog = args.first().map(String::as_str).unwrap_or("koch");
    match args.get(1).map(String::as_str) {
        Some("draw") => cmd_draw(&args[2..]),
        Some("commands") => cmd_commands(&args[2..]),
        Some("help") | Some("--help") | Some("-h") | None => {
            print_usage(prog);
            Ok(())
        }
        Some(other) => {
            print_usage(prog);
            Err(anyhow!("unknown command: {}", other))
        }
    }
}

fn main() {
    init_logging();

    let args: Vec<String> = env::args().collect();
    if let Err(err) = run(&args) {
        tracing::debug!(error = ?err, "command failed");
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn print_usage(prog: &str) {
    eprintln!("koch - recursive Koch curve drawing");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {} draw [options]", prog);
    eprintln!("  {} commands [-d <depth>] [-l <length>] [--json]", prog);
    eprintln!("  {} help", prog);
    eprintln!();
    eprintln!("Draw options:");
    eprintln!("  -c, --config <file>    Scene file (YAML)");
    eprintln!("  -d, --depth <n>        Recursion depth (default: 4)");
    eprintln!("  -l, --length <n>       Curve length (default: 400)");
    eprintln!("  -o, --output <file>    Output file (- for stdout, default: stdout)");
    eprintln!("  -f, --format <fmt>     svg, png, json (default: from extension, else svg)");
    eprintln!("  --snowflake            Close three curves into a snowflake");
    eprintln!();
    eprintln!("Run '{} draw --help' for every draw option.", prog);
    eprintln!("Set RUST_LOG=debug for more detail on stderr.");
}
