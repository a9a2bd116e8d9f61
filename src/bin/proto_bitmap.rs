//! Rewrite `option (bitmap)` enums in a protobuf schema and retype their fields.
//!
//! Usage:
//!   proto_bitmap [INPUT.proto] [-o OUTPUT.proto]
//!   proto_bitmap < in.proto > out.proto
//!
//! Reads the whole document, transforms it, and writes the result only on
//! success. On failure the diagnostic goes to stderr and the exit code is 1.
//!
//! Logging goes to stderr and is enabled by `PROTO_BITMAP_LOG` (or `RUST_LOG`),
//! e.g. `PROTO_BITMAP_LOG=debug`.

use anyhow::Context;
use clap::Parser;
use proto_bitmap::transform;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "proto_bitmap", version, about = "Rewrite bitmap enums in a protobuf schema")]
struct Args {
    /// Schema to read; stdin when omitted.
    input: Option<PathBuf>,

    /// Where to write the result; stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn init_tracing() {
    let filter = match std::env::var("PROTO_BITMAP_LOG") {
        Ok(val) => EnvFilter::builder().parse_lossy(val),
        Err(_) if std::env::var("RUST_LOG").is_ok() => EnvFilter::from_default_env(),
        Err(_) => return,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_input(args: &Args) -> anyhow::Result<String> {
    match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("{}: read failed", path.display())),
        None => {
            let mut src = String::new();
            io::stdin()
                .read_to_string(&mut src)
                .context("<stdin>: read failed")?;
            Ok(src)
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let src = read_input(&args)?;
    let display_path = args
        .input
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<stdin>".to_string());

    let transformed = match transform(&src) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("{}: {}", display_path, e);
            std::process::exit(1);
        }
    };

    match &args.output {
        Some(path) => std::fs::write(path, &transformed)
            .with_context(|| format!("{}: write failed", path.display()))?,
        None => io::stdout().write_all(transformed.as_bytes())?,
    }
    Ok(())
}
