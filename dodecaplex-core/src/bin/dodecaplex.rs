//! Dodecaplex generator
//!
//! Builds the 120-cell tables and writes them out.
//!
//! Usage:
//!     dodecaplex                      # writes dodecaplex.h
//!     dodecaplex -o tables/cells.h --vertices tables/vertices.h
//!     dodecaplex --stdout --summary
//!     RUST_LOG=dodecaplex_core=debug dodecaplex --json dodecaplex.json

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Parser;
use dodecaplex_core::{to_json, Dodecaplex, DodecaplexError, DEFAULT_OUTPUT};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "dodecaplex")]
#[command(about = "Generate 120-cell cell, face and adjacency tables")]
#[command(version)]
struct Args {
    /// Table output file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Write the table to stdout instead of a file
    #[arg(long)]
    stdout: bool,

    /// Also write the vertex coordinates the table indexes into
    #[arg(long)]
    vertices: Option<PathBuf>,

    /// Also write the full structure as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Print structure counts as JSON to stdout
    #[arg(long)]
    summary: bool,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(&args) {
        tracing::error!(code = e.error_code(), category = ?e.category(), "{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "dodecaplex=debug,dodecaplex_core=debug"
    } else {
        "dodecaplex=info,dodecaplex_core=info"
    };

    // stderr only, stdout may carry the table
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(args: &Args) -> Result<(), DodecaplexError> {
    tracing::info!("dodecaplex v{}", env!("CARGO_PKG_VERSION"));

    let dodecaplex = Dodecaplex::build()?;
    let rendered = dodecaplex.render();

    let mut stdout = std::io::stdout().lock();
    if args.stdout {
        stdout.write_all(rendered.table.as_bytes())?;
    } else {
        write_file(&args.output, &rendered.table)?;
    }

    if let Some(path) = &args.vertices {
        write_file(path, &rendered.vertices)?;
    }

    if let Some(path) = &args.json {
        write_file(path, &to_json(&dodecaplex.table())?)?;
    }

    if args.summary {
        let summary = serde_json::to_string_pretty(&dodecaplex.summary())?;
        writeln!(stdout, "{}", summary)?;
    }

    Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<(), DodecaplexError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    tracing::info!(path = %path.display(), bytes = contents.len(), "wrote output");
    Ok(())
}
