//! `onto-convert`: converts an ontology document between interchange formats.
//!
//! **Formats:** `jsonld`, `turtle` (`ttl`), `rdfxml` (`owlxml`, `owl`, `rdf`)
//!
//! **Usage:**
//! ```
//! onto-convert --from <fmt> --to <fmt> [--out <path>] <input>
//! ```
//!
//! Reads stdin when `<input>` is `-`; writes to stdout unless `--out` is given.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use onto_clients::{init_logging, load};
use onto_interchange::Format;

/// Convert an ontology document between interchange formats.
#[derive(Parser)]
#[command(name = "onto-convert", about = "Convert an ontology between JSON-LD, Turtle, and RDF/XML")]
struct Args {
    /// Input format.
    #[arg(long)]
    from: Format,

    /// Output format.
    #[arg(long)]
    to: Format,

    /// Output file (default: stdout).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Input file, or `-` for stdin.
    input: PathBuf,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let ontology = load(&args.input, args.from)?;
    let text = onto_interchange::serialize(args.to, &ontology);

    match &args.out {
        Some(path) => {
            fs::write(path, &text).with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "Converted {} ({}) -> {} ({})",
                args.input.display(),
                args.from,
                path.display(),
                args.to
            );
        }
        None => io::stdout()
            .write_all(text.as_bytes())
            .context("Failed to write to stdout")?,
    }
    Ok(())
}
