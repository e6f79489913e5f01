//! `onto-validate`: runs the structural validator over an ontology document.
//!
//! **Usage:**
//! ```
//! onto-validate --format <fmt> <input>
//! ```
//!
//! Prints one line per violation and exits non-zero if any were found.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use onto_clients::{init_logging, load};
use onto_interchange::{validate, Format};

/// Validate an ontology document.
#[derive(Parser)]
#[command(name = "onto-validate", about = "Check an ontology for structurally invalid IRIs")]
struct Args {
    /// Input format.
    #[arg(long)]
    format: Format,

    /// Input file, or `-` for stdin.
    input: PathBuf,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let ontology = load(&args.input, args.format)?;
    let errors = validate(&ontology);

    println!(
        "{} ({}): {} classes, {} properties, {} individuals",
        ontology.name,
        ontology.id,
        ontology.class_count(),
        ontology.property_count(),
        ontology.individual_count()
    );

    if errors.is_empty() {
        println!("Valid.");
        return Ok(());
    }

    for error in &errors {
        println!("[FAIL] {error}");
    }
    eprintln!("Validation FAILED: {} error(s).", errors.len());
    process::exit(1);
}
