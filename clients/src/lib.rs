//! Shared helpers for the `onto-*` client binaries.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use onto_interchange::{Format, Ontology};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs a stderr `tracing` subscriber filtered by `RUST_LOG`
/// (default `warn`). Stdout stays free for serialized output.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Reads the whole input; `-` means stdin.
///
/// # Errors
///
/// Returns an error if the file or stdin cannot be read as UTF-8.
pub fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        return Ok(text);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Reads and parses an ontology document.
///
/// # Errors
///
/// Returns an error if the input cannot be read or does not parse as `format`.
pub fn load(path: &Path, format: Format) -> Result<Ontology> {
    let text = read_input(path)?;
    let ontology = onto_interchange::parse(format, &text)
        .with_context(|| format!("Failed to parse {} as {format}", path.display()))?;
    tracing::info!(
        input = %path.display(),
        %format,
        classes = ontology.class_count(),
        properties = ontology.property_count(),
        individuals = ontology.individual_count(),
        "loaded ontology"
    );
    Ok(ontology)
}
