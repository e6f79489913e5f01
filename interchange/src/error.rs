//! Error type shared by every codec.

use thiserror::Error;

/// Errors raised by `parse` routines and format selection.
///
/// Parsing is atomic: when one of these is returned no partial ontology
/// exists. Missing optional data is never an error.
#[derive(Debug, Error)]
pub enum InterchangeError {
    /// The input is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON document's top level is not an object.
    #[error("JSON-LD document must be a JSON object, found {found}")]
    NotAnObject {
        /// JSON type name of the top-level value.
        found: &'static str,
    },

    /// The input is not well-formed XML.
    #[error("malformed XML at byte {position}: {message}")]
    Xml {
        /// Byte offset reported by the XML reader.
        position: u64,
        /// The XML reader's diagnostic.
        message: String,
    },

    /// A format tag that names none of the supported formats.
    #[error("unknown format `{0}` (expected jsonld, turtle, owlxml, or rdfxml)")]
    UnknownFormat(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, InterchangeError>;
