//! Format selection and top-level dispatch.

use std::fmt;
use std::str::FromStr;

use crate::codec::{jsonld, rdfxml, turtle};
use crate::error::{InterchangeError, Result};
use crate::model::Ontology;

/// One of the supported interchange formats.
///
/// OWL/XML and plain RDF/XML share a single codec and a single variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// JSON-LD (`jsonld`, `json-ld`).
    JsonLd,
    /// Turtle (`turtle`, `ttl`).
    Turtle,
    /// RDF/XML or OWL/XML (`owlxml`, `rdfxml`, `owl`, `rdf`).
    RdfXml,
}

impl Format {
    /// Every supported format.
    pub const ALL: [Format; 3] = [Format::JsonLd, Format::Turtle, Format::RdfXml];

    /// Canonical tag, as accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Format::JsonLd => "jsonld",
            Format::Turtle => "turtle",
            Format::RdfXml => "rdfxml",
        }
    }

    /// Conventional file extension.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Format::JsonLd => "jsonld",
            Format::Turtle => "ttl",
            Format::RdfXml => "owl",
        }
    }
}

impl FromStr for Format {
    type Err = InterchangeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jsonld" | "json-ld" => Ok(Format::JsonLd),
            "turtle" | "ttl" => Ok(Format::Turtle),
            "owlxml" | "rdfxml" | "owl" | "rdf" => Ok(Format::RdfXml),
            _ => Err(InterchangeError::UnknownFormat(s.to_owned())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses `text` as `format`.
///
/// # Errors
///
/// Propagates the codec's error: invalid JSON or a non-object root for
/// JSON-LD, malformed XML for RDF/XML. Turtle never fails.
pub fn parse(format: Format, text: &str) -> Result<Ontology> {
    match format {
        Format::JsonLd => jsonld::parse(text),
        Format::Turtle => turtle::parse(text),
        Format::RdfXml => rdfxml::parse(text),
    }
}

/// Serializes `ontology` as `format`.
#[must_use]
pub fn serialize(format: Format, ontology: &Ontology) -> String {
    match format {
        Format::JsonLd => jsonld::serialize(ontology),
        Format::Turtle => turtle::serialize(ontology),
        Format::RdfXml => rdfxml::serialize(ontology),
    }
}
