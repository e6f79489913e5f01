//! Ontology interchange engine.
//!
//! The `onto-interchange` crate converts an in-memory OWL ontology
//! ([`Ontology`]) to and from three interchange formats (JSON-LD, Turtle,
//! and RDF/XML / OWL/XML) and checks it with a structural validator.
//!
//! Every entry point is a pure function of its input: there is no shared
//! state between calls, no I/O, and no configuration.
//!
//! # Entry Point
//!
//! ```
//! use onto_interchange::{parse, serialize, validate, Format, OntologyClass, Ontology};
//!
//! let mut ontology = Ontology::new("http://ex.org/pets", "Pets");
//! ontology.insert_class(OntologyClass::new("http://ex.org/pets#Cat"));
//! assert!(validate(&ontology).is_empty());
//!
//! let turtle = serialize(Format::Turtle, &ontology);
//! let back = parse(Format::Turtle, &turtle).unwrap();
//! assert!(back.find_class("http://ex.org/pets#Cat").is_some());
//! ```
//!
//! # Formats
//!
//! ```
//! let ontology = onto_interchange::Ontology::new("http://ex.org/o", "O");
//! let json_ld = onto_interchange::codec::jsonld::serialize(&ontology);
//! let turtle = onto_interchange::codec::turtle::serialize(&ontology);
//! let rdf_xml = onto_interchange::codec::rdfxml::serialize(&ontology);
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod codec;
pub mod error;
pub mod format;
pub mod iri;
pub mod model;
pub mod namespaces;
pub mod validate;

pub use error::{InterchangeError, Result};
pub use format::{parse, serialize, Format};
pub use model::{
    Annotation, AssertionValue, Individual, Ontology, OntologyClass, OntologyProperty,
    PropertyAssertion, PropertyType,
};
pub use validate::validate;
