//! Codecs between [`Ontology`](crate::Ontology) and its interchange formats.
//!
//! Each codec exposes a `parse(text) -> Result<Ontology>` and a
//! `serialize(&Ontology) -> String` pair:
//! - **JSON-LD** ([`jsonld`]): a `@context` plus a flat `@graph` of nodes
//! - **Turtle** ([`turtle`]): a line-oriented writer and a best-effort,
//!   never-failing line reader
//! - **RDF/XML** ([`rdfxml`]): also accepts OWL/XML documents; the reader
//!   tolerates missing prefixes and wrapper-less individuals

pub mod jsonld;
pub mod rdfxml;
pub mod turtle;
