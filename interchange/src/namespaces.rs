//! The fixed namespace prefix table shared by every codec.
//!
//! All three formats declare exactly these four prefixes. Codecs look them up
//! here instead of spelling the IRIs out, so adding a prefix changes every
//! format at once.

/// OWL namespace.
pub const OWL: &str = "http://www.w3.org/2002/07/owl#";
/// RDF namespace.
pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
/// RDFS namespace.
pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
/// XSD namespace.
pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
/// The XML namespace, implicitly bound to the `xml` prefix.
pub const XML: &str = "http://www.w3.org/XML/1998/namespace";

/// Ontology IRI used when a document names none and has no base IRI.
pub const FALLBACK_ONTOLOGY_IRI: &str = "http://example.org/ontology";

/// `(prefix, namespace IRI)` pairs declared by every serializer.
pub const STANDARD_PREFIXES: &[(&str, &str)] = &[
    ("owl", OWL),
    ("rdf", RDF),
    ("rdfs", RDFS),
    ("xsd", XSD),
];

/// Returns the standard prefix bound to `namespace`, if any.
#[must_use]
pub fn prefix_for(namespace: &str) -> Option<&'static str> {
    STANDARD_PREFIXES
        .iter()
        .find(|(_, iri)| *iri == namespace)
        .map(|(prefix, _)| *prefix)
}

/// Returns the namespace IRI bound to a standard `prefix`, if any.
#[must_use]
pub fn namespace_for(prefix: &str) -> Option<&'static str> {
    STANDARD_PREFIXES
        .iter()
        .find(|(p, _)| *p == prefix)
        .map(|(_, iri)| *iri)
}

/// Returns true if `term` is a prefixed name using one of the standard
/// prefixes (e.g. `owl:Thing`, `xsd:string`).
#[must_use]
pub fn is_standard_curie(term: &str) -> bool {
    term.split_once(':')
        .is_some_and(|(prefix, local)| namespace_for(prefix).is_some() && !local.starts_with("//"))
}

/// Expands `prefix:local` to a full IRI. Returns `None` for unknown prefixes.
#[must_use]
pub fn expand(prefix: &str, local: &str) -> Option<String> {
    namespace_for(prefix).map(|ns| format!("{ns}{local}"))
}

/// Compacts a full IRI to `prefix:local` when it falls under a standard
/// namespace.
#[must_use]
pub fn compact(iri: &str) -> Option<String> {
    STANDARD_PREFIXES.iter().find_map(|(prefix, ns)| {
        iri.strip_prefix(ns)
            .filter(|local| !local.is_empty())
            .map(|local| format!("{prefix}:{local}"))
    })
}
