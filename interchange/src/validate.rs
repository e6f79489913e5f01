//! Structural validation.
//!
//! Checks are syntactic only: an IRI is accepted when it begins with `http`,
//! and a handful of standard prefixed names are accepted as shorthand without
//! being resolved. No reasoning or reference checking takes place.

use crate::model::Ontology;

const SUPER_CLASS_PREFIXES: &[&str] = &["http", "owl:", "rdfs:"];
const DOMAIN_RANGE_PREFIXES: &[&str] = &["http", "owl:", "rdfs:", "xsd:"];
const TYPE_PREFIXES: &[&str] = &["http", "owl:", "rdfs:"];

fn is_iri(value: &str) -> bool {
    value.starts_with("http")
}

fn starts_with_any(value: &str, prefixes: &[&str]) -> bool {
    prefixes.iter().any(|prefix| value.starts_with(prefix))
}

/// Validates `ontology`, returning one message per violation.
///
/// An empty vector means the ontology is structurally valid. Every check
/// runs regardless of earlier failures, and repeated violations are all
/// reported.
///
/// ```
/// use onto_interchange::{validate, Ontology};
///
/// assert!(validate(&Ontology::new("http://ex.org/o", "O")).is_empty());
/// assert_eq!(validate(&Ontology::new("urn:o", "O")).len(), 1);
/// ```
#[must_use]
pub fn validate(ontology: &Ontology) -> Vec<String> {
    let mut errors = Vec::new();

    if !is_iri(&ontology.id) {
        errors.push(format!("Ontology ID must be a valid IRI: {}", ontology.id));
    }

    for class in ontology.classes.values() {
        if !is_iri(&class.id) {
            errors.push(format!("Class ID must be a valid IRI: {}", class.id));
        }
        for parent in &class.super_classes {
            if !starts_with_any(parent, SUPER_CLASS_PREFIXES) {
                errors.push(format!("Class {} has invalid superclass: {parent}", class.id));
            }
        }
    }

    for prop in ontology.properties.values() {
        if !is_iri(&prop.id) {
            errors.push(format!("Property ID must be a valid IRI: {}", prop.id));
        }
        for domain in &prop.domain {
            if !starts_with_any(domain, DOMAIN_RANGE_PREFIXES) {
                errors.push(format!("Property {} has invalid domain: {domain}", prop.id));
            }
        }
        for range in &prop.range {
            if !starts_with_any(range, DOMAIN_RANGE_PREFIXES) {
                errors.push(format!("Property {} has invalid range: {range}", prop.id));
            }
        }
    }

    for ind in ontology.individuals.values() {
        if !is_iri(&ind.id) {
            errors.push(format!("Individual ID must be a valid IRI: {}", ind.id));
        }
        for ty in &ind.types {
            if !starts_with_any(ty, TYPE_PREFIXES) {
                errors.push(format!("Individual {} has invalid type: {ty}", ind.id));
            }
        }
    }

    for import in &ontology.imports {
        if !is_iri(import) {
            errors.push(format!("Import must be a valid IRI: {import}"));
        }
    }

    tracing::debug!(id = %ontology.id, errors = errors.len(), "validated ontology");
    errors
}
