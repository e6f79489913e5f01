//! RDF/XML (OWL/XML) codec.
//!
//! The reader is defensive: documents in the wild spell `owl:Class` as
//! `Class`, `rdf:about` as `about`, forget to declare prefixes, and declare
//! individuals either with `owl:NamedIndividual` or with their class as the
//! element name. Every lookup is therefore an ordered list of fallbacks that
//! ends in a default, and all of that variation is handled by two helpers:
//! `attribute` for attributes and `XmlElement::is` for element names.
//!
//! Plain RDF/XML is read by the same code; the two formats are treated as one.

mod dom;
mod write;

pub use write::{base_iri, serialize};

use dom::XmlElement;

use crate::codec::turtle::characteristic_tag;
use crate::error::Result;
use crate::iri::{label_or_local_name, local_name, resolve};
use crate::model::{
    Annotation, AssertionValue, Individual, Ontology, OntologyClass, OntologyProperty,
    PropertyAssertion, PropertyType,
};
use crate::namespaces::{FALLBACK_ONTOLOGY_IRI, OWL, RDF, RDFS, XML};

/// Element names that declare properties, with the property type each maps to.
const PROPERTY_ELEMENTS: &[(&str, PropertyType)] = &[
    ("ObjectProperty", PropertyType::ObjectProperty),
    ("DatatypeProperty", PropertyType::DataProperty),
    ("AnnotationProperty", PropertyType::AnnotationProperty),
];

/// Tag-name fragments that mark an element as an ontology construct rather
/// than an implicitly typed individual. An element whose local name contains
/// any of these is only treated as an individual if it has `rdf:type`
/// children. Extend this list to exclude further constructs.
pub const RESERVED_CONSTRUCT_MARKERS: &[&str] = &["Ontology", "Class", "Property", "RDF"];

/// Attribute prefixes tried, in order, before the unprefixed spelling.
const ATTRIBUTE_PREFIXES: &[&str] = &["rdf", "owl"];

/// Looks up an attribute defensively: `rdf:name`, then `owl:name`, then the
/// bare `name`, then `name` under `namespace` whatever its prefix. The first
/// non-empty value wins.
fn attribute<'a>(element: &'a XmlElement, name: &str, namespace: Option<&str>) -> Option<&'a str> {
    ATTRIBUTE_PREFIXES
        .iter()
        .map(|prefix| element.raw_attribute(&format!("{prefix}:{name}")))
        .chain(std::iter::once(element.raw_attribute(name)))
        .chain(std::iter::once(namespace.and_then(|ns| element.ns_attribute(ns, name))))
        .flatten()
        .find(|value| !value.is_empty())
}

fn about(element: &XmlElement) -> Option<&str> {
    attribute(element, "about", Some(RDF))
}

fn resource(element: &XmlElement) -> Option<&str> {
    attribute(element, "resource", Some(RDF))
}

/// Reads `xml:base` from the root: the literal attribute first, then any
/// attribute named `base` in the XML namespace. Defaults to empty.
fn xml_base(root: &XmlElement) -> String {
    root.raw_attribute("xml:base")
        .or_else(|| root.ns_attribute(XML, "base"))
        .unwrap_or_default()
        .to_owned()
}

/// Child text under `namespace:local`, trimmed; `None` if absent or blank.
fn child_text<'a>(element: &'a XmlElement, namespace: &'a str, local: &'a str) -> Option<&'a str> {
    element.children_named(namespace, local).find_map(XmlElement::trimmed_text)
}

/// Resolved `resource` references of every `namespace:local` child.
fn child_resources(element: &XmlElement, namespace: &str, local: &str, base: &str) -> Vec<String> {
    element
        .children_named(namespace, local)
        .filter_map(resource)
        .map(|iri| resolve(iri, base))
        .collect()
}

/// Parses an RDF/XML or OWL/XML document.
///
/// # Errors
///
/// Returns [`crate::InterchangeError::Xml`] with the XML reader's diagnostic
/// if the document is not well-formed. Every other irregularity degrades to
/// a fallback value or a skipped element.
pub fn parse(text: &str) -> Result<Ontology> {
    let root = dom::parse_document(text)?;
    let base = xml_base(&root);

    let mut ontology = ontology_envelope(&root, &base);
    read_classes(&root, &base, &mut ontology);
    read_properties(&root, &base, &mut ontology);
    read_named_individuals(&root, &base, &mut ontology);
    read_implicit_individuals(&root, &base, &mut ontology);

    tracing::debug!(
        base = %base,
        classes = ontology.class_count(),
        properties = ontology.property_count(),
        individuals = ontology.individual_count(),
        "parsed RDF/XML"
    );
    Ok(ontology)
}

fn ontology_envelope(root: &XmlElement, base: &str) -> Ontology {
    let header = root.find_all(OWL, "Ontology").into_iter().next();
    let id = header
        .and_then(about)
        .map(|iri| resolve(iri, base))
        .or_else(|| (!base.is_empty()).then(|| base.to_owned()))
        .unwrap_or_else(|| FALLBACK_ONTOLOGY_IRI.to_owned());
    let name = header
        .and_then(|h| child_text(h, RDFS, "label"))
        .map_or_else(|| local_name(&id).to_owned(), str::to_owned);

    let mut ontology = Ontology::new(id, name);
    if let Some(header) = header {
        ontology.version = child_text(header, OWL, "versionInfo").map(str::to_owned);
        ontology.imports = child_resources(header, OWL, "imports", base);
        ontology.annotations = header
            .children
            .iter()
            .filter(|c| !c.is(RDFS, "label") && !c.is(OWL, "versionInfo") && !c.is(OWL, "imports"))
            .filter_map(annotation_of)
            .collect();
    }
    ontology
}

/// A text-only child as an annotation; `None` for children with structure or
/// no text.
fn annotation_of(child: &XmlElement) -> Option<Annotation> {
    if !child.children.is_empty() || resource(child).is_some() {
        return None;
    }
    Some(Annotation {
        property: child.iri(),
        value: child.trimmed_text()?.to_owned(),
        language: child.language().map(str::to_owned),
    })
}

/// Label and name for an entity: the `rdfs:label` child, else the IRI's local name.
fn label_and_name(element: &XmlElement, id: &str) -> (Option<String>, String) {
    let label = label_or_local_name(child_text(element, RDFS, "label"), id);
    (Some(label.clone()), label)
}

fn entity_id(element: &XmlElement, base: &str) -> Option<String> {
    match about(element) {
        Some(iri) => Some(resolve(iri, base)),
        None => {
            tracing::warn!(element = %element.name, "skipping element without rdf:about");
            None
        }
    }
}

fn read_classes(root: &XmlElement, base: &str, ontology: &mut Ontology) {
    const KNOWN: &[(&str, &str)] = &[
        (RDFS, "label"),
        (RDFS, "comment"),
        (RDFS, "subClassOf"),
        (OWL, "disjointWith"),
        (OWL, "equivalentClass"),
    ];
    for element in root.find_all(OWL, "Class") {
        let Some(id) = entity_id(element, base) else {
            continue;
        };
        if ontology.classes.contains_key(&id) {
            continue;
        }
        let mut class = OntologyClass::new(id);
        (class.label, class.name) = label_and_name(element, &class.id);
        class.description = child_text(element, RDFS, "comment").map(str::to_owned);
        class.super_classes = child_resources(element, RDFS, "subClassOf", base);
        class.disjoint_with = child_resources(element, OWL, "disjointWith", base);
        class.equivalent_to = child_resources(element, OWL, "equivalentClass", base);
        class.annotations = other_annotations(element, KNOWN);
        ontology.insert_class(class);
    }
}

fn read_properties(root: &XmlElement, base: &str, ontology: &mut Ontology) {
    const KNOWN: &[(&str, &str)] = &[
        (RDFS, "label"),
        (RDFS, "comment"),
        (RDFS, "domain"),
        (RDFS, "range"),
        (RDFS, "subPropertyOf"),
        (RDF, "type"),
    ];
    for (tag, property_type) in PROPERTY_ELEMENTS {
        for element in root.find_all(OWL, tag) {
            let Some(id) = entity_id(element, base) else {
                continue;
            };
            if ontology.properties.contains_key(&id) {
                continue;
            }
            let mut prop = OntologyProperty::new(id, *property_type);
            (prop.label, prop.name) = label_and_name(element, &prop.id);
            prop.description = child_text(element, RDFS, "comment").map(str::to_owned);
            prop.domain = child_resources(element, RDFS, "domain", base);
            prop.range = child_resources(element, RDFS, "range", base);
            prop.super_properties = child_resources(element, RDFS, "subPropertyOf", base);
            prop.characteristics = child_resources(element, RDF, "type", base)
                .iter()
                .filter_map(|iri| characteristic_tag(local_name(iri)))
                .map(str::to_owned)
                .collect();
            prop.annotations = other_annotations(element, KNOWN);
            ontology.insert_property(prop);
        }
    }

    // Standalone `<owl:FunctionalProperty rdf:about="..."/>` declarations.
    for element in root.descendants() {
        let Some(tag) = characteristic_tag(&element.local) else {
            continue;
        };
        if !element.is(OWL, &element.local) {
            continue;
        }
        let Some(prop) = about(element).and_then(|iri| ontology.properties.get_mut(&resolve(iri, base))) else {
            continue;
        };
        if !prop.characteristics.iter().any(|c| c == tag) {
            prop.characteristics.push(tag.to_owned());
        }
    }
}

fn other_annotations(element: &XmlElement, known: &[(&str, &str)]) -> Vec<Annotation> {
    element
        .children
        .iter()
        .filter(|c| !known.iter().any(|(ns, local)| c.is(ns, local)))
        .filter_map(annotation_of)
        .collect()
}

/// First pass: explicit `owl:NamedIndividual` elements.
fn read_named_individuals(root: &XmlElement, base: &str, ontology: &mut Ontology) {
    for element in root.find_all(OWL, "NamedIndividual") {
        let Some(id) = entity_id(element, base) else {
            continue;
        };
        if ontology.individuals.contains_key(&id) {
            continue;
        }
        ontology.insert_individual(individual_from(element, id, base, None));
    }
}

/// Second pass: any other element with an `about` that nothing has claimed.
/// It becomes an individual when it has `rdf:type` children or its tag does
/// not look like an ontology construct. Elements claimed by the first pass
/// are left alone.
fn read_implicit_individuals(root: &XmlElement, base: &str, ontology: &mut Ontology) {
    for element in root.descendants().into_iter().skip(1) {
        let Some(raw) = about(element) else {
            continue;
        };
        let id = resolve(raw, base);
        if ontology.contains_entity(&id) || ontology.contains_entity(raw) || id == ontology.id {
            continue;
        }
        let reserved = is_reserved_construct(&element.local);
        let typed = element.child_named(RDF, "type").is_some();
        if reserved && !typed {
            tracing::trace!(element = %element.name, id = %id, "not an individual: reserved tag");
            continue;
        }
        let implicit_type = (!reserved && !element.is(RDF, "Description"))
            .then(|| resolve(&element.iri(), base));
        tracing::trace!(element = %element.name, id = %id, "implicitly typed individual");
        ontology.insert_individual(individual_from(element, id, base, implicit_type));
    }
}

/// Returns true if `tag` names an ontology construct per
/// [`RESERVED_CONSTRUCT_MARKERS`].
#[must_use]
pub fn is_reserved_construct(tag: &str) -> bool {
    RESERVED_CONSTRUCT_MARKERS.iter().any(|marker| tag.contains(marker))
}

fn individual_from(element: &XmlElement, id: String, base: &str, implicit_type: Option<String>) -> Individual {
    let mut ind = Individual::new(id);
    (ind.label, ind.name) = label_and_name(element, &ind.id);
    ind.types = implicit_type.into_iter().collect();
    for iri in child_resources(element, RDF, "type", base) {
        if !ind.types.contains(&iri) {
            ind.types.push(iri);
        }
    }
    ind.same_as = child_resources(element, OWL, "sameAs", base);
    ind.different_from = child_resources(element, OWL, "differentFrom", base);

    for child in &element.children {
        if child.is(RDF, "type")
            || child.is(RDFS, "label")
            || child.is(OWL, "sameAs")
            || child.is(OWL, "differentFrom")
        {
            continue;
        }
        if is_standard_vocabulary(child) {
            ind.annotations.extend(annotation_of(child));
        } else if let Some(assertion) = assertion_of(child, base) {
            ind.property_assertions.push(assertion);
        }
    }
    ind
}

/// True for children whose name falls under the RDFS or OWL vocabularies
/// (e.g. `rdfs:comment`, `rdfs:seeAlso`); those are annotations rather than
/// property assertions.
fn is_standard_vocabulary(child: &XmlElement) -> bool {
    let iri = child.iri();
    iri.starts_with(RDFS) || iri.starts_with(OWL)
}

fn assertion_of(child: &XmlElement, base: &str) -> Option<PropertyAssertion> {
    let property = resolve(&child.iri(), base);
    let value = if let Some(target) = resource(child) {
        AssertionValue::Individual(resolve(target, base))
    } else if let Some(target) = child.children.iter().find_map(about) {
        AssertionValue::Individual(resolve(target, base))
    } else {
        AssertionValue::Literal {
            value: child.trimmed_text()?.to_owned(),
            datatype: attribute(child, "datatype", Some(RDF)).map(|dt| resolve(dt, base)),
        }
    };
    Some(PropertyAssertion { property, value })
}
