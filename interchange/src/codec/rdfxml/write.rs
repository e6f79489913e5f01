//! RDF/XML serializer.

use std::borrow::Cow;

use quick_xml::escape::escape;

use crate::codec::turtle::characteristic_class;
use crate::iri::split_namespace;
use crate::model::{
    Annotation, AssertionValue, Individual, Ontology, OntologyClass, OntologyProperty,
    PropertyAssertion,
};
use crate::namespaces::{compact, is_standard_curie, STANDARD_PREFIXES};

const INDENT: &str = "    ";

/// Computes the document base IRI from an ontology id: ids ending in `#` or
/// `/` are used as-is, ids containing `#` are cut after the last `#`, and
/// anything else gets a `#` appended.
///
/// ```
/// use onto_interchange::codec::rdfxml::base_iri;
///
/// assert_eq!(base_iri("http://ex.org/onto/"), "http://ex.org/onto/");
/// assert_eq!(base_iri("http://ex.org/onto#v1"), "http://ex.org/onto#");
/// assert_eq!(base_iri("http://ex.org/onto"), "http://ex.org/onto#");
/// ```
#[must_use]
pub fn base_iri(id: &str) -> String {
    if id.ends_with('#') || id.ends_with('/') {
        id.to_owned()
    } else if let Some(cut) = id.rfind('#') {
        id[..=cut].to_owned()
    } else {
        format!("{id}#")
    }
}

/// Serializes an ontology to an RDF/XML document.
///
/// Every class, property and individual is written as its own top-level
/// element with an absolute `rdf:about`. Text content and attribute values
/// are XML-escaped.
#[must_use]
pub fn serialize(ontology: &Ontology) -> String {
    let mut out = String::with_capacity(8 * 1024);

    out.push_str("<?xml version=\"1.0\"?>\n");
    out.push_str("<rdf:RDF");
    for (prefix, namespace) in STANDARD_PREFIXES {
        out.push_str(&format!("\n{INDENT} xmlns:{prefix}=\"{namespace}\""));
    }
    out.push_str(&format!("\n{INDENT} xml:base=\"{}\">\n\n", escape(&base_iri(&ontology.id))));

    write_ontology_header(&mut out, ontology);
    for class in ontology.classes.values() {
        write_class(&mut out, class);
    }
    for prop in ontology.properties.values() {
        write_property(&mut out, prop);
    }
    for ind in ontology.individuals.values() {
        write_individual(&mut out, ind);
    }

    out.push_str("</rdf:RDF>\n");

    tracing::debug!(
        id = %ontology.id,
        classes = ontology.class_count(),
        properties = ontology.property_count(),
        individuals = ontology.individual_count(),
        bytes = out.len(),
        "serialized RDF/XML"
    );
    out
}

fn write_ontology_header(out: &mut String, ontology: &Ontology) {
    open(out, "owl:Ontology", &ontology.id);
    text_child(out, "rdfs:label", &ontology.name);
    if let Some(version) = &ontology.version {
        text_child(out, "owl:versionInfo", version);
    }
    resource_children(out, "owl:imports", &ontology.imports);
    for annotation in &ontology.annotations {
        annotation_child(out, annotation);
    }
    close(out, "owl:Ontology");
}

fn write_class(out: &mut String, class: &OntologyClass) {
    open(out, "owl:Class", &class.id);
    text_child(out, "rdfs:label", class.display_label());
    if let Some(comment) = &class.description {
        text_child(out, "rdfs:comment", comment);
    }
    resource_children(out, "rdfs:subClassOf", &class.super_classes);
    resource_children(out, "owl:disjointWith", &class.disjoint_with);
    resource_children(out, "owl:equivalentClass", &class.equivalent_to);
    for annotation in &class.annotations {
        annotation_child(out, annotation);
    }
    close(out, "owl:Class");
}

fn write_property(out: &mut String, prop: &OntologyProperty) {
    let tag = format!("owl:{}", prop.property_type.owl_term());
    open(out, &tag, &prop.id);
    text_child(out, "rdfs:label", prop.display_label());
    if let Some(comment) = &prop.description {
        text_child(out, "rdfs:comment", comment);
    }
    let characteristics: Vec<String> = prop
        .characteristics
        .iter()
        .filter_map(|tag| characteristic_class(tag))
        .map(str::to_owned)
        .collect();
    resource_children(out, "rdf:type", &characteristics);
    resource_children(out, "rdfs:domain", &prop.domain);
    resource_children(out, "rdfs:range", &prop.range);
    resource_children(out, "rdfs:subPropertyOf", &prop.super_properties);
    for annotation in &prop.annotations {
        annotation_child(out, annotation);
    }
    close(out, &tag);
}

fn write_individual(out: &mut String, ind: &Individual) {
    open(out, "owl:NamedIndividual", &ind.id);
    text_child(out, "rdfs:label", ind.display_label());
    resource_children(out, "rdf:type", &ind.types);
    resource_children(out, "owl:sameAs", &ind.same_as);
    resource_children(out, "owl:differentFrom", &ind.different_from);
    for assertion in &ind.property_assertions {
        assertion_child(out, assertion);
    }
    for annotation in &ind.annotations {
        annotation_child(out, annotation);
    }
    close(out, "owl:NamedIndividual");
}

fn open(out: &mut String, tag: &str, about: &str) {
    out.push_str(&format!("{INDENT}<{tag} rdf:about=\"{}\">\n", escape(about)));
}

fn close(out: &mut String, tag: &str) {
    out.push_str(&format!("{INDENT}</{tag}>\n\n"));
}

fn text_child(out: &mut String, tag: &str, text: &str) {
    out.push_str(&format!("{INDENT}{INDENT}<{tag}>{}</{tag}>\n", escape(text)));
}

fn resource_children(out: &mut String, tag: &str, targets: &[String]) {
    for target in targets {
        out.push_str(&format!(
            "{INDENT}{INDENT}<{tag} rdf:resource=\"{}\"/>\n",
            escape(&*absolute(target))
        ));
    }
}

fn annotation_child(out: &mut String, annotation: &Annotation) {
    let Some((tag, xmlns)) = element_name(&annotation.property) else {
        tracing::warn!(property = %annotation.property, "skipping annotation with no XML element name");
        return;
    };
    let lang = annotation
        .language
        .as_deref()
        .map(|lang| format!(" xml:lang=\"{}\"", escape(lang)))
        .unwrap_or_default();
    out.push_str(&format!(
        "{INDENT}{INDENT}<{tag}{xmlns}{lang}>{}</{tag}>\n",
        escape(&annotation.value)
    ));
}

fn assertion_child(out: &mut String, assertion: &PropertyAssertion) {
    let Some((tag, xmlns)) = element_name(&assertion.property) else {
        tracing::warn!(property = %assertion.property, "skipping assertion with no XML element name");
        return;
    };
    match &assertion.value {
        AssertionValue::Individual(target) => out.push_str(&format!(
            "{INDENT}{INDENT}<{tag}{xmlns} rdf:resource=\"{}\"/>\n",
            escape(&*absolute(target))
        )),
        AssertionValue::Literal { value, datatype } => {
            let datatype = datatype
                .as_deref()
                .map(|dt| format!(" rdf:datatype=\"{}\"", escape(&*absolute(dt))))
                .unwrap_or_default();
            out.push_str(&format!(
                "{INDENT}{INDENT}<{tag}{xmlns}{datatype}>{}</{tag}>\n",
                escape(value)
            ));
        }
    }
}

/// Expands standard prefixed names (`owl:Thing`) so `rdf:resource` always
/// carries a full IRI.
fn absolute(target: &str) -> Cow<'_, str> {
    if is_standard_curie(target) {
        if let Some(iri) = target
            .split_once(':')
            .and_then(|(prefix, local)| crate::namespaces::expand(prefix, local))
        {
            return Cow::Owned(iri);
        }
    }
    Cow::Borrowed(target)
}

/// XML element name for a predicate IRI, plus any namespace declaration it
/// needs. Standard vocabularies use their prefix; anything else is declared
/// on the element as `ns0`. Returns `None` when the IRI has no local part
/// that is a valid XML name.
fn element_name(iri: &str) -> Option<(String, String)> {
    if let Some(curie) = compact(iri).filter(|curie| curie.split_once(':').is_some_and(|(_, l)| is_xml_name(l))) {
        return Some((curie, String::new()));
    }
    let (namespace, local) = split_namespace(iri)?;
    is_xml_name(local).then(|| (format!("ns0:{local}"), format!(" xmlns:ns0=\"{}\"", escape(namespace))))
}

fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}
