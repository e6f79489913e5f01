//! End-to-end scenarios across the public API.

use onto_interchange::codec::{jsonld, rdfxml, turtle};
use onto_interchange::iri::resolve;
use onto_interchange::{
    parse, serialize, validate, Format, Individual, InterchangeError, Ontology, OntologyClass,
    OntologyProperty, PropertyType,
};
use serde_json::Value;

fn library() -> Ontology {
    let mut ontology = Ontology::new("http://ex.org/library", "Library");
    ontology.version = Some("0.3".to_owned());
    ontology.imports.push("http://ex.org/people".to_owned());

    let mut book = OntologyClass::new("http://ex.org/library#Book");
    book.label = Some("Book".to_owned());
    book.description = Some("A bound publication".to_owned());
    book.super_classes.push("http://ex.org/library#Work".to_owned());
    ontology.insert_class(book);

    let mut work = OntologyClass::new("http://ex.org/library#Work");
    work.label = Some("Work".to_owned());
    work.super_classes.push("owl:Thing".to_owned());
    ontology.insert_class(work);

    let mut author = OntologyProperty::new("http://ex.org/library#author", PropertyType::ObjectProperty);
    author.label = Some("author".to_owned());
    author.domain.push("http://ex.org/library#Book".to_owned());
    author.range.push("http://ex.org/people#Person".to_owned());
    ontology.insert_property(author);

    let mut pages = OntologyProperty::new("http://ex.org/library#pages", PropertyType::DataProperty);
    pages.label = Some("pages".to_owned());
    pages.range.push("xsd:integer".to_owned());
    pages.characteristics.push("functional".to_owned());
    ontology.insert_property(pages);

    let mut dune = Individual::new("http://ex.org/library#dune");
    dune.label = Some("dune".to_owned());
    dune.types.push("http://ex.org/library#Book".to_owned());
    ontology.insert_individual(dune);
    ontology
}

// =============================================================================
// JSON-LD
// =============================================================================

#[test]
fn jsonld_round_trip_keeps_classes_and_properties() {
    let original = library();
    let parsed = jsonld::parse(&jsonld::serialize(&original)).expect("parse");
    assert_eq!(parsed.classes, original.classes);
    assert_eq!(parsed.property_count(), 2);
    let author = parsed.find_property("http://ex.org/library#author").expect("author");
    assert_eq!(author, &original.properties["http://ex.org/library#author"]);
    // individuals are emitted but not read back
    assert_eq!(parsed.individual_count(), 0);
}

#[test]
fn jsonld_single_import_is_an_array() {
    let value: Value = serde_json::from_str(&jsonld::serialize(&library())).expect("json");
    let imports = value["owl:imports"].as_array().expect("array");
    assert_eq!(imports.len(), 1);
    assert_eq!(imports[0]["@id"], "http://ex.org/people");
}

#[test]
fn jsonld_graph_order_is_classes_properties_individuals() {
    let value = jsonld::to_json_ld(&library());
    let ids: Vec<&str> = value["@graph"]
        .as_array()
        .expect("graph")
        .iter()
        .filter_map(|node| node["@id"].as_str())
        .collect();
    assert_eq!(
        ids,
        [
            "http://ex.org/library#Book",
            "http://ex.org/library#Work",
            "http://ex.org/library#author",
            "http://ex.org/library#pages",
            "http://ex.org/library#dune",
        ]
    );
}

#[test]
fn jsonld_non_object_root_is_rejected() {
    assert!(matches!(jsonld::parse("[]"), Err(InterchangeError::NotAnObject { .. })));
    assert!(matches!(jsonld::parse("{"), Err(InterchangeError::Json(_))));
}

// =============================================================================
// Labels and IRIs
// =============================================================================

#[test]
fn label_falls_back_to_fragment() {
    let class = OntologyClass::new("http://ex.org/onto#Person");
    assert_eq!(class.label, None);
    assert_eq!(class.display_label(), "Person");

    let doc = r#"{"@graph": [{"@id": "http://ex.org/onto#Person", "@type": "owl:Class"}]}"#;
    let parsed = jsonld::parse(doc).expect("parse");
    let person = parsed.find_class("http://ex.org/onto#Person").expect("Person");
    assert_eq!(person.label.as_deref(), Some("Person"));
    assert_eq!(person.name, "Person");

    let doc = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
        xmlns:owl="http://www.w3.org/2002/07/owl#">
        <owl:Class rdf:about="http://ex.org/onto#Person"/>
        <owl:ObjectProperty rdf:about="http://ex.org/onto#knows"/>
    </rdf:RDF>"#;
    let parsed = rdfxml::parse(doc).expect("parse");
    let person = parsed.find_class("http://ex.org/onto#Person").expect("Person");
    assert_eq!(person.label.as_deref(), Some("Person"));
    let knows = parsed.find_property("http://ex.org/onto#knows").expect("knows");
    assert_eq!(knows.label.as_deref(), Some("knows"));
    assert_eq!(knows.name, "knows");
}

#[test]
fn iri_resolution() {
    assert_eq!(resolve("#Person", "http://ex.org/onto#"), "http://ex.org/onto#Person");
    assert_eq!(resolve("http://ex.org/X", "http://ex.org/onto#"), "http://ex.org/X");
    assert_eq!(resolve("", "http://ex.org/onto#"), "");
    assert_eq!(resolve("Thing", "http://ex.org/onto/"), "http://ex.org/onto/Thing");
}

// =============================================================================
// Validator
// =============================================================================

#[test]
fn validator_accepts_well_formed_ontology() {
    assert_eq!(validate(&library()), Vec::<String>::new());
}

#[test]
fn validator_names_bad_ontology_iri() {
    let mut ontology = library();
    ontology.id = "urn:library".to_owned();
    let errors = validate(&ontology);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("urn:library"));
}

// =============================================================================
// Turtle
// =============================================================================

#[test]
fn turtle_minimal_subset() {
    let parsed = turtle::parse("<http://ex.org#Cat> a owl:Class ;\n  rdfs:label \"Cat\" .").expect("parse");
    assert_eq!(parsed.class_count(), 1);
    let cat = parsed.find_class("http://ex.org#Cat").expect("Cat");
    assert_eq!(cat.id, "http://ex.org#Cat");
    assert_eq!(cat.label.as_deref(), Some("Cat"));
    assert_eq!(parsed.id, "imported ontology");
    assert_eq!(parsed.name, "imported ontology");
}

#[test]
fn turtle_recovers_entities_and_header() {
    let parsed = turtle::parse(&turtle::serialize(&library())).expect("parse");
    assert_eq!(parsed.id, "http://ex.org/library");
    assert_eq!(parsed.name, "Library");
    assert_eq!(parsed.version.as_deref(), Some("0.3"));
    assert_eq!(parsed.imports, ["http://ex.org/people"]);
    assert_eq!(parsed.class_count(), 2);
    assert_eq!(parsed.property_count(), 2);
    assert_eq!(
        parsed.find_property("http://ex.org/library#pages").map(|p| p.property_type),
        Some(PropertyType::DataProperty)
    );
    // relationships are written but not read back
    assert!(parsed.classes.values().all(|c| c.super_classes.is_empty()));
}

// =============================================================================
// RDF/XML
// =============================================================================

#[test]
fn rdfxml_unprefixed_class_matches_prefixed() {
    let bare = rdfxml::parse(r#"<RDF><Class about="http://ex.org#A"/></RDF>"#).expect("parse");
    let prefixed = rdfxml::parse(
        r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
                    xmlns:owl="http://www.w3.org/2002/07/owl#">
             <owl:Class rdf:about="http://ex.org#A"/>
           </rdf:RDF>"#,
    )
    .expect("parse");
    assert_eq!(bare.classes, prefixed.classes);
    let a = bare.find_class("http://ex.org#A").expect("A");
    assert_eq!(a.display_label(), "A");
}

#[test]
fn rdfxml_individual_without_wrapper() {
    let doc = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
        <http://ex.org#Fluffy rdf:about="http://ex.org#fluffy1"/>
    </rdf:RDF>"#;
    let parsed = rdfxml::parse(doc).expect("parse");
    let fluffy = parsed.find_individual("http://ex.org#fluffy1").expect("fluffy1");
    assert_eq!(fluffy.id, "http://ex.org#fluffy1");
    assert_eq!(fluffy.types, ["http://ex.org#Fluffy"]);
}

#[test]
fn rdfxml_relative_iris_resolve_against_xml_base() {
    let doc = r##"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
                         xmlns:owl="http://www.w3.org/2002/07/owl#"
                         xml:base="http://ex.org/onto#">
        <owl:NamedIndividual rdf:about="#alice">
            <rdf:type rdf:resource="#Person"/>
            <owl:sameAs rdf:resource="http://other.org/alice"/>
        </owl:NamedIndividual>
    </rdf:RDF>"##;
    let parsed = rdfxml::parse(doc).expect("parse");
    assert_eq!(parsed.id, "http://ex.org/onto#");
    let alice = parsed.find_individual("http://ex.org/onto#alice").expect("alice");
    assert_eq!(alice.types, ["http://ex.org/onto#Person"]);
    assert_eq!(alice.same_as, ["http://other.org/alice"]);
}

#[test]
fn rdfxml_round_trip_keeps_individuals() {
    let original = library();
    let parsed = rdfxml::parse(&rdfxml::serialize(&original)).expect("parse");
    assert_eq!(parsed.individuals, original.individuals);
    let pages = parsed.find_property("http://ex.org/library#pages").expect("pages");
    assert_eq!(pages.characteristics, ["functional"]);
    assert_eq!(pages.range, ["http://www.w3.org/2001/XMLSchema#integer"]);
}

#[test]
fn rdfxml_malformed_document_fails() {
    let err = rdfxml::parse("<rdf:RDF><owl:Class></rdf:RDF>").expect_err("must fail");
    assert!(matches!(err, InterchangeError::Xml { .. }));
}

// =============================================================================
// Dispatch
// =============================================================================

#[test]
fn convert_between_every_pair_of_formats() {
    let original = library();
    for from in Format::ALL {
        let text = serialize(from, &original);
        let parsed = parse(from, &text).expect("parse");
        for to in Format::ALL {
            let converted = serialize(to, &parsed);
            let again = parse(to, &converted).expect("re-parse");
            assert!(
                again.find_class("http://ex.org/library#Book").is_some(),
                "{from} -> {to} lost Book"
            );
        }
    }
}
