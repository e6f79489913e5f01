//! Property-based round-trip tests.
//!
//! Generated ontologies give every class and property an explicit label equal
//! to its name, which is the shape a parse produces; under that condition
//! classes and properties survive a JSON-LD or RDF/XML round trip unchanged.

use onto_interchange::codec::{jsonld, rdfxml};
use onto_interchange::{Ontology, OntologyClass, OntologyProperty, PropertyType};
use proptest::prelude::*;

const BASE: &str = "http://ex.org/generated#";

const CHARACTERISTICS: &[&str] = &[
    "functional",
    "inverseFunctional",
    "transitive",
    "symmetric",
    "asymmetric",
    "reflexive",
    "irreflexive",
];

fn text() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9&<>'\" ]{0,10}[A-Za-z0-9]"
}

fn property_type() -> impl Strategy<Value = PropertyType> {
    prop_oneof![
        Just(PropertyType::ObjectProperty),
        Just(PropertyType::DataProperty),
        Just(PropertyType::AnnotationProperty),
    ]
}

/// References into the generated entity set plus one standard name.
fn targets(count: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(0..count + 1, 0..3).prop_map(move |picks| {
        picks
            .into_iter()
            .map(|i| if i == count { "http://www.w3.org/2002/07/owl#Thing".to_owned() } else { format!("{BASE}C{i}") })
            .collect()
    })
}

type ClassSpec = (String, Option<String>, Vec<String>, Vec<String>);
type PropertySpec = (String, PropertyType, Vec<String>, Vec<String>, Vec<usize>);

fn class_specs(count: usize) -> impl Strategy<Value = Vec<ClassSpec>> {
    prop::collection::vec(
        (text(), prop::option::of(text()), targets(count), targets(count)),
        count,
    )
}

fn property_specs(classes: usize) -> impl Strategy<Value = Vec<PropertySpec>> {
    prop::collection::vec(
        (
            text(),
            property_type(),
            targets(classes),
            targets(classes),
            prop::collection::vec(0..CHARACTERISTICS.len(), 0..3),
        ),
        0..5,
    )
}

fn ontology() -> impl Strategy<Value = Ontology> {
    (1usize..6)
        .prop_flat_map(|count| {
            (
                text(),
                prop::option::of("[0-9]\\.[0-9]"),
                class_specs(count),
                property_specs(count),
            )
        })
        .prop_map(|(name, version, classes, properties)| {
            let mut ontology = Ontology::new("http://ex.org/generated", name);
            ontology.version = version;
            ontology.imports.push("http://ex.org/base".to_owned());
            for (i, (label, description, supers, disjoint)) in classes.into_iter().enumerate() {
                let mut class = OntologyClass::new(format!("{BASE}C{i}"));
                class.name.clone_from(&label);
                class.label = Some(label);
                class.description = description;
                class.super_classes = supers;
                class.disjoint_with = disjoint;
                ontology.insert_class(class);
            }
            for (i, (label, property_type, domain, range, picks)) in properties.into_iter().enumerate() {
                let mut prop = OntologyProperty::new(format!("{BASE}p{i}"), property_type);
                prop.name.clone_from(&label);
                prop.label = Some(label);
                prop.domain = domain;
                prop.range = range;
                for pick in picks {
                    let tag = CHARACTERISTICS[pick].to_owned();
                    if !prop.characteristics.contains(&tag) {
                        prop.characteristics.push(tag);
                    }
                }
                ontology.insert_property(prop);
            }
            ontology
        })
}

/// JSON-LD does not carry characteristics.
fn without_characteristics(ontology: &Ontology) -> Vec<OntologyProperty> {
    ontology
        .properties
        .values()
        .cloned()
        .map(|mut p| {
            p.characteristics.clear();
            p
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// parse(serialize(o)) preserves classes and properties through JSON-LD.
    #[test]
    fn prop_jsonld_round_trip(original in ontology()) {
        let parsed = jsonld::parse(&jsonld::serialize(&original)).expect("parse");
        prop_assert_eq!(&parsed.id, &original.id);
        prop_assert_eq!(&parsed.name, &original.name);
        prop_assert_eq!(&parsed.version, &original.version);
        prop_assert_eq!(&parsed.imports, &original.imports);
        prop_assert_eq!(&parsed.classes, &original.classes);
        prop_assert_eq!(without_characteristics(&parsed), without_characteristics(&original));
    }

    /// Insertion order of the entity maps survives JSON-LD.
    #[test]
    fn prop_jsonld_preserves_order(original in ontology()) {
        let parsed = jsonld::parse(&jsonld::serialize(&original)).expect("parse");
        let before: Vec<&String> = original.classes.keys().chain(original.properties.keys()).collect();
        let after: Vec<&String> = parsed.classes.keys().chain(parsed.properties.keys()).collect();
        prop_assert_eq!(before, after);
    }

    /// parse(serialize(o)) preserves classes and properties, characteristics
    /// included, through RDF/XML.
    #[test]
    fn prop_rdfxml_round_trip(original in ontology()) {
        let parsed = rdfxml::parse(&rdfxml::serialize(&original)).expect("parse");
        prop_assert_eq!(&parsed.id, &original.id);
        prop_assert_eq!(&parsed.name, &original.name);
        prop_assert_eq!(&parsed.version, &original.version);
        prop_assert_eq!(&parsed.imports, &original.imports);
        prop_assert_eq!(&parsed.classes, &original.classes);
        prop_assert_eq!(&parsed.properties, &original.properties);
        prop_assert_eq!(parsed.individual_count(), 0);
    }
}
