//! Core ontology model types.
//!
//! These types are the canonical in-memory representation that every codec
//! reads and writes. All values are owned; a parsed [`Ontology`] exclusively
//! owns its classes, properties, and individuals. The three entity maps keep
//! insertion order so serializers emit entities in declaration order.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::iri::local_name;

/// Whether a property is an object, data, or annotation property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PropertyType {
    /// `owl:ObjectProperty`: relates two individuals.
    ObjectProperty,
    /// `owl:DatatypeProperty`: relates an individual to a literal.
    DataProperty,
    /// `owl:AnnotationProperty`: documentation only; not used for reasoning.
    AnnotationProperty,
}

impl PropertyType {
    /// Returns the local name of the OWL class for this property type
    /// (e.g. `"DatatypeProperty"` for [`PropertyType::DataProperty`]).
    #[must_use]
    pub fn owl_term(self) -> &'static str {
        match self {
            PropertyType::ObjectProperty => "ObjectProperty",
            PropertyType::DataProperty => "DatatypeProperty",
            PropertyType::AnnotationProperty => "AnnotationProperty",
        }
    }

    /// Classifies a type name by substring: anything mentioning `Object` is an
    /// object property, `Data` a data property, everything else an annotation
    /// property.
    #[must_use]
    pub fn from_type_name(name: &str) -> Self {
        if name.contains("Object") {
            PropertyType::ObjectProperty
        } else if name.contains("Data") {
            PropertyType::DataProperty
        } else {
            PropertyType::AnnotationProperty
        }
    }
}

/// An annotation (`property value [@lang]`) attached to an ontology or entity.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Annotation {
    /// Full IRI (or prefixed name) of the annotation property.
    pub property: String,
    /// Literal value.
    pub value: String,
    /// Optional language tag (`xml:lang`).
    pub language: Option<String>,
}

/// The object of a property assertion on an individual.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AssertionValue {
    /// Another individual, by IRI.
    Individual(String),
    /// A literal with an optional datatype IRI.
    Literal {
        /// Lexical form.
        value: String,
        /// Datatype IRI, if declared.
        datatype: Option<String>,
    },
}

/// A property assertion (`individual property value`).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PropertyAssertion {
    /// Full IRI of the asserted property.
    pub property: String,
    /// Asserted value.
    pub value: AssertionValue,
}

/// An OWL class.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OntologyClass {
    /// Full IRI.
    pub id: String,
    /// Fallback display string.
    pub name: String,
    /// Explicit `rdfs:label`, if any.
    pub label: Option<String>,
    /// `rdfs:comment`, if any.
    pub description: Option<String>,
    /// Parent classes (`rdfs:subClassOf`) in declaration order.
    pub super_classes: Vec<String>,
    /// `owl:disjointWith` targets.
    pub disjoint_with: Vec<String>,
    /// `owl:equivalentClass` targets.
    pub equivalent_to: Vec<String>,
    /// IRIs of properties attached to this class by the editor.
    pub properties: Vec<String>,
    /// Entity-level annotations.
    pub annotations: Vec<Annotation>,
}

impl OntologyClass {
    /// Creates a class with `name` derived from the IRI's local name and all
    /// relationship lists empty.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: local_name(&id).to_owned(),
            id,
            label: None,
            description: None,
            super_classes: Vec::new(),
            disjoint_with: Vec::new(),
            equivalent_to: Vec::new(),
            properties: Vec::new(),
            annotations: Vec::new(),
        }
    }

    /// The label to show or emit: `label` when present, else `name`.
    #[must_use]
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

/// An OWL property.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OntologyProperty {
    /// Full IRI.
    pub id: String,
    /// Fallback display string.
    pub name: String,
    /// Explicit `rdfs:label`, if any.
    pub label: Option<String>,
    /// `rdfs:comment`, if any.
    pub description: Option<String>,
    /// Object, data, or annotation property.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub property_type: PropertyType,
    /// `rdfs:domain` IRIs.
    pub domain: Vec<String>,
    /// `rdfs:range` IRIs.
    pub range: Vec<String>,
    /// `rdfs:subPropertyOf` IRIs.
    pub super_properties: Vec<String>,
    /// Free-form characteristic tags (e.g. `functional`, `transitive`).
    pub characteristics: Vec<String>,
    /// Entity-level annotations.
    pub annotations: Vec<Annotation>,
}

impl OntologyProperty {
    /// Creates a property of the given type with `name` derived from the IRI.
    #[must_use]
    pub fn new(id: impl Into<String>, property_type: PropertyType) -> Self {
        let id = id.into();
        Self {
            name: local_name(&id).to_owned(),
            id,
            label: None,
            description: None,
            property_type,
            domain: Vec::new(),
            range: Vec::new(),
            super_properties: Vec::new(),
            characteristics: Vec::new(),
            annotations: Vec::new(),
        }
    }

    /// The label to show or emit: `label` when present, else `name`.
    #[must_use]
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

/// A named individual.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Individual {
    /// Full IRI.
    pub id: String,
    /// Fallback display string.
    pub name: String,
    /// Explicit `rdfs:label`, if any.
    pub label: Option<String>,
    /// Classes this individual instantiates, in declaration order.
    pub types: Vec<String>,
    /// Property assertions.
    pub property_assertions: Vec<PropertyAssertion>,
    /// `owl:sameAs` IRIs.
    pub same_as: Vec<String>,
    /// `owl:differentFrom` IRIs.
    pub different_from: Vec<String>,
    /// Entity-level annotations.
    pub annotations: Vec<Annotation>,
}

impl Individual {
    /// Creates an untyped individual with `name` derived from the IRI.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: local_name(&id).to_owned(),
            id,
            label: None,
            types: Vec::new(),
            property_assertions: Vec::new(),
            same_as: Vec::new(),
            different_from: Vec::new(),
            annotations: Vec::new(),
        }
    }

    /// The label to show or emit: `label` when present, else `name`.
    #[must_use]
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

/// A complete ontology snapshot.
///
/// Every key of `classes`, `properties`, and `individuals` equals the `id` of
/// the entity stored under it; use the `insert_*` methods to keep it that way.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ontology {
    /// Ontology IRI.
    pub id: String,
    /// Display name.
    pub name: String,
    /// `owl:versionInfo`, if any.
    pub version: Option<String>,
    /// `owl:imports` IRIs in declaration order.
    pub imports: Vec<String>,
    /// Classes keyed by IRI.
    pub classes: IndexMap<String, OntologyClass>,
    /// Properties keyed by IRI.
    pub properties: IndexMap<String, OntologyProperty>,
    /// Individuals keyed by IRI.
    pub individuals: IndexMap<String, Individual>,
    /// Ontology-level annotations.
    pub annotations: Vec<Annotation>,
    /// When this snapshot was produced or last edited.
    pub last_modified: DateTime<Utc>,
}

impl Ontology {
    /// Creates an empty ontology stamped with the current time.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            version: None,
            imports: Vec::new(),
            classes: IndexMap::new(),
            properties: IndexMap::new(),
            individuals: IndexMap::new(),
            annotations: Vec::new(),
            last_modified: Utc::now(),
        }
    }

    /// Inserts (or replaces) a class under its own IRI. A replaced class keeps
    /// its original position.
    pub fn insert_class(&mut self, class: OntologyClass) -> Option<OntologyClass> {
        self.classes.insert(class.id.clone(), class)
    }

    /// Inserts (or replaces) a property under its own IRI.
    pub fn insert_property(&mut self, property: OntologyProperty) -> Option<OntologyProperty> {
        self.properties.insert(property.id.clone(), property)
    }

    /// Inserts (or replaces) an individual under its own IRI.
    pub fn insert_individual(&mut self, individual: Individual) -> Option<Individual> {
        self.individuals.insert(individual.id.clone(), individual)
    }

    /// Looks up a class by its full IRI. Returns `None` if not found.
    #[must_use]
    pub fn find_class(&self, iri: &str) -> Option<&OntologyClass> {
        self.classes.get(iri)
    }

    /// Looks up a property by its full IRI. Returns `None` if not found.
    #[must_use]
    pub fn find_property(&self, iri: &str) -> Option<&OntologyProperty> {
        self.properties.get(iri)
    }

    /// Looks up an individual by its full IRI. Returns `None` if not found.
    #[must_use]
    pub fn find_individual(&self, iri: &str) -> Option<&Individual> {
        self.individuals.get(iri)
    }

    /// Returns true if `iri` names a class, property, or individual.
    #[must_use]
    pub fn contains_entity(&self, iri: &str) -> bool {
        self.classes.contains_key(iri)
            || self.properties.contains_key(iri)
            || self.individuals.contains_key(iri)
    }

    /// Returns the number of classes.
    #[must_use]
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Returns the number of properties.
    #[must_use]
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    /// Returns the number of individuals.
    #[must_use]
    pub fn individual_count(&self) -> usize {
        self.individuals.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_class_derives_name_from_fragment() {
        let class = OntologyClass::new("http://ex.org/onto#Person");
        assert_eq!(class.name, "Person");
        assert_eq!(class.label, None);
        assert_eq!(class.display_label(), "Person");
    }

    #[test]
    fn display_label_prefers_label() {
        let mut prop = OntologyProperty::new("http://ex.org/onto/hasPet", PropertyType::ObjectProperty);
        assert_eq!(prop.display_label(), "hasPet");
        prop.label = Some("has pet".to_owned());
        assert_eq!(prop.display_label(), "has pet");
    }

    #[test]
    fn insert_keys_by_entity_id() {
        let mut ontology = Ontology::new("http://ex.org/onto", "onto");
        ontology.insert_class(OntologyClass::new("http://ex.org/onto#A"));
        ontology.insert_individual(Individual::new("http://ex.org/onto#a1"));
        for (key, class) in &ontology.classes {
            assert_eq!(key, &class.id);
        }
        assert!(ontology.contains_entity("http://ex.org/onto#a1"));
        assert!(!ontology.contains_entity("http://ex.org/onto#B"));
        assert_eq!(ontology.class_count(), 1);
        assert_eq!(ontology.individual_count(), 1);
    }

    #[test]
    fn replacing_a_class_keeps_its_position() {
        let mut ontology = Ontology::new("http://ex.org/onto", "onto");
        ontology.insert_class(OntologyClass::new("http://ex.org/onto#A"));
        ontology.insert_class(OntologyClass::new("http://ex.org/onto#B"));
        let mut replacement = OntologyClass::new("http://ex.org/onto#A");
        replacement.label = Some("Alpha".to_owned());
        assert!(ontology.insert_class(replacement).is_some());
        let order: Vec<&str> = ontology.classes.keys().map(String::as_str).collect();
        assert_eq!(order, ["http://ex.org/onto#A", "http://ex.org/onto#B"]);
        assert_eq!(
            ontology.find_class("http://ex.org/onto#A").and_then(|c| c.label.as_deref()),
            Some("Alpha")
        );
    }

    #[test]
    fn property_type_classification() {
        assert_eq!(PropertyType::from_type_name("owl:ObjectProperty"), PropertyType::ObjectProperty);
        assert_eq!(PropertyType::from_type_name("owl:DatatypeProperty"), PropertyType::DataProperty);
        assert_eq!(PropertyType::from_type_name("owl:AnnotationProperty"), PropertyType::AnnotationProperty);
        assert_eq!(PropertyType::DataProperty.owl_term(), "DatatypeProperty");
    }
}
