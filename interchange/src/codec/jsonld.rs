//! JSON-LD codec.
//!
//! Serialization produces one document: the four standard prefixes in
//! `@context`, ontology metadata at the root, and a `@graph` holding every
//! class, then every property, then every individual, in map order.
//!
//! Parsing accepts both the graph shape (`@graph` array) and the flat shape
//! (a single node at the root). Classes and properties are reconstructed;
//! individuals are emitted but not read back.

use serde_json::{json, Map, Value};

use crate::error::{InterchangeError, Result};
use crate::iri::{label_or_local_name, local_name};
use crate::model::{Individual, Ontology, OntologyClass, OntologyProperty, PropertyType};
use crate::namespaces::{self, FALLBACK_ONTOLOGY_IRI, STANDARD_PREFIXES};

/// Serializes an ontology to a JSON-LD `Value`.
///
/// Use [`serialize`] for the pretty-printed text form.
#[must_use]
pub fn to_json_ld(ontology: &Ontology) -> Value {
    let mut root = Map::new();
    root.insert("@context".to_owned(), build_context());
    root.insert("@id".to_owned(), json!(ontology.id));
    root.insert("@type".to_owned(), json!("owl:Ontology"));
    root.insert("rdfs:label".to_owned(), json!(ontology.name));
    if let Some(version) = &ontology.version {
        root.insert("owl:versionInfo".to_owned(), json!(version));
    }
    root.insert("owl:imports".to_owned(), id_array(&ontology.imports));
    root.insert("@graph".to_owned(), build_graph(ontology));
    Value::Object(root)
}

/// Serializes an ontology to pretty-printed JSON-LD text (2-space indent).
#[must_use]
pub fn serialize(ontology: &Ontology) -> String {
    let text = format!("{:#}", to_json_ld(ontology));
    tracing::debug!(
        classes = ontology.class_count(),
        properties = ontology.property_count(),
        individuals = ontology.individual_count(),
        bytes = text.len(),
        "serialized JSON-LD"
    );
    text
}

fn build_context() -> Value {
    let mut ctx = Map::new();
    for (prefix, iri) in STANDARD_PREFIXES {
        ctx.insert((*prefix).to_owned(), json!(iri));
    }
    Value::Object(ctx)
}

fn build_graph(ontology: &Ontology) -> Value {
    let nodes: Vec<Value> = ontology
        .classes
        .values()
        .map(class_to_json)
        .chain(ontology.properties.values().map(property_to_json))
        .chain(ontology.individuals.values().map(individual_to_json))
        .collect();
    Value::Array(nodes)
}

fn id_array(iris: &[String]) -> Value {
    Value::Array(iris.iter().map(|iri| json!({ "@id": iri })).collect())
}

fn class_to_json(class: &OntologyClass) -> Value {
    let mut node = json!({
        "@id": class.id,
        "@type": "owl:Class",
        "rdfs:label": class.display_label(),
        "rdfs:subClassOf": id_array(&class.super_classes),
        "owl:disjointWith": id_array(&class.disjoint_with)
    });
    if let Some(comment) = &class.description {
        node["rdfs:comment"] = json!(comment);
    }
    if !class.equivalent_to.is_empty() {
        node["owl:equivalentClass"] = id_array(&class.equivalent_to);
    }
    node
}

fn property_to_json(prop: &OntologyProperty) -> Value {
    let mut node = json!({
        "@id": prop.id,
        "@type": format!("owl:{}", prop.property_type.owl_term()),
        "rdfs:label": prop.display_label(),
        "rdfs:domain": id_array(&prop.domain),
        "rdfs:range": id_array(&prop.range),
        "rdfs:subPropertyOf": id_array(&prop.super_properties)
    });
    if let Some(comment) = &prop.description {
        node["rdfs:comment"] = json!(comment);
    }
    node
}

fn individual_to_json(ind: &Individual) -> Value {
    let mut node = json!({
        "@id": ind.id,
        "@type": id_array(&ind.types),
        "rdfs:label": ind.display_label()
    });
    if !ind.same_as.is_empty() {
        node["owl:sameAs"] = id_array(&ind.same_as);
    }
    if !ind.different_from.is_empty() {
        node["owl:differentFrom"] = id_array(&ind.different_from);
    }
    node
}

/// Parses a JSON-LD document into an ontology.
///
/// # Errors
///
/// Returns [`InterchangeError::Json`] if `text` is not JSON and
/// [`InterchangeError::NotAnObject`] if the top-level value is not an object.
/// Missing optional fields never fail.
pub fn parse(text: &str) -> Result<Ontology> {
    let document: Value = serde_json::from_str(text)?;
    let root = match &document {
        Value::Object(map) => map,
        other => {
            return Err(InterchangeError::NotAnObject {
                found: json_type_name(other),
            })
        }
    };

    let id = field(root, "@id", None)
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .unwrap_or(FALLBACK_ONTOLOGY_IRI)
        .to_owned();
    let name = literal(field(root, "rdfs", Some("label"))).unwrap_or_else(|| local_name(&id).to_owned());
    let mut ontology = Ontology::new(id, name);
    ontology.version = literal(field(root, "owl", Some("versionInfo")));
    ontology.imports = id_list(field(root, "owl", Some("imports")));

    let nodes: Vec<&Value> = match root.get("@graph") {
        Some(Value::Array(graph)) => graph.iter().collect(),
        Some(single @ Value::Object(_)) => vec![single],
        _ => vec![&document],
    };

    for node in nodes {
        let Value::Object(node) = node else {
            continue;
        };
        match classify(node) {
            NodeKind::Class => {
                if let Some(class) = class_from_json(node) {
                    ontology.insert_class(class);
                }
            }
            NodeKind::Property(property_type) => {
                if let Some(prop) = property_from_json(node, property_type) {
                    ontology.insert_property(prop);
                }
            }
            NodeKind::Other => {}
        }
    }

    tracing::debug!(
        classes = ontology.class_count(),
        properties = ontology.property_count(),
        "parsed JSON-LD"
    );
    Ok(ontology)
}

enum NodeKind {
    Class,
    Property(PropertyType),
    Other,
}

/// Classifies a graph node by substring tests on each `@type`: a type
/// containing `Class` makes a class (`owl:Class`, `rdfs:Class`,
/// `owl:DeprecatedClass`); otherwise a type containing `Property` makes a
/// property whose kind is chosen by substring.
fn classify(node: &Map<String, Value>) -> NodeKind {
    let types = id_list(node.get("@type"));
    if types.iter().any(|t| t.contains("Class")) {
        return NodeKind::Class;
    }
    match types.iter().find(|t| t.contains("Property")) {
        Some(type_name) => NodeKind::Property(PropertyType::from_type_name(type_name)),
        None => NodeKind::Other,
    }
}

fn class_from_json(node: &Map<String, Value>) -> Option<OntologyClass> {
    let id = node_id(node)?;
    let label = label_or_local_name(literal(field(node, "rdfs", Some("label"))).as_deref(), &id);
    let mut class = OntologyClass::new(id);
    class.name = label.clone();
    class.label = Some(label);
    class.description = literal(field(node, "rdfs", Some("comment")));
    class.super_classes = id_list(field(node, "rdfs", Some("subClassOf")));
    class.disjoint_with = id_list(field(node, "owl", Some("disjointWith")));
    class.equivalent_to = id_list(field(node, "owl", Some("equivalentClass")));
    Some(class)
}

fn property_from_json(node: &Map<String, Value>, property_type: PropertyType) -> Option<OntologyProperty> {
    let id = node_id(node)?;
    let label = label_or_local_name(literal(field(node, "rdfs", Some("label"))).as_deref(), &id);
    let mut prop = OntologyProperty::new(id, property_type);
    prop.name = label.clone();
    prop.label = Some(label);
    prop.description = literal(field(node, "rdfs", Some("comment")));
    prop.domain = id_list(field(node, "rdfs", Some("domain")));
    prop.range = id_list(field(node, "rdfs", Some("range")));
    prop.super_properties = id_list(field(node, "rdfs", Some("subPropertyOf")));
    Some(prop)
}

fn node_id(node: &Map<String, Value>) -> Option<String> {
    match node.get("@id").and_then(Value::as_str) {
        Some(id) if !id.is_empty() => Some(id.to_owned()),
        _ => {
            tracing::warn!("skipping JSON-LD node without @id");
            None
        }
    }
}

/// Looks up a field under its prefixed key, its expanded-IRI key, and its
/// bare key, in that order. `field(node, "@id", None)` looks up a keyword.
fn field<'a>(node: &'a Map<String, Value>, prefix: &str, local: Option<&str>) -> Option<&'a Value> {
    let Some(local) = local else {
        return node.get(prefix);
    };
    node.get(&format!("{prefix}:{local}"))
        .or_else(|| namespaces::expand(prefix, local).and_then(|full| node.get(&full)))
        .or_else(|| node.get(local))
}

/// Flattens the legal JSON-LD reference shapes into a list of IRIs: a bare
/// string, an `{"@id": ...}` object, or an array mixing both.
pub(crate) fn id_list(value: Option<&Value>) -> Vec<String> {
    let mut out = Vec::new();
    if let Some(value) = value {
        collect_ids(value, &mut out);
    }
    out
}

fn collect_ids(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(s) => out.push(s.clone()),
        Value::Object(map) => {
            if let Some(Value::String(id)) = map.get("@id") {
                out.push(id.clone());
            }
        }
        Value::Array(items) => items.iter().for_each(|item| collect_ids(item, out)),
        _ => {}
    }
}

/// Extracts a literal from a bare string, an `{"@value": ...}` object, or the
/// first usable element of an array.
fn literal(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => match map.get("@value") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        },
        Value::Array(items) => items.iter().find_map(|item| literal(Some(item))),
        _ => None,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
