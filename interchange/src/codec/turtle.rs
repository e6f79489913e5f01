//! Turtle codec.
//!
//! The serializer writes one stanza per entity after the shared `@prefix`
//! block. The reader is line-oriented and understands only the subset the
//! serializer emits: subjects written as `<iri>` at the start of a line,
//! `a`/`rdf:type` declarations of OWL constructs, and `rdfs:label` /
//! `rdfs:comment` literals on the same or following (`;`-continued) lines.
//! Relationship triples (`rdfs:subClassOf`, `rdfs:domain`, ...) are written
//! but not read back.

use crate::error::Result;
use crate::iri::{is_absolute, local_name};
use crate::model::{Individual, Ontology, OntologyClass, OntologyProperty, PropertyType};
use crate::namespaces::{is_standard_curie, STANDARD_PREFIXES};

/// Envelope IRI for documents without an `owl:Ontology` subject.
pub const IMPORTED_ONTOLOGY_ID: &str = "imported ontology";
/// Envelope name for documents without an `owl:Ontology` subject.
pub const IMPORTED_ONTOLOGY_NAME: &str = "imported ontology";

/// Property characteristic tags with a matching OWL class.
const CHARACTERISTICS: &[(&str, &str)] = &[
    ("functional", "owl:FunctionalProperty"),
    ("inverseFunctional", "owl:InverseFunctionalProperty"),
    ("transitive", "owl:TransitiveProperty"),
    ("symmetric", "owl:SymmetricProperty"),
    ("asymmetric", "owl:AsymmetricProperty"),
    ("reflexive", "owl:ReflexiveProperty"),
    ("irreflexive", "owl:IrreflexiveProperty"),
];

/// Serializes an ontology to a Turtle string.
#[must_use]
pub fn serialize(ontology: &Ontology) -> String {
    let mut out = String::with_capacity(4 * 1024);

    for (prefix, iri) in STANDARD_PREFIXES {
        out.push_str(&format!("@prefix {:<5} <{}> .\n", format!("{prefix}:"), iri));
    }
    out.push('\n');

    let mut header = vec![
        "a owl:Ontology".to_owned(),
        format!("rdfs:label {}", turtle_string(&ontology.name)),
    ];
    if let Some(version) = &ontology.version {
        header.push(format!("owl:versionInfo {}", turtle_string(version)));
    }
    header.extend(ontology.imports.iter().map(|iri| format!("owl:imports {}", turtle_term(iri))));
    push_stanza(&mut out, &ontology.id, &header);

    for class in ontology.classes.values() {
        push_stanza(&mut out, &class.id, &class_predicates(class));
    }
    for prop in ontology.properties.values() {
        push_stanza(&mut out, &prop.id, &property_predicates(prop));
    }
    for ind in ontology.individuals.values() {
        push_stanza(&mut out, &ind.id, &individual_predicates(ind));
    }

    tracing::debug!(
        classes = ontology.class_count(),
        properties = ontology.property_count(),
        individuals = ontology.individual_count(),
        "serialized Turtle"
    );
    out
}

fn push_stanza(out: &mut String, subject: &str, predicates: &[String]) {
    out.push_str(&format!("<{}> {} .\n\n", subject, predicates.join(" ;\n    ")));
}

fn class_predicates(class: &OntologyClass) -> Vec<String> {
    let mut lines = vec![
        "a owl:Class".to_owned(),
        format!("rdfs:label {}", turtle_string(class.display_label())),
    ];
    if let Some(comment) = &class.description {
        lines.push(format!("rdfs:comment {}", turtle_string(comment)));
    }
    lines.extend(class.super_classes.iter().map(|iri| format!("rdfs:subClassOf {}", turtle_term(iri))));
    lines.extend(class.disjoint_with.iter().map(|iri| format!("owl:disjointWith {}", turtle_term(iri))));
    lines.extend(class.equivalent_to.iter().map(|iri| format!("owl:equivalentClass {}", turtle_term(iri))));
    lines
}

fn property_predicates(prop: &OntologyProperty) -> Vec<String> {
    let mut types = vec![format!("owl:{}", prop.property_type.owl_term())];
    types.extend(
        prop.characteristics
            .iter()
            .filter_map(|tag| characteristic_class(tag))
            .map(str::to_owned),
    );
    let mut lines = vec![
        format!("a {}", types.join(", ")),
        format!("rdfs:label {}", turtle_string(prop.display_label())),
    ];
    if let Some(comment) = &prop.description {
        lines.push(format!("rdfs:comment {}", turtle_string(comment)));
    }
    lines.extend(prop.domain.iter().map(|iri| format!("rdfs:domain {}", turtle_term(iri))));
    lines.extend(prop.range.iter().map(|iri| format!("rdfs:range {}", turtle_term(iri))));
    lines.extend(prop.super_properties.iter().map(|iri| format!("rdfs:subPropertyOf {}", turtle_term(iri))));
    lines
}

fn individual_predicates(ind: &Individual) -> Vec<String> {
    let types: Vec<String> = std::iter::once("owl:NamedIndividual".to_owned())
        .chain(ind.types.iter().map(|iri| turtle_term(iri)))
        .collect();
    let mut lines = vec![
        format!("a {}", types.join(", ")),
        format!("rdfs:label {}", turtle_string(ind.display_label())),
    ];
    lines.extend(ind.same_as.iter().map(|iri| format!("owl:sameAs {}", turtle_term(iri))));
    lines.extend(ind.different_from.iter().map(|iri| format!("owl:differentFrom {}", turtle_term(iri))));
    lines
}

/// Maps a characteristic tag (case-insensitive) to its OWL class.
pub(crate) fn characteristic_class(tag: &str) -> Option<&'static str> {
    CHARACTERISTICS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(tag))
        .map(|(_, class)| *class)
}

/// Maps an OWL class local name (e.g. `FunctionalProperty`) to its tag.
pub(crate) fn characteristic_tag(owl_local: &str) -> Option<&'static str> {
    CHARACTERISTICS
        .iter()
        .find(|(_, class)| class.strip_prefix("owl:") == Some(owl_local))
        .map(|(name, _)| *name)
}

/// Writes an object term: standard prefixed names as-is, anything else as
/// an `<iri>` reference.
fn turtle_term(iri: &str) -> String {
    if is_standard_curie(iri) && !is_absolute(iri) {
        iri.to_owned()
    } else {
        format!("<{iri}>")
    }
}

/// Quotes a literal, escaping so it always stays on one line.
fn turtle_string(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len() + 2);
    escaped.push('"');
    for c in s.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c => escaped.push(c),
        }
    }
    escaped.push('"');
    escaped
}

/// Which entity the reader is currently attaching predicates to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReaderState {
    /// Between statements.
    NoSubject,
    /// A subject IRI has been read but no recognised `a` declaration yet.
    SubjectPendingKind(String),
    /// The current subject is a class.
    SubjectIsClass(String),
    /// The current subject is a property.
    SubjectIsProperty(String),
    /// The current subject is the ontology itself.
    SubjectIsOntology(String),
}

impl ReaderState {
    fn subject(&self) -> Option<&str> {
        match self {
            ReaderState::NoSubject => None,
            ReaderState::SubjectPendingKind(s)
            | ReaderState::SubjectIsClass(s)
            | ReaderState::SubjectIsProperty(s)
            | ReaderState::SubjectIsOntology(s) => Some(s),
        }
    }
}

/// Line-oriented Turtle reader.
///
/// Feed lines with [`TurtleReader::read_line`] and take the result with
/// [`TurtleReader::finish`]. A line starting with `<iri>` opens a new subject;
/// other lines continue the current one; a line ending in `.` closes it.
#[derive(Debug)]
pub struct TurtleReader {
    state: ReaderState,
    ontology: Ontology,
    envelope_seen: bool,
}

impl Default for TurtleReader {
    fn default() -> Self {
        Self::new()
    }
}

impl TurtleReader {
    /// Creates a reader holding an empty placeholder ontology.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: ReaderState::NoSubject,
            ontology: Ontology::new(IMPORTED_ONTOLOGY_ID, IMPORTED_ONTOLOGY_NAME),
            envelope_seen: false,
        }
    }

    /// The reader's current state.
    #[must_use]
    pub fn state(&self) -> &ReaderState {
        &self.state
    }

    /// Consumes one line of input.
    pub fn read_line(&mut self, line: &str) {
        let trimmed = line.trim();
        if trimmed.is_empty()
            || trimmed.starts_with('#')
            || trimmed.starts_with("@prefix")
            || trimmed.starts_with("@base")
        {
            return;
        }

        let rest = match subject_of(trimmed) {
            Some((subject, rest)) => {
                self.state = ReaderState::SubjectPendingKind(subject.to_owned());
                rest
            }
            None => trimmed,
        };

        if let Some(subject) = self.state.subject().map(str::to_owned) {
            if let Some(kind) = declared_kind(rest) {
                self.declare(subject, kind);
            }
        }
        if let Some(label) = literal_after(rest, "rdfs:label") {
            self.set_label(label);
        }
        if let Some(comment) = literal_after(rest, "rdfs:comment") {
            self.set_comment(comment);
        }
        if let ReaderState::SubjectIsOntology(_) = self.state {
            if let Some(version) = literal_after(rest, "owl:versionInfo") {
                self.ontology.version = Some(version);
            }
            if let Some(import) = iri_after(rest, "owl:imports") {
                self.ontology.imports.push(import);
            }
        }

        if rest.ends_with('.') {
            self.state = ReaderState::NoSubject;
        }
    }

    /// Returns the ontology built so far.
    #[must_use]
    pub fn finish(self) -> Ontology {
        self.ontology
    }

    fn declare(&mut self, subject: String, kind: DeclaredKind) {
        match kind {
            DeclaredKind::Class => {
                self.ontology.insert_class(OntologyClass::new(subject.clone()));
                self.state = ReaderState::SubjectIsClass(subject);
            }
            DeclaredKind::Property(property_type) => {
                self.ontology.insert_property(OntologyProperty::new(subject.clone(), property_type));
                self.state = ReaderState::SubjectIsProperty(subject);
            }
            DeclaredKind::Ontology => {
                if !self.envelope_seen {
                    self.envelope_seen = true;
                    self.ontology.name = local_name(&subject).to_owned();
                    self.ontology.id = subject.clone();
                }
                self.state = ReaderState::SubjectIsOntology(subject);
            }
        }
    }

    fn set_label(&mut self, label: String) {
        match &self.state {
            ReaderState::SubjectIsClass(id) => {
                if let Some(class) = self.ontology.classes.get_mut(id) {
                    class.name = label.clone();
                    class.label = Some(label);
                }
            }
            ReaderState::SubjectIsProperty(id) => {
                if let Some(prop) = self.ontology.properties.get_mut(id) {
                    prop.name = label.clone();
                    prop.label = Some(label);
                }
            }
            ReaderState::SubjectIsOntology(id) if *id == self.ontology.id => {
                self.ontology.name = label;
            }
            _ => {}
        }
    }

    fn set_comment(&mut self, comment: String) {
        match &self.state {
            ReaderState::SubjectIsClass(id) => {
                if let Some(class) = self.ontology.classes.get_mut(id) {
                    class.description = Some(comment);
                }
            }
            ReaderState::SubjectIsProperty(id) => {
                if let Some(prop) = self.ontology.properties.get_mut(id) {
                    prop.description = Some(comment);
                }
            }
            _ => {}
        }
    }
}

/// Parses a Turtle document.
///
/// Only entity existence, labels, comments, and the ontology header are
/// recovered. This reader never fails; the `Result` keeps the signature in
/// line with the other codecs.
///
/// # Errors
///
/// Currently none.
pub fn parse(text: &str) -> Result<Ontology> {
    let mut reader = TurtleReader::new();
    for line in text.lines() {
        reader.read_line(line);
    }
    let ontology = reader.finish();
    tracing::debug!(
        classes = ontology.class_count(),
        properties = ontology.property_count(),
        "parsed Turtle"
    );
    Ok(ontology)
}

enum DeclaredKind {
    Class,
    Property(PropertyType),
    Ontology,
}

/// Splits `<iri> rest` into the subject IRI and the remainder of the line.
fn subject_of(line: &str) -> Option<(&str, &str)> {
    let inner = line.strip_prefix('<')?;
    let (iri, rest) = inner.split_once('>')?;
    Some((iri, rest.trim_start()))
}

/// Finds the OWL construct declared by an `a` / `rdf:type` predicate.
fn declared_kind(rest: &str) -> Option<DeclaredKind> {
    let objects = rest
        .strip_prefix("a ")
        .or_else(|| rest.strip_prefix("rdf:type "))?;
    let objects = objects.split(';').next().unwrap_or(objects);
    if objects.contains("owl:Class") {
        Some(DeclaredKind::Class)
    } else if objects.contains("owl:ObjectProperty") {
        Some(DeclaredKind::Property(PropertyType::ObjectProperty))
    } else if objects.contains("owl:DatatypeProperty") {
        Some(DeclaredKind::Property(PropertyType::DataProperty))
    } else if objects.contains("owl:AnnotationProperty") {
        Some(DeclaredKind::Property(PropertyType::AnnotationProperty))
    } else if objects.contains("owl:Ontology") {
        Some(DeclaredKind::Ontology)
    } else {
        None
    }
}

/// Returns the unescaped quoted literal following `predicate`, if any.
fn literal_after(rest: &str, predicate: &str) -> Option<String> {
    let (_, tail) = rest.split_once(predicate)?;
    let tail = tail.trim_start().strip_prefix('"')?;
    let mut value = String::new();
    let mut chars = tail.chars();
    while let Some(c) = chars.next() {
        match c {
            '"' => return Some(value),
            '\\' => match chars.next()? {
                'n' => value.push('\n'),
                'r' => value.push('\r'),
                't' => value.push('\t'),
                other => value.push(other),
            },
            c => value.push(c),
        }
    }
    None
}

/// Returns the `<iri>` following `predicate`, if any.
fn iri_after(rest: &str, predicate: &str) -> Option<String> {
    let (_, tail) = rest.split_once(predicate)?;
    let inner = tail.trim_start().strip_prefix('<')?;
    inner.split_once('>').map(|(iri, _)| iri.to_owned())
}
