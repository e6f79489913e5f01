//! A small owned XML tree built from `quick-xml` events.
//!
//! Names keep their raw spelling alongside the split prefix/local parts and
//! the namespace resolved from in-scope `xmlns` declarations. Unbound
//! prefixes are not an error: the namespace is simply `None`, which lets the
//! RDF/XML reader accept documents that use `owl:`/`rdf:` without declaring
//! them. Internal DTD `<!ENTITY>` declarations are honoured in attribute
//! values and text.

use std::borrow::Cow;
use std::collections::HashMap;

use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{InterchangeError, Result};
use crate::namespaces::{self, XML};

/// An attribute with its namespace resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct XmlAttribute {
    /// Raw name as written (e.g. `rdf:about`).
    pub name: String,
    /// Part after the prefix (e.g. `about`).
    pub local: String,
    /// Namespace bound to the prefix; unprefixed attributes have none.
    pub namespace: Option<String>,
    /// Unescaped value.
    pub value: String,
}

/// An element with its namespace resolved, its attributes, children, and
/// concatenated character data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct XmlElement {
    pub name: String,
    pub prefix: Option<String>,
    pub local: String,
    pub namespace: Option<String>,
    pub attributes: Vec<XmlAttribute>,
    pub children: Vec<XmlElement>,
    pub text: String,
}

impl XmlElement {
    /// Tag match that tolerates spelling variation: the local name must be
    /// equal, and the element must be unprefixed, bound to `namespace`, or use
    /// the standard prefix for `namespace` even if undeclared.
    pub fn is(&self, namespace: &str, local: &str) -> bool {
        if self.local != local {
            return false;
        }
        match (&self.prefix, &self.namespace) {
            (None, _) => true,
            (Some(_), Some(bound)) => bound == namespace,
            (Some(prefix), None) => namespaces::prefix_for(namespace) == Some(prefix.as_str()),
        }
    }

    /// Direct children matching [`XmlElement::is`].
    pub fn children_named<'a>(
        &'a self,
        namespace: &'a str,
        local: &'a str,
    ) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |c| c.is(namespace, local))
    }

    /// First direct child matching [`XmlElement::is`].
    pub fn child_named(&self, namespace: &str, local: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.is(namespace, local))
    }

    /// This element and all elements below it, in document order.
    pub fn descendants(&self) -> Vec<&XmlElement> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(el) = stack.pop() {
            out.push(el);
            stack.extend(el.children.iter().rev());
        }
        out
    }

    /// All elements (this one included) matching [`XmlElement::is`], in
    /// document order.
    pub fn find_all(&self, namespace: &str, local: &str) -> Vec<&XmlElement> {
        self.descendants()
            .into_iter()
            .filter(|el| el.is(namespace, local))
            .collect()
    }

    /// Attribute by its raw name (e.g. `rdf:about`).
    pub fn raw_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Attribute by namespace and local name.
    pub fn ns_attribute(&self, namespace: &str, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.local == local && a.namespace.as_deref() == Some(namespace))
            .map(|a| a.value.as_str())
    }

    /// Character data with surrounding whitespace removed; `None` when blank.
    pub fn trimmed_text(&self) -> Option<&str> {
        let text = self.text.trim();
        (!text.is_empty()).then_some(text)
    }

    /// `xml:lang`, if declared on this element.
    pub fn language(&self) -> Option<&str> {
        self.raw_attribute("xml:lang")
            .or_else(|| self.ns_attribute(XML, "lang"))
            .filter(|lang| !lang.is_empty())
    }

    /// The IRI this element name stands for: namespace + local when the prefix
    /// is bound, the standard expansion for undeclared `owl:`/`rdf:`/`rdfs:`/
    /// `xsd:` prefixes, otherwise the raw name.
    pub fn iri(&self) -> String {
        if let Some(namespace) = &self.namespace {
            return format!("{namespace}{}", self.local);
        }
        self.prefix
            .as_deref()
            .and_then(|prefix| namespaces::expand(prefix, &self.local))
            .unwrap_or_else(|| self.name.clone())
    }
}

type Scope = HashMap<String, String>;

/// Parses a whole document into its root element.
///
/// # Errors
///
/// Returns [`InterchangeError::Xml`] for anything the reader rejects
/// (mismatched tags, bad attributes, unknown entities) and for documents with
/// no root, several roots, or unclosed elements.
pub(crate) fn parse_document(text: &str) -> Result<XmlElement> {
    let mut reader = Reader::from_str(text);
    let mut entities: HashMap<String, String> = HashMap::new();
    let mut scopes: Vec<Scope> = Vec::new();
    let mut open: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        let position = reader.buffer_position() as u64;
        let fail = |message: String| InterchangeError::Xml { position, message };
        let event = reader.read_event().map_err(|e| fail(e.to_string()))?;
        match event {
            Event::DocType(doctype) => {
                let declarations = String::from_utf8_lossy(&doctype).into_owned();
                entities.extend(parse_entity_declarations(&declarations));
            }
            Event::Start(start) => {
                let element = open_element(&start, &mut scopes, &entities).map_err(fail)?;
                open.push(element);
            }
            Event::Empty(start) => {
                let element = open_element(&start, &mut scopes, &entities).map_err(fail)?;
                scopes.pop();
                attach(element, &mut open, &mut root).map_err(fail)?;
            }
            Event::End(_) => {
                let element = open
                    .pop()
                    .ok_or_else(|| fail("closing tag without an open element".to_owned()))?;
                scopes.pop();
                attach(element, &mut open, &mut root).map_err(fail)?;
            }
            Event::Text(text) => {
                let value = text
                    .unescape_with(|name| resolve_entity(&entities, name))
                    .map_err(|e| fail(e.to_string()))?;
                push_text(&mut open, value);
            }
            Event::CData(data) => {
                let raw = data.into_inner();
                push_text(&mut open, String::from_utf8_lossy(&raw));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    let position = reader.buffer_position() as u64;
    if let Some(unclosed) = open.last() {
        return Err(InterchangeError::Xml {
            position,
            message: format!("unclosed element <{}>", unclosed.name),
        });
    }
    root.ok_or(InterchangeError::Xml {
        position,
        message: "document has no root element".to_owned(),
    })
}

fn resolve_entity<'a>(entities: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    entities
        .get(name)
        .map(String::as_str)
        .or_else(|| resolve_predefined_entity(name))
}

fn push_text(open: &mut [XmlElement], value: Cow<'_, str>) {
    if let Some(current) = open.last_mut() {
        current.text.push_str(&value);
    }
}

fn attach(
    element: XmlElement,
    open: &mut [XmlElement],
    root: &mut Option<XmlElement>,
) -> std::result::Result<(), String> {
    if let Some(parent) = open.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(format!("second root element <{}>", element.name));
    }
    *root = Some(element);
    Ok(())
}

/// Builds an element from a start tag and pushes its namespace scope.
fn open_element(
    start: &BytesStart<'_>,
    scopes: &mut Vec<Scope>,
    entities: &HashMap<String, String>,
) -> std::result::Result<XmlElement, String> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();

    let mut raw: Vec<(String, String)> = Vec::new();
    let mut scope = Scope::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value_with(|name| resolve_entity(entities, name))
            .map_err(|e| e.to_string())?
            .into_owned();
        if key == "xmlns" {
            scope.insert(String::new(), value);
        } else if let Some(prefix) = key.strip_prefix("xmlns:") {
            scope.insert(prefix.to_owned(), value);
        } else {
            raw.push((key, value));
        }
    }
    scopes.push(scope);
    let scopes: &[Scope] = scopes;

    let (prefix, local) = split_qname(&name);
    let namespace = match prefix {
        Some(prefix) => lookup(scopes, prefix),
        None => lookup(scopes, ""),
    };
    let attributes = raw
        .into_iter()
        .map(|(key, value)| {
            let (prefix, local) = split_qname(&key);
            XmlAttribute {
                namespace: prefix.and_then(|p| lookup(scopes, p)),
                local: local.to_owned(),
                name: key,
                value,
            }
        })
        .collect();

    Ok(XmlElement {
        prefix: prefix.map(str::to_owned),
        local: local.to_owned(),
        namespace,
        name,
        attributes,
        children: Vec::new(),
        text: String::new(),
    })
}

fn split_qname(name: &str) -> (Option<&str>, &str) {
    match name.split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, name),
    }
}

fn lookup(scopes: &[Scope], prefix: &str) -> Option<String> {
    if prefix == "xml" {
        return Some(XML.to_owned());
    }
    scopes
        .iter()
        .rev()
        .find_map(|scope| scope.get(prefix))
        .filter(|ns| !ns.is_empty())
        .cloned()
}

/// Extracts `<!ENTITY name "value">` pairs from a DOCTYPE internal subset.
fn parse_entity_declarations(doctype: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    let mut rest = doctype;
    while let Some(start) = rest.find("<!ENTITY") {
        rest = &rest[start + "<!ENTITY".len()..];
        let body = rest.trim_start();
        let Some((name, after)) = body.split_once(char::is_whitespace) else {
            break;
        };
        let after = after.trim_start();
        let Some(quote) = after.chars().next().filter(|c| *c == '"' || *c == '\'') else {
            continue;
        };
        let Some((value, _)) = after[1..].split_once(quote) else {
            break;
        };
        out.push((name.to_owned(), value.to_owned()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespaces::{OWL, RDF};

    #[test]
    fn resolves_namespaces_and_attributes() {
        let doc = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
                              xmlns:o="http://www.w3.org/2002/07/owl#">
            <o:Class rdf:about="http://ex.org#A"/>
        </rdf:RDF>"#;
        let root = parse_document(doc).expect("parse");
        assert!(root.is(RDF, "RDF"));
        let class = &root.children[0];
        assert!(class.is(OWL, "Class"));
        assert_eq!(class.ns_attribute(RDF, "about"), Some("http://ex.org#A"));
        assert_eq!(class.raw_attribute("rdf:about"), Some("http://ex.org#A"));
    }

    #[test]
    fn tolerates_undeclared_and_missing_prefixes() {
        let root = parse_document(r#"<RDF><owl:Class rdf:about="x"/><Class about="y"/></RDF>"#)
            .expect("parse");
        assert_eq!(root.find_all(OWL, "Class").len(), 2);
        assert_eq!(root.children[0].iri(), "http://www.w3.org/2002/07/owl#Class");
    }

    #[test]
    fn foreign_namespace_does_not_match() {
        let root = parse_document(r#"<x:Class xmlns:x="http://other.org/"/>"#).expect("parse");
        assert!(!root.is(OWL, "Class"));
    }

    #[test]
    fn expands_dtd_entities() {
        let doc = r#"<?xml version="1.0"?>
<!DOCTYPE rdf:RDF [
    <!ENTITY owl "http://www.w3.org/2002/07/owl#" >
]>
<rdf:RDF><rdfs:subClassOf rdf:resource="&owl;Thing"/><rdfs:label>A &amp; B</rdfs:label></rdf:RDF>"#;
        let root = parse_document(doc).expect("parse");
        assert_eq!(
            root.children[0].raw_attribute("rdf:resource"),
            Some("http://www.w3.org/2002/07/owl#Thing")
        );
        assert_eq!(root.children[1].trimmed_text(), Some("A & B"));
    }

    #[test]
    fn descendants_in_document_order() {
        let root = parse_document("<a><b><c/></b><d/></a>").expect("parse");
        let names: Vec<&str> = root.descendants().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c", "d"]);
    }

    #[test]
    fn malformed_documents_fail() {
        for doc in ["<a><b></a>", "<a>", "", "<a/><b/>", "<a x=\"1\" x=\"2\"/>", "<a>&bogus;</a>"] {
            assert!(
                matches!(parse_document(doc), Err(InterchangeError::Xml { .. })),
                "expected failure for {doc:?}"
            );
        }
    }
}
