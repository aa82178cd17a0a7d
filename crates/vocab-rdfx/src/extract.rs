//! # RDF/XML Event Walk
//!
//! The reader resolves namespaces and expands empty elements into an
//! open/close pair, so `<ivoasem:deprecated/>` and
//! `<ivoasem:deprecated></ivoasem:deprecated>` look the same here.
//!
//! A stack of open elements records each element's canonical name, its
//! canonical attributes, and the text that appears before its first child.
//! All triples are emitted on element close:
//!
//! ```text
//! <rdf:Property rdf:about="…#stinky">          ── typed node: (…#stinky, rdf:type, rdf:Property)
//!   <rdfs:subPropertyOf rdf:resource="…#test"/> ── property:   (…#stinky, rdfs:subPropertyOf, …#test)
//!   <rdfs:label>Old and boring</rdfs:label>     ── property:   (…#stinky, rdfs:label, "Old and boring")
//! </rdf:Property>
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::io::BufRead;

use once_cell::sync::Lazy;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;

use vocab_core::predicates::{
    RDF_ABOUT, RDF_RESOURCE, RDF_TYPE, STRUCTURAL_PREDICATES, TYPED_NODE_ELEMENTS,
};
use vocab_core::{canonicalize_attributes, canonicalize_name, canonicalize_uri, Flavour, Triple};

use crate::error::ExtractError;

static OBJECT_GENERATING_ELEMENTS: Lazy<BTreeSet<&'static str>> = Lazy::new(|| {
    let mut names: BTreeSet<&'static str> = STRUCTURAL_PREDICATES.into_iter().collect();
    for flavour in Flavour::ALL {
        let props = flavour.properties();
        names.extend([props.label, props.definition, props.wider]);
    }
    names
});

/// Canonical element names that produce a triple when they close.
///
/// The structural predicates plus every flavour's label, definition, and
/// wider predicate. Only these are looked at, to reduce the risk of
/// confusing later extensions with something we think we understand.
pub fn object_generating_elements() -> &'static BTreeSet<&'static str> {
    &OBJECT_GENERATING_ELEMENTS
}

/// Result of a successful extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Triples in document order.
    pub triples: Vec<Triple>,
    /// Subjects declared through typed nodes, in document order.
    ///
    /// `None` unless the extractor was created with
    /// [`RdfxExtractor::validating`].
    pub typed_node_subjects: Option<Vec<String>>,
    /// Occurrences of every canonical element name, whether or not it
    /// produced a triple. Only recorded by a validating extractor.
    pub element_counts: Option<BTreeMap<String, usize>>,
}

impl Extraction {
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }
}

/// Extracts vocabulary triples from RDF/XML.
#[derive(Debug, Clone, Copy, Default)]
pub struct RdfxExtractor {
    validating: bool,
}

impl RdfxExtractor {
    /// An extractor producing triples only.
    pub fn new() -> Self {
        Self::default()
    }

    /// An extractor that also records typed-node subjects and element
    /// usage out of band.
    pub fn validating() -> Self {
        Self {
            validating: true,
        }
    }

    pub fn is_validating(&self) -> bool {
        self.validating
    }

    /// Extract triples from an in-memory document.
    pub fn extract_str(&self, document: &str) -> Result<Extraction, ExtractError> {
        self.extract(document.as_bytes())
    }

    /// Extract triples from any buffered reader.
    ///
    /// # Errors
    ///
    /// Any [`ExtractError`] aborts the whole extraction.
    pub fn extract<R: BufRead>(&self, input: R) -> Result<Extraction, ExtractError> {
        let mut reader = NsReader::from_reader(input);
        reader.config_mut().expand_empty_elements = true;

        let mut walk = Walk::new(self.validating);
        let mut buf = Vec::new();

        loop {
            let event = match reader.read_event_into(&mut buf) {
                Ok(event) => event,
                Err(e) => return Err(xml_error(&reader, e)),
            };
            match event {
                Event::Start(ref start) => {
                    let name = element_name(&reader, start)?;
                    let attributes = element_attributes(&reader, start)?;
                    walk.open(name, attributes);
                }
                Event::End(_) => walk.close()?,
                Event::Text(ref text) => {
                    let text = text.unescape().map_err(|e| xml_error(&reader, e))?;
                    walk.text(&text);
                }
                Event::CData(ref cdata) => {
                    let text = reader
                        .decoder()
                        .decode(cdata.as_ref())
                        .map_err(|e| xml_error(&reader, e))?;
                    walk.text(&text);
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        walk.finish()
    }
}

struct OpenElement {
    name: String,
    attributes: HashMap<String, String>,
    text: Option<String>,
    has_children: bool,
}

struct Walk {
    stack: Vec<OpenElement>,
    triples: Vec<Triple>,
    typed_nodes: Option<Vec<String>>,
    element_counts: Option<BTreeMap<String, usize>>,
}

impl Walk {
    fn new(validating: bool) -> Self {
        Self {
            stack: Vec::new(),
            triples: Vec::new(),
            typed_nodes: validating.then(Vec::new),
            element_counts: validating.then(BTreeMap::new),
        }
    }

    fn open(&mut self, name: String, attributes: HashMap<String, String>) {
        if let Some(parent) = self.stack.last_mut() {
            parent.has_children = true;
        }
        if let Some(counts) = self.element_counts.as_mut() {
            *counts.entry(name.clone()).or_default() += 1;
        }
        self.stack.push(OpenElement {
            name,
            attributes,
            text: None,
            has_children: false,
        });
    }

    fn text(&mut self, text: &str) {
        // Text after the first child is tail text of that child.
        if let Some(top) = self.stack.last_mut() {
            if !top.has_children {
                top.text.get_or_insert_with(String::new).push_str(text);
            }
        }
    }

    fn close(&mut self) -> Result<(), ExtractError> {
        // The reader rejects unbalanced end tags before we get here.
        let Some(element) = self.stack.pop() else {
            return Ok(());
        };

        if OBJECT_GENERATING_ELEMENTS.contains(element.name.as_str()) {
            let subject = self
                .stack
                .last()
                .and_then(|parent| parent.attributes.get(RDF_ABOUT))
                .ok_or_else(|| ExtractError::MissingSubject {
                    element: element.name.clone(),
                })?;
            let object = match element.attributes.get(RDF_RESOURCE) {
                Some(resource) => Some(canonicalize_uri(resource)),
                None => element.text.as_deref().map(canonicalize_uri),
            };
            self.triples.push(Triple {
                subject: canonicalize_uri(subject),
                predicate: element.name.clone(),
                object,
            });
        }

        if TYPED_NODE_ELEMENTS.contains(&element.name.as_str()) {
            let about =
                element
                    .attributes
                    .get(RDF_ABOUT)
                    .ok_or_else(|| ExtractError::MissingIdentity {
                        element: element.name.clone(),
                    })?;
            let subject = canonicalize_uri(about);
            if let Some(typed_nodes) = self.typed_nodes.as_mut() {
                typed_nodes.push(subject.clone());
            }
            self.triples.push(Triple {
                subject,
                predicate: RDF_TYPE.to_string(),
                object: Some(element.name),
            });
        }

        Ok(())
    }

    fn finish(self) -> Result<Extraction, ExtractError> {
        if let Some(innermost) = self.stack.last() {
            return Err(ExtractError::Unterminated {
                element: innermost.name.clone(),
                open: self.stack.len(),
            });
        }
        tracing::debug!(
            triples = self.triples.len(),
            typed_nodes = self.typed_nodes.as_ref().map(Vec::len),
            "extracted RDF/XML triples"
        );
        Ok(Extraction {
            triples: self.triples,
            typed_node_subjects: self.typed_nodes,
            element_counts: self.element_counts,
        })
    }
}

fn xml_error<R>(reader: &NsReader<R>, source: impl Into<quick_xml::Error>) -> ExtractError {
    ExtractError::Xml {
        position: reader.buffer_position() as u64,
        source: source.into(),
    }
}

/// Clark notation (`{namespace}local`) for a resolved name.
fn clark_name(namespace: ResolveResult<'_>, local: &[u8]) -> Result<String, ExtractError> {
    let local = String::from_utf8_lossy(local);
    match namespace {
        ResolveResult::Bound(ns) => Ok(format!(
            "{{{}}}{local}",
            String::from_utf8_lossy(ns.into_inner())
        )),
        ResolveResult::Unbound => Ok(local.into_owned()),
        ResolveResult::Unknown(prefix) => Err(ExtractError::UnboundPrefix {
            prefix: String::from_utf8_lossy(&prefix).into_owned(),
        }),
    }
}

fn element_name<R>(reader: &NsReader<R>, start: &BytesStart<'_>) -> Result<String, ExtractError> {
    let (namespace, local) = reader.resolve_element(start.name());
    Ok(canonicalize_name(&clark_name(namespace, local.into_inner())?))
}

fn element_attributes<R>(
    reader: &NsReader<R>,
    start: &BytesStart<'_>,
) -> Result<HashMap<String, String>, ExtractError> {
    let mut raw = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| xml_error(reader, e))?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let (namespace, local) = reader.resolve_attribute(attr.key);
        let key = clark_name(namespace, local.into_inner())?;
        let value = attr.unescape_value().map_err(|e| xml_error(reader, e))?;
        raw.push((key, value.into_owned()));
    }
    Ok(canonicalize_attributes(raw))
}
