//! Document builders for tests.
//!
//! Enabled for this crate's own tests and, through the `fixtures` feature,
//! for the test suites of downstream crates. The documents mimic what
//! vocabulary publishing tools emit: a header with the usual namespace
//! declarations, a vocabulary description carrying the flavour declaration,
//! and a body of term declarations.

/// A `(subject, predicate, object)` triple in test shorthand. Subjects and
/// objects may use the `tv:` prefix for the test vocabulary.
pub type FixtureTriple = (&'static str, &'static str, Option<&'static str>);

/// URI of the vocabulary every fixture document declares.
pub const TEST_VOCABULARY_URI: &str = "http://www.ivoa.net/rdf/test";

/// Namespace that `tv:` expands to in [`declarations`].
pub const TEST_NAMESPACE: &str = "http://www.ivoa.net/rdf/test#";

/// Terms to play with in RDF Class and RDF Property documents.
pub const COMMON_RDFS_TRIPLES: &[FixtureTriple] = &[
    ("tv:test", "rdfs:label", Some("My first term")),
    ("tv:test", "rdfs:comment", Some("No semantics attached")),
    ("tv:test", "ivoasem:deprecated", None),
    ("tv:test", "ivoasem:useInstead", Some("tv:second")),
    ("tv:second", "rdfs:label", Some("My second term")),
    ("tv:second", "rdfs:comment", Some("Means nothing either")),
    ("tv:stinky", "rdfs:label", Some("Old and boring")),
    ("tv:stinky", "rdfs:comment", Some("We shouldn't have done this.")),
    ("tv:stinky", "ivoasem:deprecated", None),
    ("tv:experimental", "rdfs:label", Some("A proposed term")),
    ("tv:experimental", "rdfs:comment", Some("Under construction")),
    ("tv:experimental", "ivoasem:preliminary", None),
];

/// Terms to play with in SKOS documents.
pub const COMMON_SKOS_TRIPLES: &[FixtureTriple] = &[
    ("tv:stinky", "skos:broader", Some("tv:test")),
    ("tv:test", "skos:prefLabel", Some("My first term")),
    ("tv:test", "skos:definition", Some("No semantics attached")),
    ("tv:test", "ivoasem:deprecated", None),
    ("tv:test", "ivoasem:useInstead", Some("tv:second")),
    ("tv:second", "skos:prefLabel", Some("My second term")),
    ("tv:second", "skos:definition", Some("Means nothing either")),
    ("tv:stinky", "skos:prefLabel", Some("Old and boring")),
    ("tv:stinky", "skos:definition", Some("We shouldn't have done this.")),
    ("tv:stinky", "ivoasem:deprecated", None),
    ("tv:experimental", "skos:prefLabel", Some("A proposed term")),
    ("tv:experimental", "skos:definition", Some("Under construction")),
    ("tv:experimental", "ivoasem:preliminary", None),
    ("tv:experimental", "skos:broader", Some("tv:test")),
    ("tv:experimental", "skos:broader", Some("tv:second")),
];

/// A complete RDF/XML document declaring `flavour` and containing `body`.
pub fn document(flavour: &str, body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<rdf:RDF
    xmlns:dc="http://purl.org/dc/terms/"
    xmlns:foaf="http://xmlns.com/foaf/0.1/"
    xmlns:ivoasem="http://www.ivoa.net/rdf/ivoasem#"
    xmlns:owl="http://www.w3.org/2002/07/owl#"
    xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
    xmlns:rdfs="http://www.w3.org/2000/01/rdf-schema#"
    xmlns:xsd="http://www.w3.org/2001/XMLSchema#"
    xmlns:skos="http://www.w3.org/2004/02/skos/core#"
    xmlns="{TEST_NAMESPACE}">
  <rdf:Description rdf:nodeID="genid1">
    <foaf:name>Demleitner, M.</foaf:name>
  </rdf:Description>
  <rdf:Description rdf:about="{TEST_VOCABULARY_URI}">
    <rdf:type rdf:resource="http://www.w3.org/2002/07/owl#Ontology"/>
  </rdf:Description>
  <rdf:Description rdf:about="{TEST_VOCABULARY_URI}">
    <dc:created>2019-08-30</dc:created>
    <dc:creator rdf:nodeID="genid1"/>
    <rdfs:label>A (mostly broken) test vocabulary</rdfs:label>
    <dc:title>Test madness</dc:title>
    <dc:description>This is just for testing.</dc:description>
    <ivoasem:vocflavour>{flavour}</ivoasem:vocflavour>
  </rdf:Description>
  {body}
</rdf:RDF>
"#
    )
}

pub fn property_document(body: &str) -> String {
    document("RDF Property", body)
}

pub fn class_document(body: &str) -> String {
    document("RDF Class", body)
}

pub fn skos_document(body: &str) -> String {
    document("SKOS", body)
}

/// Typed-node declarations for `triples`, one node per run of equal
/// subjects. Every object is written as element text, and a missing object
/// becomes `tv:__`.
pub fn declarations(triples: &[FixtureTriple], term_class: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut index = 0;
    while index < triples.len() {
        let subject = triples[index].0;
        let mut children = Vec::new();
        while index < triples.len() && triples[index].0 == subject {
            let (_, predicate, object) = triples[index];
            let object = expand_test_prefix(object.unwrap_or("tv:__"));
            children.push(format!("  <{predicate}>{object}</{predicate}>"));
            index += 1;
        }
        out.push(format!(
            r#"<{term_class} rdf:about="{}">"#,
            expand_test_prefix(subject)
        ));
        out.push(children.join("\n  "));
        out.push(format!("</{term_class}>"));
    }
    out.join("\n")
}

fn expand_test_prefix(value: &str) -> String {
    value.replace("tv:", TEST_NAMESPACE)
}
