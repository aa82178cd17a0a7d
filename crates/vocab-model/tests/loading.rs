//! Loading complete RDF/XML documents of each flavour.

use std::collections::BTreeSet;

use vocab_core::Flavour;
use vocab_model::{TermEntry, Vocabulary};
use vocab_rdfx::fixtures::{
    class_document, declarations, property_document, skos_document, FixtureTriple,
    COMMON_RDFS_TRIPLES, COMMON_SKOS_TRIPLES, TEST_VOCABULARY_URI,
};

fn with_common(extra: &[FixtureTriple], common: &[FixtureTriple]) -> Vec<FixtureTriple> {
    [extra, common].concat()
}

fn assert_common(voc: &Vocabulary) {
    assert_eq!(voc.uri(), TEST_VOCABULARY_URI);
    assert_eq!(
        voc.terms()["test"],
        TermEntry {
            label: Some("My first term".into()),
            definition: Some("No semantics attached".into()),
        }
    );
    assert_eq!(voc.terms().len(), 4);
    assert_eq!(voc.deprecated_terms()["test"], ["second"]);
    assert!(voc.deprecated_terms()["stinky"].is_empty());
    assert_eq!(
        voc.preliminary_terms(),
        &BTreeSet::from(["experimental".to_string()])
    );
    assert_eq!(voc.wider_terms()["stinky"], ["test"]);
    assert!(voc.errors().is_empty(), "unexpected errors: {:?}", voc.errors());
}

#[test]
fn test_loading_property_vocabulary() {
    let doc = property_document(&declarations(
        &with_common(&[("tv:stinky", "rdfs:subPropertyOf", Some("tv:test"))], COMMON_RDFS_TRIPLES),
        "rdf:Property",
    ));
    let voc: Vocabulary = doc.parse().unwrap();
    assert_eq!(voc.flavour(), Some(Flavour::RdfProperty));
    assert_common(&voc);
}

#[test]
fn test_loading_class_vocabulary() {
    let doc = class_document(&declarations(
        &with_common(&[("tv:stinky", "rdfs:subClassOf", Some("tv:test"))], COMMON_RDFS_TRIPLES),
        "rdfs:Class",
    ));
    let voc: Vocabulary = doc.parse().unwrap();
    assert_eq!(voc.flavour(), Some(Flavour::RdfClass));
    assert_common(&voc);
}

#[test]
fn test_loading_skos_vocabulary() {
    let doc = skos_document(&declarations(COMMON_SKOS_TRIPLES, "skos:Concept"));
    let voc: Vocabulary = doc.parse().unwrap();
    assert_eq!(voc.flavour(), Some(Flavour::Skos));
    assert_eq!(voc.wider_terms()["experimental"], ["test", "second"]);
    assert_common(&voc);
}

#[test]
fn test_loading_hierarchy_from_untyped_description() {
    let doc = property_document(&format!(
        "{}{}",
        declarations(COMMON_RDFS_TRIPLES, "rdf:Property"),
        r#"<rdf:Description rdf:about="http://www.ivoa.net/rdf/test#stinky"><rdfs:subPropertyOf rdf:resource="http://www.ivoa.net/rdf/test#test"/></rdf:Description>"#
    ));
    let voc = Vocabulary::from_reader(doc.as_bytes()).unwrap();
    assert_common(&voc);
}

#[test]
fn test_first_term_is_alphabetical() {
    let doc = property_document(&declarations(COMMON_RDFS_TRIPLES, "rdf:Property"));
    let voc: Vocabulary = doc.parse().unwrap();
    assert_eq!(voc.first_term(), Some("experimental"));
}

#[test]
fn test_building_twice_gives_equal_models() {
    let doc = skos_document(&declarations(COMMON_SKOS_TRIPLES, "skos:Concept"));
    let first: Vocabulary = doc.parse().unwrap();
    let second: Vocabulary = doc.parse().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_malformed_document_is_an_extract_error() {
    let err = "<rdf:RDF".parse::<Vocabulary>().unwrap_err();
    assert!(matches!(err, vocab_model::BuildError::Extract(_)));
}

#[test]
fn test_model_serializes_to_json() {
    let doc = property_document(&declarations(COMMON_RDFS_TRIPLES, "rdf:Property"));
    let voc: Vocabulary = doc.parse().unwrap();
    let json = serde_json::to_value(&voc).unwrap();
    assert_eq!(json["flavour"], "RDF Property");
    assert_eq!(json["terms"]["second"]["label"], "My second term");
    assert_eq!(json["deprecated_terms"]["test"][0], "second");
}
