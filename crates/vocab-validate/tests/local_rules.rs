//! Local validation of complete RDF/XML documents.

use std::collections::BTreeSet;

use vocab_rdfx::fixtures::{
    class_document, declarations, property_document, skos_document, FixtureTriple,
    COMMON_RDFS_TRIPLES, COMMON_SKOS_TRIPLES, TEST_VOCABULARY_URI,
};
use vocab_validate::ValidatingVocabulary;

fn validate(document: &str) -> ValidatingVocabulary {
    document.parse().unwrap()
}

fn with_common(common: &[FixtureTriple], extra: &[FixtureTriple]) -> Vec<FixtureTriple> {
    [common, extra].concat()
}

fn set(messages: &[String]) -> BTreeSet<&str> {
    messages.iter().map(String::as_str).collect()
}

#[test]
fn test_mixed_term_types_error() {
    let voc = validate(&property_document(&format!(
        "{}{}",
        declarations(COMMON_RDFS_TRIPLES, "rdf:Property"),
        r#"<skos:Concept rdf:about="http://www.ivoa.net/rdf/test#extra"><skos:prefLabel>skos term</skos:prefLabel><skos:definition>Must raise an error because it is skos</skos:definition></skos:Concept>"#
    )));
    assert_eq!(
        voc.errors(),
        ["http://www.ivoa.net/rdf/test#extra has type skos:Concept, which is forbidden in RDF Property vocabularies"]
    );
}

#[test]
fn test_skos_mixed_term_types_error() {
    let voc = validate(&skos_document(&format!(
        "{}{}{}",
        declarations(COMMON_SKOS_TRIPLES, "skos:Concept"),
        r#"<rdf:Property rdf:about="http://www.ivoa.net/rdf/test#extra"><rdfs:label>skos term</rdfs:label><rdfs:comment>Must raise an error because it is a property</rdfs:comment></rdf:Property>"#,
        r#"<rdfs:Class rdf:about="http://www.ivoa.net/rdf/test#cls"><rdfs:label>a class</rdfs:label><rdfs:comment>Must raise an error because it is a class</rdfs:comment></rdfs:Class>"#,
    )));
    assert_eq!(
        set(voc.errors()),
        BTreeSet::from([
            "http://www.ivoa.net/rdf/test#extra has type rdf:Property, which is forbidden in SKOS vocabularies",
            "http://www.ivoa.net/rdf/test#cls has type rdfs:Class, which is forbidden in SKOS vocabularies",
        ])
    );
}

#[test]
fn test_forbidden_property_warnings() {
    let voc = validate(&property_document(&declarations(
        &with_common(
            COMMON_RDFS_TRIPLES,
            &[
                ("tv:test", "skos:broader", Some("tv:second")),
                ("tv:stinky", "rdfs:subClassOf", Some("tv:experimental")),
            ],
        ),
        "rdf:Property",
    )));
    assert_eq!(
        set(voc.warnings()),
        BTreeSet::from([
            "Forbidden triple in RDF Property vocabularies: http://www.ivoa.net/rdf/test#stinky rdfs:subClassOf http://www.ivoa.net/rdf/test#experimental",
            "Forbidden triple in RDF Property vocabularies: http://www.ivoa.net/rdf/test#test skos:broader http://www.ivoa.net/rdf/test#second",
        ])
    );
}

#[test]
fn test_skos_forbidden_property_warnings() {
    let voc = validate(&skos_document(&declarations(
        &with_common(
            COMMON_SKOS_TRIPLES,
            &[
                ("tv:test", "rdfs:subPropertyOf", Some("tv:stinky")),
                ("tv:test", "rdfs:subClassOf", Some("tv:second")),
            ],
        ),
        "skos:Concept",
    )));
    assert_eq!(
        set(voc.warnings()),
        BTreeSet::from([
            "Forbidden triple in SKOS vocabularies: http://www.ivoa.net/rdf/test#test rdfs:subClassOf http://www.ivoa.net/rdf/test#second",
            "Forbidden triple in SKOS vocabularies: http://www.ivoa.net/rdf/test#test rdfs:subPropertyOf http://www.ivoa.net/rdf/test#stinky",
        ])
    );
}

#[test]
fn test_incomplete_definition_errors() {
    let voc = validate(&class_document(&declarations(
        &with_common(
            COMMON_RDFS_TRIPLES,
            &[
                ("tv:labelOnly", "rdfs:label", Some("Missing Def")),
                ("tv:defOnly", "rdfs:comment", Some("Missing Label")),
            ],
        ),
        "rdfs:Class",
    )));
    assert_eq!(
        set(voc.errors()),
        BTreeSet::from(["Term labelOnly has no definition.", "Term defOnly has no label."])
    );
}

#[test]
fn test_recursive_definition_warning() {
    let voc = validate(&class_document(&declarations(
        &with_common(
            COMMON_RDFS_TRIPLES,
            &[
                ("tv:testCase", "rdfs:label", Some("Test Case")),
                ("tv:testCase", "rdfs:comment", Some("A term used in a test case.")),
            ],
        ),
        "rdfs:Class",
    )));
    assert_eq!(
        voc.warnings(),
        ["Term testCase repeats its label or fragment in its definition."]
    );
}

#[test]
fn test_no_typed_node_error() {
    let voc = validate(&class_document(&format!(
        "{}{}{}",
        declarations(COMMON_RDFS_TRIPLES, "rdfs:Class"),
        r#"<rdf:Description rdf:about="http://www.ivoa.net/rdf/test#tech">
            <rdf:type rdf:resource="http://www.w3.org/2000/01/rdf-schema#Class"/>
            <rdfs:label>a label</rdfs:label>
            <rdfs:comment>shut up the validator</rdfs:comment>
        </rdf:Description>"#,
        r#"<rdf:Description rdf:about="http://www.ivoa.net/rdf/test#p">
            <rdf:type rdf:resource="http://www.w3.org/1999/02/22-rdf-syntax-ns#Property"/>
            <rdfs:label>another label</rdfs:label>
            <rdfs:comment>shut up the validator again</rdfs:comment>
        </rdf:Description>"#,
    )));
    assert_eq!(
        set(voc.errors()),
        BTreeSet::from([
            "http://www.ivoa.net/rdf/test#p has type rdf:Property, which is forbidden in RDF Class vocabularies",
            "Term tech not defined through a typed node",
        ])
    );
}

#[test]
fn test_non_ivoa_uri_errors() {
    let document = class_document(&declarations(COMMON_RDFS_TRIPLES, "rdfs:Class"))
        .replace(TEST_VOCABULARY_URI, "http://test.voc");
    let voc = validate(&document);
    assert_eq!(
        voc.errors(),
        ["Vocabulary URI http://test.voc does not start with the canonical IVOA vocabulary URI root."]
    );
}

#[test]
fn test_uri_with_hierarchy_warnings() {
    let document = class_document(&declarations(COMMON_RDFS_TRIPLES, "rdfs:Class"))
        .replace(TEST_VOCABULARY_URI, "http://www.ivoa.net/rdf/maint/test");
    let voc = validate(&document);
    assert_eq!(
        voc.warnings(),
        ["Vocabularies URIs should not introduce additional hierarchy below w.i.n/rdf."]
    );
}

#[test]
fn test_bad_term_name_errors() {
    let voc = validate(&class_document(&declarations(
        &with_common(
            COMMON_RDFS_TRIPLES,
            &[
                ("tv:$ANYTHING", "rdfs:label", Some("wildcard")),
                ("tv:$ANYTHING", "rdfs:comment", Some("This is invalid")),
            ],
        ),
        "rdfs:Class",
    )));
    assert_eq!(
        voc.errors(),
        ["IVOA terms can only contain ASCII letters, digits, underscores, and dashes; $ANYTHING has '$'"]
    );
}

#[test]
fn test_nontree_errors() {
    let voc = validate(&class_document(&declarations(
        &with_common(
            COMMON_RDFS_TRIPLES,
            &[
                ("tv:test", "rdfs:subClassOf", Some("tv:second")),
                ("tv:test", "rdfs:subClassOf", Some("tv:stinky")),
            ],
        ),
        "rdfs:Class",
    )));
    assert_eq!(
        voc.errors(),
        ["Terms in non-SKOS vocabularies may only have up to one wider term, but test has second, stinky."]
    );
}

#[test]
fn test_sibling_subclasses_are_not_a_nontree() {
    let voc = validate(&class_document(&declarations(
        &with_common(
            COMMON_RDFS_TRIPLES,
            &[
                ("tv:stinky", "rdfs:subClassOf", Some("tv:test")),
                ("tv:experimental", "rdfs:subClassOf", Some("tv:test")),
            ],
        ),
        "rdfs:Class",
    )));
    assert!(voc.errors().is_empty(), "unexpected errors: {:?}", voc.errors());
}

#[test]
fn test_skos_related_is_one_warning() {
    let voc = validate(&skos_document(&declarations(
        &with_common(
            COMMON_SKOS_TRIPLES,
            &[
                ("tv:second", "skos:related", Some("tv:test")),
                ("tv:second", "skos:related", Some("tv:stinky")),
            ],
        ),
        "skos:Concept",
    )));
    assert_eq!(
        voc.warnings(),
        ["IVOA SKOS vocabularies should not use the skos:related property for now (used here 2 time(s))."]
    );
    assert!(voc.errors().is_empty(), "unexpected errors: {:?}", voc.errors());
}

#[test]
fn test_clean_vocabularies_validate_cleanly() {
    for document in [
        property_document(&declarations(COMMON_RDFS_TRIPLES, "rdf:Property")),
        class_document(&declarations(COMMON_RDFS_TRIPLES, "rdfs:Class")),
        skos_document(&declarations(COMMON_SKOS_TRIPLES, "skos:Concept")),
    ] {
        let voc = validate(&document);
        assert!(voc.errors().is_empty(), "unexpected errors: {:?}", voc.errors());
        assert!(voc.warnings().is_empty(), "unexpected warnings: {:?}", voc.warnings());
    }
}

#[test]
fn test_validation_is_idempotent() {
    let voc = validate(&class_document(&declarations(
        &with_common(
            COMMON_RDFS_TRIPLES,
            &[
                ("tv:test", "rdfs:subClassOf", Some("tv:second")),
                ("tv:test", "rdfs:subClassOf", Some("tv:stinky")),
                ("tv:labelOnly", "rdfs:label", Some("Missing Def")),
            ],
        ),
        "rdfs:Class",
    )));
    let first = voc.findings();
    let second = voc.findings();
    assert_eq!(first, second);

    let errors: Vec<&str> = first
        .iter()
        .filter(|f| f.is_error())
        .map(|f| f.message.as_str())
        .collect();
    assert_eq!(voc.errors(), errors.as_slice());
}
