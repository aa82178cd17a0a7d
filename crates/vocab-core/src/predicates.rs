//! Canonical names of the predicates and node types the stack understands.

/// Type assertion.
pub const RDF_TYPE: &str = "rdf:type";
/// Identity attribute of a subject node.
pub const RDF_ABOUT: &str = "rdf:about";
/// Resource reference attribute of a property element.
pub const RDF_RESOURCE: &str = "rdf:resource";

/// Term is provisional.
pub const IVOASEM_PRELIMINARY: &str = "ivoasem:preliminary";
/// Term is deprecated.
pub const IVOASEM_DEPRECATED: &str = "ivoasem:deprecated";
/// Replacement pointer for a deprecated term.
pub const IVOASEM_USE_INSTEAD: &str = "ivoasem:useInstead";
/// Vocabulary flavour declaration.
pub const IVOASEM_VOCFLAVOUR: &str = "ivoasem:vocflavour";

pub const RDFS_LABEL: &str = "rdfs:label";
pub const RDFS_COMMENT: &str = "rdfs:comment";
pub const RDFS_SUBCLASS_OF: &str = "rdfs:subClassOf";
pub const RDFS_SUBPROPERTY_OF: &str = "rdfs:subPropertyOf";
pub const SKOS_PREF_LABEL: &str = "skos:prefLabel";
pub const SKOS_DEFINITION: &str = "skos:definition";
pub const SKOS_BROADER: &str = "skos:broader";

pub const RDFS_CLASS: &str = "rdfs:Class";
pub const RDF_PROPERTY: &str = "rdf:Property";
pub const SKOS_CONCEPT: &str = "skos:Concept";

/// Element names that declare a term through a typed node.
pub const TYPED_NODE_ELEMENTS: [&str; 3] = [RDF_PROPERTY, RDFS_CLASS, SKOS_CONCEPT];

/// Structural predicates recognized regardless of flavour.
pub const STRUCTURAL_PREDICATES: [&str; 6] = [
    RDF_TYPE,
    RDF_ABOUT,
    IVOASEM_PRELIMINARY,
    IVOASEM_DEPRECATED,
    IVOASEM_USE_INSTEAD,
    IVOASEM_VOCFLAVOUR,
];
