//! # Vocabulary Flavours
//!
//! Version 2 of Vocabularies in the VO admits three flavours. The flavour
//! decides which predicates carry labels, definitions, and the wider-term
//! relation, and which node type declares a term.
//!
//! | Flavour        | label            | definition        | wider                | term type      |
//! |----------------|------------------|-------------------|----------------------|----------------|
//! | `RDF Class`    | `rdfs:label`     | `rdfs:comment`    | `rdfs:subClassOf`    | `rdfs:Class`   |
//! | `RDF Property` | `rdfs:label`     | `rdfs:comment`    | `rdfs:subPropertyOf` | `rdf:Property` |
//! | `SKOS`         | `skos:prefLabel` | `skos:definition` | `skos:broader`       | `skos:Concept` |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownFlavourError;
use crate::predicates::*;

/// The structural dialect of a vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Flavour {
    #[serde(rename = "RDF Class")]
    RdfClass,
    #[serde(rename = "RDF Property")]
    RdfProperty,
    #[serde(rename = "SKOS")]
    Skos,
}

/// Predicates carrying flavour-specific semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlavourProperties {
    /// Predicate holding a term's human-readable label.
    pub label: &'static str,
    /// Predicate holding a term's definition.
    pub definition: &'static str,
    /// Predicate pointing from a term to a wider term.
    pub wider: &'static str,
}

const RDF_CLASS_PROPERTIES: FlavourProperties = FlavourProperties {
    label: RDFS_LABEL,
    definition: RDFS_COMMENT,
    wider: RDFS_SUBCLASS_OF,
};

const RDF_PROPERTY_PROPERTIES: FlavourProperties = FlavourProperties {
    label: RDFS_LABEL,
    definition: RDFS_COMMENT,
    wider: RDFS_SUBPROPERTY_OF,
};

const SKOS_PROPERTIES: FlavourProperties = FlavourProperties {
    label: SKOS_PREF_LABEL,
    definition: SKOS_DEFINITION,
    wider: SKOS_BROADER,
};

impl Flavour {
    /// All flavours, in the order they are listed to users.
    pub const ALL: [Flavour; 3] = [Flavour::RdfClass, Flavour::RdfProperty, Flavour::Skos];

    /// The literal used in `ivoasem:vocflavour` declarations.
    pub fn as_str(self) -> &'static str {
        match self {
            Flavour::RdfClass => "RDF Class",
            Flavour::RdfProperty => "RDF Property",
            Flavour::Skos => "SKOS",
        }
    }

    /// The label/definition/wider predicates for this flavour.
    pub fn properties(self) -> &'static FlavourProperties {
        match self {
            Flavour::RdfClass => &RDF_CLASS_PROPERTIES,
            Flavour::RdfProperty => &RDF_PROPERTY_PROPERTIES,
            Flavour::Skos => &SKOS_PROPERTIES,
        }
    }

    /// The `rdf:type` object that declares a term in this flavour.
    pub fn term_type(self) -> &'static str {
        match self {
            Flavour::RdfClass => RDFS_CLASS,
            Flavour::RdfProperty => RDF_PROPERTY,
            Flavour::Skos => SKOS_CONCEPT,
        }
    }

    /// Whether the wider relation may branch (poly-hierarchy).
    pub fn allows_polyhierarchy(self) -> bool {
        matches!(self, Flavour::Skos)
    }

    /// Comma-separated list of all flavour names, for messages.
    pub fn known_names() -> String {
        Self::ALL
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Flavour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Flavour {
    type Err = UnknownFlavourError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| UnknownFlavourError(s.to_string()))
    }
}
