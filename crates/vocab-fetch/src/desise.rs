//! # Desise
//!
//! The "dead simple semantics" JSON rendering of an IVOA vocabulary. It
//! lists every term with its label, description, and relations:
//!
//! ```json
//! {
//!   "uri": "http://www.ivoa.net/rdf/datalink/core",
//!   "flavour": "RDF Property",
//!   "terms": {
//!     "calibration": {
//!       "label": "Calibration application",
//!       "description": "Calibration data...",
//!       "wider": [],
//!       "narrower": ["bias", "dark"]
//!     },
//!     "old-term": {"label": "…", "description": "…", "deprecated": "", "useInstead": "new-term"}
//!   }
//! }
//! ```
//!
//! Flags such as `deprecated` and `preliminary` are signalled by the
//! presence of the key; their value is irrelevant. Unknown keys are ignored.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A decoded desise document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Desise {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub flavour: Option<String>,
    #[serde(default)]
    pub terms: BTreeMap<String, DesiseTerm>,
}

/// One term of a desise document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DesiseTerm {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub wider: Vec<String>,
    #[serde(default)]
    pub narrower: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preliminary: Option<serde_json::Value>,
    #[serde(default, rename = "useInstead", skip_serializing_if = "Option::is_none")]
    pub use_instead: Option<String>,
}

impl DesiseTerm {
    pub fn is_deprecated(&self) -> bool {
        self.deprecated.is_some()
    }

    pub fn is_preliminary(&self) -> bool {
        self.preliminary.is_some()
    }
}

impl Desise {
    pub fn term(&self, ident: &str) -> Option<&DesiseTerm> {
        self.terms.get(ident)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_flags_by_presence() {
        let desise: Desise = serde_json::from_str(
            r#"{"uri": "http://www.ivoa.net/rdf/test",
                "flavour": "SKOS",
                "terms": {
                  "old": {"label": "Old", "description": "d", "deprecated": "", "useInstead": "new"},
                  "new": {"label": "New", "description": "d", "preliminary": "", "wider": ["old"]}
                },
                "extra": 42}"#,
        )
        .unwrap();
        let old = desise.term("old").unwrap();
        assert!(old.is_deprecated());
        assert_eq!(old.use_instead.as_deref(), Some("new"));
        let new = desise.term("new").unwrap();
        assert!(!new.is_deprecated());
        assert!(new.is_preliminary());
        assert_eq!(new.wider, ["old"]);
        assert_eq!(desise.flavour.as_deref(), Some("SKOS"));
    }

    #[test]
    fn missing_fields_default() {
        let desise: Desise = serde_json::from_str(r#"{"terms": {"x": {}}}"#).unwrap();
        let x = desise.term("x").unwrap();
        assert!(x.label.is_none());
        assert!(x.wider.is_empty());
        assert!(desise.uri.is_none());
    }
}
