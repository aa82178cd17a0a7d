//! # The Vocabulary Model
//!
//! A read-only view of an IVOA vocabulary: its URI, its flavour, and the
//! term-keyed maps a downstream tool needs. The model is built once by
//! [`Vocabulary::build`](crate::build) and never mutated afterwards, except
//! that its diagnostics may grow when validation rules run over it.
//!
//! All maps are ordered by term so that iteration, JSON output, and
//! diagnostics are reproducible across runs.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use vocab_core::{Diagnostics, Finding, Flavour};

/// URI reported by a vocabulary whose flavour declaration was never found.
pub const URI_NOT_FOUND: &str = "Vocabulary URI not found in RDF/X";

/// Label and definition of a single term. Either may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TermEntry {
    pub label: Option<String>,
    pub definition: Option<String>,
}

/// An IVOA vocabulary folded from its triples.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vocabulary {
    pub(crate) uri: String,
    pub(crate) flavour: Option<Flavour>,
    pub(crate) terms: BTreeMap<String, TermEntry>,
    pub(crate) deprecated_terms: BTreeMap<String, Vec<String>>,
    pub(crate) preliminary_terms: BTreeSet<String>,
    pub(crate) wider_terms: BTreeMap<String, Vec<String>>,
    #[serde(flatten)]
    pub(crate) diagnostics: Diagnostics,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            uri: URI_NOT_FOUND.to_string(),
            flavour: None,
            terms: BTreeMap::new(),
            deprecated_terms: BTreeMap::new(),
            preliminary_terms: BTreeSet::new(),
            wider_terms: BTreeMap::new(),
            diagnostics: Diagnostics::new(),
        }
    }
}

impl Vocabulary {
    /// The vocabulary URI, or [`URI_NOT_FOUND`].
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// The declared flavour; `None` if no flavour was declared.
    pub fn flavour(&self) -> Option<Flavour> {
        self.flavour
    }

    /// Term → label and definition.
    pub fn terms(&self) -> &BTreeMap<String, TermEntry> {
        &self.terms
    }

    /// Deprecated term → replacement terms. An empty list means the term
    /// was deprecated without replacement.
    pub fn deprecated_terms(&self) -> &BTreeMap<String, Vec<String>> {
        &self.deprecated_terms
    }

    pub fn preliminary_terms(&self) -> &BTreeSet<String> {
        &self.preliminary_terms
    }

    /// Term → wider terms, in document order.
    pub fn wider_terms(&self) -> &BTreeMap<String, Vec<String>> {
        &self.wider_terms
    }

    pub fn is_term(&self, term: &str) -> bool {
        self.terms.contains_key(term)
    }

    pub fn is_deprecated(&self, term: &str) -> bool {
        self.deprecated_terms.contains_key(term)
    }

    /// The first term in iteration order, if any.
    pub fn first_term(&self) -> Option<&str> {
        self.terms.keys().next().map(String::as_str)
    }

    pub fn errors(&self) -> &[String] {
        self.diagnostics.errors()
    }

    pub fn warnings(&self) -> &[String] {
        self.diagnostics.warnings()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Append a finding. Diagnostics are the only part of the model that
    /// may change after construction.
    pub fn record(&mut self, finding: Finding) {
        self.diagnostics.record(finding);
    }

    pub fn record_all<I: IntoIterator<Item = Finding>>(&mut self, findings: I) {
        self.diagnostics.extend(findings);
    }

    /// The term behind `uri` if it lies in this vocabulary's namespace,
    /// `uri` unchanged otherwise.
    ///
    /// The vocabulary URI and the single separator character after it
    /// (normally `#`) are stripped.
    pub fn to_term<'a>(&self, uri: &'a str) -> &'a str {
        match uri.strip_prefix(self.uri.as_str()) {
            Some(rest) => {
                let mut chars = rest.chars();
                chars.next();
                chars.as_str()
            }
            None => uri,
        }
    }

    /// Whether `uri` lies under this vocabulary's URI.
    pub fn contains_uri(&self, uri: &str) -> bool {
        uri.starts_with(self.uri.as_str())
    }
}
