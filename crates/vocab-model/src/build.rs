//! # Vocabulary Builder
//!
//! Folds a [`PredicateTable`] into a [`Vocabulary`]. The flavour is resolved
//! first because it decides which predicates carry labels, definitions, and
//! the wider relation. Then terms, hierarchy, deprecation, and preliminary
//! status are filled in, in that order.
//!
//! Only subjects under the vocabulary URI contribute to the term maps.
//! Inconsistencies are recorded as errors on the model; the only hard
//! failure is a flavour literal nobody knows how to interpret.

use std::collections::HashMap;
use std::io::BufRead;
use std::str::FromStr;

use vocab_core::predicates::{
    IVOASEM_DEPRECATED, IVOASEM_PRELIMINARY, IVOASEM_USE_INSTEAD, IVOASEM_VOCFLAVOUR, RDF_TYPE,
};
use vocab_core::{Flavour, Triple};
use vocab_rdfx::RdfxExtractor;

use crate::error::BuildError;
use crate::table::PredicateTable;
use crate::vocabulary::{TermEntry, Vocabulary};

const NO_FLAVOUR: &str = "No ivoasem:vocflavour declared.  Is this an IVOA vocabulary?";
const SEVERAL_FLAVOURS: &str = "More than one ivoasem:vocflavour clause found.  \
     Picking one at random.  This is going to be trouble.";

impl Vocabulary {
    /// Build a vocabulary from grouped triples.
    ///
    /// Without a flavour declaration the result is an empty model with an
    /// error recorded. With several declarations the first one is used.
    ///
    /// # Errors
    ///
    /// [`BuildError::UnknownFlavour`] when the declared flavour literal is
    /// not recognized.
    pub fn build(table: &PredicateTable) -> Result<Self, BuildError> {
        let mut voc = Vocabulary::default();

        let declarations = table.pairs(IVOASEM_VOCFLAVOUR);
        let Some(declaration) = declarations.first() else {
            voc.diagnostics.error(NO_FLAVOUR);
            return Ok(voc);
        };
        if declarations.len() > 1 {
            voc.diagnostics.error(SEVERAL_FLAVOURS);
        }
        voc.uri = declaration.subject.clone();

        let flavour = match declaration.object_str().parse::<Flavour>() {
            Ok(flavour) => flavour,
            Err(unknown) => {
                voc.diagnostics.error(format!(
                    "Flavour {} unknown.  This must be one of {}.",
                    unknown.0,
                    Flavour::known_names()
                ));
                tracing::warn!(uri = %voc.uri, flavour = %unknown.0, "unknown vocabulary flavour");
                return Err(BuildError::UnknownFlavour {
                    flavour: unknown.0,
                    partial: Box::new(voc),
                });
            }
        };
        voc.flavour = Some(flavour);

        voc.fold_terms(table, flavour);
        voc.fold_hierarchy(table, flavour);
        voc.fold_deprecation(table);
        voc.fold_preliminary(table);

        tracing::debug!(
            uri = %voc.uri,
            flavour = %flavour,
            terms = voc.terms.len(),
            deprecated = voc.deprecated_terms.len(),
            errors = voc.errors().len(),
            "built vocabulary"
        );
        Ok(voc)
    }

    /// Group `triples` and build.
    pub fn from_triples<I>(triples: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = Triple>,
    {
        Self::build(&PredicateTable::from_triples(triples))
    }

    /// Extract triples from an RDF/XML document and build.
    pub fn from_reader<R: BufRead>(input: R) -> Result<Self, BuildError> {
        let extraction = RdfxExtractor::new().extract(input)?;
        Self::from_triples(extraction.triples)
    }

    fn fold_terms(&mut self, table: &PredicateTable, flavour: Flavour) {
        let props = flavour.properties();
        // Later values override earlier ones.
        let labels: HashMap<&str, Option<&str>> = table
            .pairs(props.label)
            .iter()
            .map(|p| (p.subject.as_str(), p.object.as_deref()))
            .collect();
        let definitions: HashMap<&str, Option<&str>> = table
            .pairs(props.definition)
            .iter()
            .map(|p| (p.subject.as_str(), p.object.as_deref()))
            .collect();

        for pair in table.pairs(RDF_TYPE) {
            if pair.object.as_deref() != Some(flavour.term_type()) || !self.contains_uri(&pair.subject) {
                continue;
            }
            let subject = pair.subject.as_str();
            let entry = TermEntry {
                label: labels.get(subject).copied().flatten().map(str::to_string),
                definition: definitions.get(subject).copied().flatten().map(str::to_string),
            };
            let term = self.to_term(subject).to_string();
            self.terms.insert(term, entry);
        }
    }

    fn fold_hierarchy(&mut self, table: &PredicateTable, flavour: Flavour) {
        for pair in table.pairs(flavour.properties().wider) {
            if !self.contains_uri(&pair.subject) {
                continue;
            }
            let term = self.to_term(&pair.subject).to_string();
            let wider = self.to_term(pair.object_str()).to_string();
            self.wider_terms.entry(term).or_default().push(wider);
        }
    }

    fn fold_deprecation(&mut self, table: &PredicateTable) {
        for pair in table.pairs(IVOASEM_DEPRECATED) {
            if self.contains_uri(&pair.subject) {
                let term = self.to_term(&pair.subject).to_string();
                self.deprecated_terms.insert(term, Vec::new());
            }
        }

        for pair in table.pairs(IVOASEM_USE_INSTEAD) {
            if !self.contains_uri(&pair.subject) {
                continue;
            }
            let term = self.to_term(&pair.subject).to_string();
            let replacement = self.to_term(pair.object_str()).to_string();
            match self.deprecated_terms.get_mut(&term) {
                Some(replacements) => replacements.push(replacement),
                None => self.diagnostics.error(format!(
                    "UseInstead given for non-deprecated term {term}.  Ignoring."
                )),
            }
        }
    }

    fn fold_preliminary(&mut self, table: &PredicateTable) {
        for pair in table.pairs(IVOASEM_PRELIMINARY) {
            if self.contains_uri(&pair.subject) {
                let term = self.to_term(&pair.subject).to_string();
                self.preliminary_terms.insert(term);
            }
        }
    }
}

impl FromStr for Vocabulary {
    type Err = BuildError;

    /// Extract triples from an RDF/XML string and build.
    fn from_str(document: &str) -> Result<Self, Self::Err> {
        Self::from_reader(document.as_bytes())
    }
}
