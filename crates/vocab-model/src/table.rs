//! # Predicate Table
//!
//! Triples grouped by predicate. Every builder step asks "all pairs for
//! predicate P", so the table is keyed that way. Within a predicate, pairs
//! keep their document order and duplicates are preserved.

use std::collections::HashMap;

use serde::Serialize;
use vocab_core::Triple;

/// The (subject, object) half of a triple, once its predicate is known.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Pair {
    pub subject: String,
    pub object: Option<String>,
}

impl Pair {
    /// The object, or the empty string for flag triples.
    pub fn object_str(&self) -> &str {
        self.object.as_deref().unwrap_or("")
    }
}

/// Triples grouped by predicate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredicateTable {
    groups: Vec<(String, Vec<Pair>)>,
    index: HashMap<String, usize>,
}

impl PredicateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group `triples` by predicate. Predicates are kept in order of first
    /// appearance.
    pub fn from_triples<I>(triples: I) -> Self
    where
        I: IntoIterator<Item = Triple>,
    {
        let mut table = Self::new();
        for triple in triples {
            table.push(triple);
        }
        table
    }

    pub fn push(&mut self, triple: Triple) {
        let Triple {
            subject,
            predicate,
            object,
        } = triple;
        let pair = Pair { subject, object };
        match self.index.get(&predicate) {
            Some(&slot) => self.groups[slot].1.push(pair),
            None => {
                self.index.insert(predicate.clone(), self.groups.len());
                self.groups.push((predicate, vec![pair]));
            }
        }
    }

    /// All pairs for `predicate`, empty if the predicate never occurred.
    pub fn pairs(&self, predicate: &str) -> &[Pair] {
        self.index
            .get(predicate)
            .map(|&slot| self.groups[slot].1.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains(&self, predicate: &str) -> bool {
        self.index.contains_key(predicate)
    }

    /// Number of pairs recorded for `predicate`.
    pub fn count(&self, predicate: &str) -> usize {
        self.pairs(predicate).len()
    }

    /// Predicates in order of first appearance.
    pub fn predicates(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(p, _)| p.as_str())
    }

    /// Every triple, grouped by predicate.
    pub fn iter(&self) -> impl Iterator<Item = Triple> + '_ {
        self.groups.iter().flat_map(|(predicate, pairs)| {
            pairs.iter().map(move |pair| Triple {
                subject: pair.subject.clone(),
                predicate: predicate.clone(),
                object: pair.object.clone(),
            })
        })
    }

    /// Flatten back into a triple list.
    ///
    /// Regrouping the result yields an equal table.
    pub fn triples(&self) -> Vec<Triple> {
        self.iter().collect()
    }

    /// Total number of triples.
    pub fn len(&self) -> usize {
        self.groups.iter().map(|(_, pairs)| pairs.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl FromIterator<Triple> for PredicateTable {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        Self::from_triples(iter)
    }
}
