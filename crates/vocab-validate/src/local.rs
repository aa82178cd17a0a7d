//! # Local Validation
//!
//! Rules evaluated over a freshly built [`Vocabulary`], its predicate table,
//! and the out-of-band records a validating extractor keeps. Findings are
//! appended to the vocabulary's own diagnostics, after whatever the builder
//! recorded.
//!
//! | Rule                     | Applies to              | Severity        |
//! |--------------------------|-------------------------|-----------------|
//! | `clean_flavour`          | any declared flavour    | warning / error |
//! | `term_form`              | all                     | error           |
//! | `complete_terms`         | all                     | error           |
//! | `suspicious_definitions` | all                     | warning         |
//! | `typed_node_form`        | all                     | error           |
//! | `vocabulary_uri`         | any declared flavour    | warning / error |
//! | `extra_skos_properties`  | SKOS                    | warning         |
//! | `treelike`               | RDF Class, RDF Property | error           |
//! | `use_instead_targets`    | all                     | error           |
//! | `dangling_references`    | all                     | error           |

use std::collections::{BTreeMap, HashSet};
use std::io::BufRead;
use std::ops::Deref;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use vocab_core::predicates::{
    RDFS_SUBCLASS_OF, RDFS_SUBPROPERTY_OF, RDF_TYPE, SKOS_BROADER, SKOS_DEFINITION,
    SKOS_PREF_LABEL, TYPED_NODE_ELEMENTS,
};
use vocab_core::{Finding, Flavour, IVOA_VOCABULARY_ROOT};
use vocab_model::{BuildError, PredicateTable, Vocabulary};
use vocab_rdfx::{Extraction, RdfxExtractor};

use crate::engine::{FailureMode, Rule, RuleEngine, RuleFault, RuleResult};

/// Everything a local rule may look at.
#[derive(Debug, Clone, Copy)]
pub struct LocalContext<'a> {
    pub vocabulary: &'a Vocabulary,
    pub table: &'a PredicateTable,
    /// Subjects declared through typed nodes, if extraction recorded them.
    pub typed_node_subjects: Option<&'a [String]>,
    /// Element usage counts, if extraction recorded them.
    pub element_counts: Option<&'a BTreeMap<String, usize>>,
}

impl LocalContext<'_> {
    /// How often `predicate` was used in the source document.
    ///
    /// Element counts see predicates that never became triples; without
    /// them, only the triple table can answer.
    pub fn usage(&self, predicate: &str) -> usize {
        match self.element_counts {
            Some(counts) => counts.get(predicate).copied().unwrap_or(0),
            None => self.table.count(predicate),
        }
    }
}

/// SKOS features IVOA vocabularies should not use yet.
pub const DISCOURAGED_SKOS_PREDICATES: [&str; 10] = [
    "skos:related",
    "skos:exactMatch",
    "skos:closeMatch",
    "skos:broadMatch",
    "skos:narrowMatch",
    "skos:ConceptScheme",
    "skos:inScheme",
    "skos:hasTopconcept",
    "skos:altLabel",
    "skos:hiddenLabel",
];

/// Predicates reserved for other flavours.
///
/// `rdfs:label` and `rdfs:comment` are fine in SKOS vocabularies because
/// they describe the vocabulary as a whole.
pub fn forbidden_predicates(flavour: Flavour) -> &'static [&'static str] {
    match flavour {
        Flavour::Skos => &[RDFS_SUBCLASS_OF, RDFS_SUBPROPERTY_OF],
        Flavour::RdfClass => &[RDFS_SUBPROPERTY_OF, SKOS_PREF_LABEL, SKOS_DEFINITION, SKOS_BROADER],
        Flavour::RdfProperty => &[RDFS_SUBCLASS_OF, SKOS_PREF_LABEL, SKOS_DEFINITION, SKOS_BROADER],
    }
}

/// The local rules, in the order they run.
pub fn local_rules<'a>() -> Vec<Rule<LocalContext<'a>>> {
    vec![
        Rule::new("clean_flavour", clean_flavour).when(has_flavour),
        Rule::new("term_form", term_form),
        Rule::new("complete_terms", complete_terms),
        Rule::new("suspicious_definitions", suspicious_definitions),
        Rule::new("typed_node_form", typed_node_form),
        Rule::new("vocabulary_uri", vocabulary_uri).when(has_flavour),
        Rule::new("extra_skos_properties", extra_skos_properties)
            .when(|ctx| ctx.vocabulary.flavour() == Some(Flavour::Skos)),
        Rule::new("treelike", treelike).when(|ctx| {
            ctx.vocabulary
                .flavour()
                .is_some_and(|f| !f.allows_polyhierarchy())
        }),
        Rule::new("use_instead_targets", use_instead_targets),
        Rule::new("dangling_references", dangling_references),
    ]
}

fn has_flavour(ctx: &LocalContext<'_>) -> bool {
    ctx.vocabulary.flavour().is_some()
}

fn clean_flavour(ctx: &LocalContext<'_>) -> RuleResult {
    let Some(flavour) = ctx.vocabulary.flavour() else {
        return Ok(Vec::new());
    };
    let mut findings = Vec::new();

    for &predicate in forbidden_predicates(flavour) {
        for pair in ctx.table.pairs(predicate) {
            findings.push(Finding::warning(format!(
                "Forbidden triple in {flavour} vocabularies: {} {predicate} {}",
                pair.subject,
                pair.object_str()
            )));
        }
    }

    let own_type = flavour.term_type();
    for pair in ctx.table.pairs(RDF_TYPE) {
        let Some(term_type) = pair.object.as_deref() else {
            continue;
        };
        if term_type != own_type && TYPED_NODE_ELEMENTS.contains(&term_type) {
            findings.push(Finding::error(format!(
                "{} has type {term_type}, which is forbidden in {flavour} vocabularies",
                pair.subject
            )));
        }
    }
    Ok(findings)
}

static TERM_FORM_VIOLATION: Lazy<Regex> =
    Lazy::new(|| Regex::new("[^A-Za-z0-9_-]+").expect("term form pattern is a valid regex"));

fn term_form(ctx: &LocalContext<'_>) -> RuleResult {
    Ok(ctx
        .vocabulary
        .terms()
        .keys()
        .filter_map(|term| {
            TERM_FORM_VIOLATION.find(term).map(|bad| {
                Finding::error(format!(
                    "IVOA terms can only contain ASCII letters, digits, underscores, \
                     and dashes; {term} has '{}'",
                    bad.as_str()
                ))
            })
        })
        .collect())
}

fn complete_terms(ctx: &LocalContext<'_>) -> RuleResult {
    let mut findings = Vec::new();
    for (term, entry) in ctx.vocabulary.terms() {
        if entry.label.is_none() {
            findings.push(Finding::error(format!("Term {term} has no label.")));
        }
        if entry.definition.is_none() {
            findings.push(Finding::error(format!("Term {term} has no definition.")));
        }
    }
    Ok(findings)
}

fn suspicious_definitions(ctx: &LocalContext<'_>) -> RuleResult {
    let mut findings = Vec::new();
    for (term, entry) in ctx.vocabulary.terms() {
        let (Some(label), Some(definition)) = (entry.label.as_deref(), entry.definition.as_deref())
        else {
            continue;
        };
        if label.is_empty() || definition.is_empty() {
            continue;
        }
        let definition = definition.to_lowercase();
        if definition.contains(&label.to_lowercase()) || definition.contains(&term.to_lowercase()) {
            findings.push(Finding::warning(format!(
                "Term {term} repeats its label or fragment in its definition."
            )));
        }
    }
    Ok(findings)
}

fn typed_node_form(ctx: &LocalContext<'_>) -> RuleResult {
    let subjects = ctx
        .typed_node_subjects
        .ok_or(RuleFault::MissingRecord("typed-node subjects"))?;
    let declared: HashSet<&str> = subjects
        .iter()
        .map(|s| ctx.vocabulary.to_term(s))
        .collect();

    Ok(ctx
        .vocabulary
        .terms()
        .keys()
        .filter(|term| !declared.contains(term.as_str()))
        .map(|term| Finding::error(format!("Term {term} not defined through a typed node")))
        .collect())
}

fn vocabulary_uri(ctx: &LocalContext<'_>) -> RuleResult {
    let uri = ctx.vocabulary.uri();
    Ok(match uri.strip_prefix(IVOA_VOCABULARY_ROOT) {
        Some(rest) if rest.contains('/') => vec![Finding::warning(
            "Vocabularies URIs should not introduce additional hierarchy below w.i.n/rdf.",
        )],
        Some(_) => Vec::new(),
        None => vec![Finding::error(format!(
            "Vocabulary URI {uri} does not start with the canonical IVOA vocabulary URI root."
        ))],
    })
}

fn extra_skos_properties(ctx: &LocalContext<'_>) -> RuleResult {
    Ok(DISCOURAGED_SKOS_PREDICATES
        .iter()
        .filter_map(|&predicate| {
            let used = ctx.usage(predicate);
            (used > 0).then(|| {
                Finding::warning(format!(
                    "IVOA SKOS vocabularies should not use the {predicate} property \
                     for now (used here {used} time(s))."
                ))
            })
        })
        .collect())
}

fn treelike(ctx: &LocalContext<'_>) -> RuleResult {
    Ok(ctx
        .vocabulary
        .wider_terms()
        .iter()
        .filter(|(_, wider)| wider.len() > 1)
        .map(|(term, wider)| {
            Finding::error(format!(
                "Terms in non-SKOS vocabularies may only have up to one wider term, \
                 but {term} has {}.",
                wider.join(", ")
            ))
        })
        .collect())
}

fn use_instead_targets(ctx: &LocalContext<'_>) -> RuleResult {
    let voc = ctx.vocabulary;
    let mut findings = Vec::new();
    for (term, replacements) in voc.deprecated_terms() {
        for replacement in replacements {
            if !voc.is_term(replacement) {
                findings.push(Finding::error(format!(
                    "Term {term} is to be replaced by {replacement}, which is not a term \
                     of this vocabulary."
                )));
            } else if voc.is_deprecated(replacement) {
                findings.push(Finding::error(format!(
                    "Term {term} is to be replaced by {replacement}, which is itself deprecated."
                )));
            }
        }
    }
    Ok(findings)
}

fn dangling_references(ctx: &LocalContext<'_>) -> RuleResult {
    let voc = ctx.vocabulary;
    let mut findings = Vec::new();

    for term in voc.deprecated_terms().keys() {
        if !voc.is_term(term) {
            findings.push(Finding::error(format!(
                "Term {term} is marked deprecated but never defined."
            )));
        }
    }
    for term in voc.preliminary_terms() {
        if !voc.is_term(term) {
            findings.push(Finding::error(format!(
                "Term {term} is marked preliminary but never defined."
            )));
        }
    }
    for (term, wider) in voc.wider_terms() {
        if !voc.is_term(term) {
            findings.push(Finding::error(format!(
                "Term {term} has wider terms but is never defined."
            )));
        }
        // Absolute URIs point into other vocabularies.
        for parent in wider.iter().filter(|w| !w.contains(':')) {
            if !voc.is_term(parent) {
                findings.push(Finding::error(format!(
                    "Term {term} has wider term {parent}, which is never defined."
                )));
            }
        }
    }
    Ok(findings)
}

/// A vocabulary built from a document and checked by the local rules.
///
/// Dereferences to the [`Vocabulary`]; its errors and warnings include the
/// rule findings.
#[derive(Debug, Clone)]
pub struct ValidatingVocabulary {
    vocabulary: Vocabulary,
    table: PredicateTable,
    typed_node_subjects: Option<Vec<String>>,
    element_counts: Option<BTreeMap<String, usize>>,
}

impl ValidatingVocabulary {
    /// Build and validate from the output of a validating extractor.
    ///
    /// # Errors
    ///
    /// Only when the vocabulary cannot be built at all (unknown flavour).
    pub fn from_extraction(extraction: Extraction) -> Result<Self, BuildError> {
        let Extraction {
            triples,
            typed_node_subjects,
            element_counts,
        } = extraction;
        let table = PredicateTable::from_triples(triples);
        let vocabulary = Vocabulary::build(&table)?;

        let mut validated = Self {
            vocabulary,
            table,
            typed_node_subjects,
            element_counts,
        };
        let findings = validated.findings();
        tracing::debug!(
            uri = validated.vocabulary.uri(),
            findings = findings.len(),
            "local validation complete"
        );
        validated.vocabulary.record_all(findings);
        Ok(validated)
    }

    pub fn from_reader<R: BufRead>(input: R) -> Result<Self, BuildError> {
        let extraction = RdfxExtractor::validating().extract(input)?;
        Self::from_extraction(extraction)
    }

    /// Run the local rules again without recording anything.
    pub fn findings(&self) -> Vec<Finding> {
        let ctx = self.context();
        RuleEngine::new(local_rules())
            .with_mode(FailureMode::Collect)
            .run(&ctx)
            .unwrap_or_else(|bailed| bailed.into_findings())
    }

    pub fn context(&self) -> LocalContext<'_> {
        LocalContext {
            vocabulary: &self.vocabulary,
            table: &self.table,
            typed_node_subjects: self.typed_node_subjects.as_deref(),
            element_counts: self.element_counts.as_ref(),
        }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn into_vocabulary(self) -> Vocabulary {
        self.vocabulary
    }

    pub fn table(&self) -> &PredicateTable {
        &self.table
    }
}

impl Deref for ValidatingVocabulary {
    type Target = Vocabulary;

    fn deref(&self) -> &Vocabulary {
        &self.vocabulary
    }
}

impl FromStr for ValidatingVocabulary {
    type Err = BuildError;

    fn from_str(document: &str) -> Result<Self, Self::Err> {
        Self::from_reader(document.as_bytes())
    }
}
