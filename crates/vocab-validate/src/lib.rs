//! # vocab-validate — Vocabulary Conformance Rules
//!
//! Checks IVOA vocabularies against the conventions of the IVOA
//! vocabulary repository.
//!
//! ## Local Validation (`local`)
//!
//! [`ValidatingVocabulary`] builds a model from an RDF/XML document with a
//! validating extractor and runs [`local_rules`] over it. Findings land in
//! the model's own errors and warnings:
//!
//! ```no_run
//! use vocab_validate::ValidatingVocabulary;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let source = std::fs::read_to_string("datalink-core.rdf")?;
//! let voc: ValidatingVocabulary = source.parse()?;
//! for error in voc.errors() {
//!     println!("ERROR {error}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## External Validation (`external`)
//!
//! [`validate_remote`] and [`validate_many`] re-fetch published
//! vocabularies (desise, Turtle, RDF/XML) and run [`external_rules`] over
//! them, producing one [`VocabularyReport`] per vocabulary.
//!
//! ## Rule Engine (`engine`)
//!
//! Both rule sets are ordered lists of [`Rule`] descriptors run by a
//! [`RuleEngine`]. [`FailureMode::Collect`] runs every rule;
//! [`FailureMode::Bail`] stops at the first error.
//!
//! ## Crate Policy
//!
//! - Rules are independent: each reads the context and returns findings,
//!   never mutating shared state.
//! - A rule that cannot run returns a [`RuleFault`]; it never panics.
//! - Each remote rendering is retrieved at most once per vocabulary.

pub mod engine;
pub mod external;
pub mod local;
pub mod report;

pub use engine::{EngineError, FailureMode, Rule, RuleEngine, RuleFault, RuleResult};
pub use external::{
    external_rules, validate_many, validate_remote, RemoteVocabulary, DEFAULT_CONCURRENCY,
};
pub use local::{local_rules, LocalContext, ValidatingVocabulary};
pub use report::{Reporter, VocabularyReport};
