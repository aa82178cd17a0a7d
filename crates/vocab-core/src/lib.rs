//! # vocab-core — Foundational Types for IVOA Vocabularies
//!
//! This crate is the leaf of the workspace DAG. It defines the primitives
//! shared by extraction, model building, and validation:
//!
//! 1. **Namespace canonicalization.** Long namespace URIs are rewritten to
//!    short prefixes (`rdfs:label` rather than
//!    `http://www.w3.org/2000/01/rdf-schema#label`) so the rest of the stack
//!    can match predicates by plain string comparison.
//!
//! 2. **`Triple`.** The ephemeral (subject, predicate, object) unit emitted
//!    by the extractor and folded by the model builder.
//!
//! 3. **`Flavour`.** A single enum with an explicit per-flavour property
//!    table. Adding a flavour forces every `match` to handle it.
//!
//! 4. **`Diagnostics`.** An append-only buffer of errors and warnings,
//!    owned by whoever is building a vocabulary and handed over with it.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `vocab-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod diagnostic;
pub mod error;
pub mod flavour;
pub mod namespace;
pub mod predicates;
pub mod triple;

pub use diagnostic::{Diagnostics, Finding, Severity};
pub use error::UnknownFlavourError;
pub use flavour::{Flavour, FlavourProperties};
pub use namespace::{
    canonicalize_attributes, canonicalize_name, canonicalize_uri, expand_curie, KNOWN_NAMESPACES,
};
pub use triple::Triple;

/// Root under which every IVOA vocabulary URI must live.
pub const IVOA_VOCABULARY_ROOT: &str = "http://www.ivoa.net/rdf/";
