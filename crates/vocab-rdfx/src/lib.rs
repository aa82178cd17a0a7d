//! # vocab-rdfx — Triple Extraction from RDF/XML
//!
//! Walks an RDF/XML document as a stream of element open/close events and
//! emits canonical [`Triple`](vocab_core::Triple)s for the predicates the
//! vocabulary stack understands. Everything else in the document is ignored.
//!
//! This is deliberately not a general RDF/XML parser. It recognizes exactly
//! two idioms:
//!
//! - **Property elements** whose canonical name is in
//!   [`object_generating_elements`]. Each yields one triple. The subject is
//!   the enclosing node's `rdf:about`. The object is the element's
//!   `rdf:resource`, or else its text.
//! - **Typed nodes** (`<rdf:Property>`, `<rdfs:Class>`, `<skos:Concept>`).
//!   Each yields an `rdf:type` triple for its own `rdf:about`.
//!
//! ## Crate Policy
//!
//! - Extraction is all-or-nothing: malformed markup or a missing identity
//!   attribute aborts with [`ExtractError`]; no partial triple list escapes.
//! - Depends only on `vocab-core` internally.

pub mod error;
pub mod extract;
#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;

pub use error::ExtractError;
pub use extract::{object_generating_elements, Extraction, RdfxExtractor};
