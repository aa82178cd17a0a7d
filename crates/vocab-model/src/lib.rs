//! # vocab-model — The IVOA Vocabulary Model
//!
//! Turns extracted triples into a [`Vocabulary`]: the vocabulary URI, its
//! flavour, and four term-keyed maps.
//!
//! | Accessor              | Contents                                         |
//! |-----------------------|--------------------------------------------------|
//! | `terms()`             | term → label and definition                      |
//! | `deprecated_terms()`  | deprecated term → replacement terms (maybe none) |
//! | `preliminary_terms()` | set of preliminary terms                         |
//! | `wider_terms()`       | term → wider terms                               |
//!
//! ```no_run
//! use vocab_model::Vocabulary;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let file = std::io::BufReader::new(std::fs::File::open("datalink-core.rdf")?);
//! let voc = Vocabulary::from_reader(file)?;
//! for (term, entry) in voc.terms() {
//!     println!("{term}: {}", entry.label.as_deref().unwrap_or("-"));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Policy
//!
//! - Missing or inconsistent data never fails construction; it is recorded
//!   in the model's diagnostics. Only an unknown flavour is a hard error.
//! - Maps are ordered, so building the same document twice gives equal
//!   models.

pub mod build;
pub mod error;
pub mod table;
pub mod vocabulary;

pub use error::BuildError;
pub use table::{Pair, PredicateTable};
pub use vocabulary::{TermEntry, Vocabulary, URI_NOT_FOUND};
