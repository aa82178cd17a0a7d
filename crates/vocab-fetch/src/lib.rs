//! # vocab-fetch — Retrieval of Published Vocabularies
//!
//! Fetches IVOA vocabularies over HTTP. Each vocabulary URI is dereferenced
//! with content negotiation to obtain its desise summary, its Turtle
//! rendering, or its RDF/XML rendering. The list of all published
//! vocabularies comes from the repository's `vocabs.conf`.
//!
//! ## Crate Policy
//!
//! - Every request has a timeout; a timeout is an ordinary [`FetchError`].
//! - Transport failures are retried with exponential backoff. Error
//!   statuses are not retried.
//! - No caching happens here. Callers that need a representation twice
//!   keep the first result.

pub mod client;
pub mod config;
pub mod desise;
pub mod error;
pub mod registry;
pub(crate) mod retry;

pub use client::{is_remote, Representation, VocabClient};
pub use config::{ConfigError, FetchConfig, DEFAULT_REGISTRY_URL};
pub use desise::{Desise, DesiseTerm};
pub use error::FetchError;
