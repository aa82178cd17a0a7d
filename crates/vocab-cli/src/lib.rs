//! # vocab-cli — Command Line Tools for IVOA Vocabularies
//!
//! Provides the `vocab` command.
//!
//! ## Subcommands
//!
//! - `vocab load` — Build vocabularies from local RDF/XML files or URLs and
//!   summarize them, optionally running the local rules.
//! - `vocab validate` — Re-fetch published vocabularies and run the
//!   external rules over them.
//!
//! ```bash
//! vocab load datalink-core.rdf http://www.ivoa.net/rdf/messenger
//! vocab load --validate --json messenger.rdf
//! vocab validate http://www.ivoa.net/rdf/datalink/core
//! vocab validate --bail --concurrency 8
//! ```
//!
//! ## Environment
//!
//! `VOCAB_TIMEOUT_SECS`, `VOCAB_MAX_RETRIES`, `VOCAB_REGISTRY_URL` and
//! `VOCAB_USER_AGENT` configure retrieval; see
//! [`FetchConfig::from_env`](vocab_fetch::FetchConfig::from_env).

pub mod load;
pub mod validate;

use anyhow::{Context, Result};

/// Runtime for the async retrieval layer. Handlers stay synchronous.
pub(crate) fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")
}
