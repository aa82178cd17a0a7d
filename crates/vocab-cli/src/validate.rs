//! # Validate Subcommand
//!
//! Validates published vocabularies by re-fetching their desise, Turtle and
//! RDF/XML renderings. Without URIs, every vocabulary in the registry is
//! checked.

use std::io;

use anyhow::{Context, Result};
use clap::Args;

use vocab_fetch::{FetchConfig, VocabClient};
use vocab_validate::{
    validate_many, FailureMode, Reporter, VocabularyReport, DEFAULT_CONCURRENCY,
};

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Vocabulary URIs. Defaults to all vocabularies in the registry.
    pub uris: Vec<String>,

    /// Stop at the first error.
    #[arg(long)]
    pub bail: bool,

    /// Print the reports as JSON.
    #[arg(long)]
    pub json: bool,

    /// Number of vocabularies validated concurrently.
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Per-request timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// URL of the vocabulary registry (`vocabs.conf`).
    #[arg(long)]
    pub registry: Option<String>,
}

impl ValidateArgs {
    pub fn mode(&self) -> FailureMode {
        if self.bail {
            FailureMode::Bail
        } else {
            FailureMode::Collect
        }
    }

    /// Apply command line overrides to `config`.
    pub fn configure(&self, mut config: FetchConfig) -> Result<FetchConfig> {
        if let Some(timeout) = self.timeout {
            config = config.with_timeout_secs(timeout);
        }
        if let Some(registry) = &self.registry {
            config = config
                .with_registry_url(registry)
                .context("invalid --registry")?;
        }
        Ok(config)
    }
}

/// Execute the validate subcommand. Exits 1 if any vocabulary has errors.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let config = args.configure(FetchConfig::from_env().context("invalid retrieval configuration")?)?;
    let client = VocabClient::new(config).context("failed to build HTTP client")?;
    let runtime = crate::runtime()?;

    let reports = runtime.block_on(validate_uris(&client, args))?;

    let mut reporter = Reporter::new(io::stdout().lock());
    if args.json {
        reporter.json(&reports)?;
    } else {
        reporter.report_all(&reports)?;
    }

    let failing = reports.iter().filter(|r| r.has_errors()).count();
    tracing::info!(validated = reports.len(), failing, "validation finished");
    Ok(if failing > 0 { 1 } else { 0 })
}

/// Validate the requested vocabularies, or all registered ones.
pub async fn validate_uris(client: &VocabClient, args: &ValidateArgs) -> Result<Vec<VocabularyReport>> {
    let uris = if args.uris.is_empty() {
        client
            .fetch_registry()
            .await
            .context("cannot load the vocabulary registry")?
    } else {
        args.uris.clone()
    };
    Ok(validate_many(client, &uris, args.mode(), args.concurrency).await)
}
