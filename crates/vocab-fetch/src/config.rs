//! Retrieval configuration.
//!
//! Defaults suit validating the published IVOA vocabularies. Override via
//! environment variables, explicit construction, or CLI flags.

use url::Url;

/// Default location of the vocabulary registry.
pub const DEFAULT_REGISTRY_URL: &str =
    "https://raw.githubusercontent.com/ivoa-std/Vocabularies/master/vocabs.conf";

/// Configuration for fetching vocabularies.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Where the vocabulary registry (`vocabs.conf`) lives.
    pub registry_url: Url,
    /// Request timeout in seconds. A timeout counts as a retrieval error.
    pub timeout_secs: u64,
    /// Retries after the first attempt, on transport failures only.
    pub max_retries: u32,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

impl FetchConfig {
    /// Default timeout, retries, and user agent for the given registry.
    pub fn new(registry_url: Url) -> Self {
        Self {
            registry_url,
            timeout_secs: 30,
            max_retries: 2,
            user_agent: default_user_agent(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `VOCAB_REGISTRY_URL` (default: [`DEFAULT_REGISTRY_URL`])
    /// - `VOCAB_TIMEOUT_SECS` (default: 30)
    /// - `VOCAB_MAX_RETRIES` (default: 2)
    /// - `VOCAB_USER_AGENT` (default: `vocab/<version>`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            registry_url: env_url("VOCAB_REGISTRY_URL", DEFAULT_REGISTRY_URL)?,
            timeout_secs: env_number("VOCAB_TIMEOUT_SECS").unwrap_or(30),
            max_retries: env_number("VOCAB_MAX_RETRIES").unwrap_or(2),
            user_agent: std::env::var("VOCAB_USER_AGENT").unwrap_or_else(|_| default_user_agent()),
        })
    }

    /// A configuration for a local mock server: registry at
    /// `{base}/vocabs.conf`, short timeout, no retries.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if `base` is not a URL.
    pub fn local_mock(base: &str) -> Result<Self, ConfigError> {
        let registry = format!("{}/vocabs.conf", base.trim_end_matches('/'));
        Ok(Self {
            registry_url: Url::parse(&registry)
                .map_err(|e| ConfigError::InvalidUrl(base.to_string(), e.to_string()))?,
            timeout_secs: 5,
            max_retries: 0,
            user_agent: default_user_agent(),
        })
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Replace the registry location.
    pub fn with_registry_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.registry_url =
            Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(raw.to_string(), e.to_string()))?;
        Ok(self)
    }
}

fn default_user_agent() -> String {
    format!("vocab/{}", env!("CARGO_PKG_VERSION"))
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
}

fn env_number<T: std::str::FromStr>(var: &str) -> Option<T> {
    std::env::var(var).ok().and_then(|s| s.trim().parse().ok())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}
