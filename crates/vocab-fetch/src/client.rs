//! Typed client for published IVOA vocabularies.
//!
//! A vocabulary URI serves several representations of the same
//! vocabulary; the `Accept` header picks one.
//!
//! | Representation | Media type                  |
//! |----------------|-----------------------------|
//! | desise         | `application/x-desise+json` |
//! | Turtle         | `text/turtle`               |
//! | RDF/XML        | `application/rdf+xml`       |

use std::fmt;
use std::time::Duration;

use reqwest::header::ACCEPT;
use url::Url;

use crate::config::FetchConfig;
use crate::desise::Desise;
use crate::error::FetchError;
use crate::registry;

/// A serialization a vocabulary URI can be asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Representation {
    Desise,
    Turtle,
    RdfXml,
}

impl Representation {
    pub fn media_type(self) -> &'static str {
        match self {
            Representation::Desise => "application/x-desise+json",
            Representation::Turtle => "text/turtle",
            Representation::RdfXml => "application/rdf+xml",
        }
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Representation::Desise => "desise",
            Representation::Turtle => "Turtle",
            Representation::RdfXml => "RDF/XML",
        })
    }
}

/// HTTP client for vocabulary retrieval.
#[derive(Debug, Clone)]
pub struct VocabClient {
    http: reqwest::Client,
    config: FetchConfig,
}

impl VocabClient {
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| FetchError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Fetch one representation of the vocabulary at `uri` as text.
    pub async fn fetch_text(
        &self,
        uri: &str,
        representation: Representation,
    ) -> Result<String, FetchError> {
        let url = parse_http_url(uri)?;
        let media_type = representation.media_type();
        self.get_text(url, Some(media_type), format!("GET {uri} as {representation}"))
            .await
    }

    /// Fetch and decode the desise rendering of the vocabulary at `uri`.
    pub async fn fetch_desise(&self, uri: &str) -> Result<Desise, FetchError> {
        let body = self.fetch_text(uri, Representation::Desise).await?;
        serde_json::from_str(&body).map_err(|e| FetchError::Decode {
            endpoint: format!("GET {uri} as {}", Representation::Desise),
            source: e,
        })
    }

    /// URIs of every vocabulary listed in the configured registry.
    pub async fn fetch_registry(&self) -> Result<Vec<String>, FetchError> {
        let url = self.config.registry_url.clone();
        let endpoint = format!("GET {url}");
        let conf = self.get_text(url, None, endpoint).await?;
        let uris = registry::vocabulary_uris(&conf);
        tracing::info!(count = uris.len(), "loaded vocabulary registry");
        Ok(uris)
    }

    /// RDF/XML for a locator: an http(s) URL is fetched, anything else is
    /// read as a local file.
    pub async fn read_locator(&self, locator: &str) -> Result<String, FetchError> {
        if is_remote(locator) {
            return self.fetch_text(locator, Representation::RdfXml).await;
        }
        tokio::fs::read_to_string(locator)
            .await
            .map_err(|e| FetchError::Io {
                path: locator.to_string(),
                source: e,
            })
    }

    async fn get_text(
        &self,
        url: Url,
        accept: Option<&'static str>,
        endpoint: String,
    ) -> Result<String, FetchError> {
        tracing::debug!(%endpoint, "fetching");
        let resp = crate::retry::retry_send(self.config.max_retries, || {
            let mut request = self.http.get(url.clone());
            if let Some(media_type) = accept {
                request = request.header(ACCEPT, media_type);
            }
            request.send()
        })
        .await
        .map_err(|e| FetchError::Http {
            endpoint: endpoint.clone(),
            source: e,
        })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                endpoint,
                status,
                body,
            });
        }

        resp.text().await.map_err(|e| FetchError::Http {
            endpoint,
            source: e,
        })
    }
}

/// Whether `locator` names an http(s) resource rather than a file.
pub fn is_remote(locator: &str) -> bool {
    locator.starts_with("http://") || locator.starts_with("https://")
}

fn parse_http_url(uri: &str) -> Result<Url, FetchError> {
    let url = Url::parse(uri).map_err(|e| FetchError::InvalidUrl {
        url: uri.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(FetchError::InvalidUrl {
            url: uri.to_string(),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_types() {
        assert_eq!(Representation::Turtle.media_type(), "text/turtle");
        assert_eq!(Representation::RdfXml.to_string(), "RDF/XML");
    }

    #[test]
    fn locators() {
        assert!(is_remote("https://www.ivoa.net/rdf/refframe"));
        assert!(!is_remote("./refframe.rdf"));
    }

    #[test]
    fn only_http_urls_are_fetched() {
        assert!(parse_http_url("http://www.ivoa.net/rdf/refframe").is_ok());
        assert!(matches!(
            parse_http_url("ftp://example.org/x"),
            Err(FetchError::InvalidUrl { .. })
        ));
        assert!(parse_http_url("not a url").is_err());
    }
}
