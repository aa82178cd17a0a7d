//! # External Validation
//!
//! Checks a published vocabulary by dereferencing its URI the way a client
//! would. The desise summary is the reference list of terms; the Turtle
//! and RDF/XML renderings must agree with it.
//!
//! ```text
//! fetch desise ──┬── fetch Turtle ──┐
//!                └── fetch RDF/XML ─┴── run external rules ── VocabularyReport
//! ```
//!
//! Every representation is fetched once per vocabulary and kept for the
//! duration of its checks. A vocabulary whose desise cannot be retrieved is
//! reported as critically broken; its siblings in a batch are unaffected.

use futures::stream::{self, StreamExt};
use once_cell::sync::Lazy;
use oxigraph::io::{RdfFormat, RdfParser};
use oxigraph::model::NamedNode;
use oxigraph::store::Store;
use regex::Regex;

use vocab_core::{expand_curie, Finding, IVOA_VOCABULARY_ROOT};
use vocab_fetch::{Desise, FetchError, Representation, VocabClient};

use crate::engine::{EngineError, FailureMode, Rule, RuleEngine, RuleFault, RuleResult};
use crate::report::VocabularyReport;

/// Default number of vocabularies validated at the same time.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// A published vocabulary with its retrieved renderings.
#[derive(Debug, Clone)]
pub struct RemoteVocabulary {
    uri: String,
    desise: Desise,
    turtle: Result<String, RuleFault>,
    rdfxml: Result<String, RuleFault>,
}

impl RemoteVocabulary {
    /// Retrieve the desise summary, then both renderings concurrently.
    ///
    /// # Errors
    ///
    /// Only a failed desise retrieval is an error. A missing rendering is
    /// kept and surfaces as a fault of the rule that needs it.
    pub async fn fetch(client: &VocabClient, uri: &str) -> Result<Self, FetchError> {
        let desise = client.fetch_desise(uri).await?;
        let (turtle, rdfxml) = tokio::join!(
            client.fetch_text(uri, Representation::Turtle),
            client.fetch_text(uri, Representation::RdfXml),
        );
        tracing::debug!(
            uri,
            terms = desise.terms.len(),
            turtle = turtle.is_ok(),
            rdfxml = rdfxml.is_ok(),
            "fetched vocabulary renderings"
        );
        Ok(Self {
            uri: uri.to_string(),
            desise,
            turtle: turtle.map_err(|e| retrieval_fault(Representation::Turtle, &e)),
            rdfxml: rdfxml.map_err(|e| retrieval_fault(Representation::RdfXml, &e)),
        })
    }

    /// Assemble from already retrieved parts.
    pub fn from_parts(
        uri: impl Into<String>,
        desise: Desise,
        turtle: Result<String, RuleFault>,
        rdfxml: Result<String, RuleFault>,
    ) -> Self {
        Self {
            uri: uri.into(),
            desise,
            turtle,
            rdfxml,
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn desise(&self) -> &Desise {
        &self.desise
    }
}

fn retrieval_fault(representation: Representation, error: &FetchError) -> RuleFault {
    RuleFault::Retrieval {
        representation: representation.to_string(),
        message: error.to_string(),
    }
}

/// The external rules, in the order they run.
pub fn external_rules() -> Vec<Rule<RemoteVocabulary>> {
    vec![
        Rule::new("uri_form", uri_form),
        Rule::new("identifier_form", identifier_form),
        Rule::new("desise_completeness", desise_completeness),
        Rule::new("desise_use_instead", desise_use_instead),
        Rule::new("usable_turtle", usable_turtle),
        Rule::new("usable_rdfx", usable_rdfx),
    ]
}

fn uri_form(voc: &RemoteVocabulary) -> RuleResult {
    if voc.uri.starts_with(IVOA_VOCABULARY_ROOT) {
        return Ok(Vec::new());
    }
    Ok(vec![Finding::error(
        "Vocabulary URI does not point to the IVOA vocabulary repo (note that you can \
         *retrieve* from https, but you cannot reference the https version)",
    )])
}

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new("^[A-Za-z0-9_-]+$").expect("identifier pattern is a valid regex"));

fn identifier_form(voc: &RemoteVocabulary) -> RuleResult {
    Ok(voc
        .desise
        .terms
        .keys()
        .filter(|ident| !IDENTIFIER.is_match(ident))
        .map(|ident| Finding::error(format!("Identifier {ident} malformed.")))
        .collect())
}

fn desise_completeness(voc: &RemoteVocabulary) -> RuleResult {
    let mut findings = Vec::new();
    for (ident, term) in &voc.desise.terms {
        if term.label.as_deref().map_or(true, str::is_empty) {
            findings.push(Finding::error(format!("Term {ident} has no label in desise.")));
        }
        if term.description.as_deref().map_or(true, str::is_empty) {
            findings.push(Finding::error(format!(
                "Term {ident} has no description in desise."
            )));
        }
    }
    Ok(findings)
}

fn desise_use_instead(voc: &RemoteVocabulary) -> RuleResult {
    let mut findings = Vec::new();
    for (ident, term) in &voc.desise.terms {
        let Some(target) = term.use_instead.as_deref() else {
            continue;
        };
        match voc.desise.term(target) {
            None => findings.push(Finding::error(format!(
                "Term {ident} is to be replaced by {target}, which is not in the vocabulary."
            ))),
            Some(replacement) if replacement.is_deprecated() => findings.push(Finding::error(
                format!("Term {ident} is to be replaced by {target}, which is itself deprecated."),
            )),
            Some(_) => {}
        }
    }
    Ok(findings)
}

fn usable_turtle(voc: &RemoteVocabulary) -> RuleResult {
    let source = voc.turtle.as_ref().map_err(Clone::clone)?;
    if !source.trim_start().starts_with(&format!("@base <{}>.", voc.uri)) {
        return Ok(vec![Finding::error(
            "Turtle source does not declare the right base URI",
        )]);
    }
    let store = load_graph(source, RdfFormat::Turtle, &voc.uri)?;
    label_findings(voc, &store, "Turtle")
}

fn usable_rdfx(voc: &RemoteVocabulary) -> RuleResult {
    let source = voc.rdfxml.as_ref().map_err(Clone::clone)?;
    let store = load_graph(source, RdfFormat::RdfXml, &voc.uri)?;
    label_findings(voc, &store, "RDF/XML")
}

fn load_graph(source: &str, format: RdfFormat, base: &str) -> Result<Store, RuleFault> {
    let malformed = |message: String| RuleFault::Malformed {
        format: format.name().to_string(),
        message,
    };
    let parser = RdfParser::from_format(format)
        .with_base_iri(base)
        .map_err(|e| malformed(e.to_string()))?;
    let store = Store::new().map_err(|e| malformed(e.to_string()))?;
    store
        .load_from_reader(parser, source.as_bytes())
        .map_err(|e| malformed(e.to_string()))?;
    Ok(store)
}

/// One error per desise term that does not have exactly one label.
fn label_findings(voc: &RemoteVocabulary, store: &Store, rendering: &str) -> RuleResult {
    let label = NamedNode::new(expand_curie("rdfs:label")).map_err(|e| RuleFault::Malformed {
        format: rendering.to_string(),
        message: e.to_string(),
    })?;

    let mut findings = Vec::new();
    for ident in voc.desise.terms.keys() {
        let count = match NamedNode::new(format!("{}#{ident}", voc.uri)) {
            Ok(subject) => count_matches(
                store.quads_for_pattern(Some(subject.as_ref().into()), Some(label.as_ref()), None, None),
                rendering,
            )?,
            Err(_) => 0,
        };
        if count != 1 {
            findings.push(Finding::error(format!(
                "{ident} has not exactly one label in {rendering}"
            )));
        }
    }
    Ok(findings)
}

/// Count the items of a store query; a failing item faults the rule.
fn count_matches<T, E: std::fmt::Display>(
    mut items: impl Iterator<Item = Result<T, E>>,
    rendering: &str,
) -> Result<usize, RuleFault> {
    items.try_fold(0, |count, item| match item {
        Ok(_) => Ok(count + 1),
        Err(e) => Err(RuleFault::Malformed {
            format: rendering.to_string(),
            message: e.to_string(),
        }),
    })
}

/// Validate one published vocabulary.
///
/// Never fails: retrieval problems and an early stop in
/// [`FailureMode::Bail`] are part of the report.
pub async fn validate_remote(
    client: &VocabClient,
    uri: &str,
    mode: FailureMode,
) -> VocabularyReport {
    let remote = match RemoteVocabulary::fetch(client, uri).await {
        Ok(remote) => remote,
        Err(e) => {
            tracing::warn!(uri, error = %e, "vocabulary critically broken");
            let mut report = VocabularyReport::critically_broken(uri, &e);
            if mode == FailureMode::Bail {
                report.bailed = Some("fetch".to_string());
            }
            return report;
        }
    };

    let engine = RuleEngine::new(external_rules()).with_mode(mode);
    match engine.run(&remote) {
        Ok(findings) => VocabularyReport::from_findings(uri, findings),
        Err(EngineError::Bailed { rule, findings, .. }) => {
            let mut report = VocabularyReport::from_findings(uri, findings);
            report.bailed = Some(rule.to_string());
            report
        }
    }
}

/// Validate many vocabularies, at most `concurrency` at a time.
///
/// Reports come back in input order. In [`FailureMode::Bail`] the batch
/// ends with the first report that stopped early; later vocabularies are
/// not reported.
pub async fn validate_many(
    client: &VocabClient,
    uris: &[String],
    mode: FailureMode,
    concurrency: usize,
) -> Vec<VocabularyReport> {
    let mut pending = stream::iter(uris)
        .map(|uri| validate_remote(client, uri, mode))
        .buffered(concurrency.max(1));

    let mut reports = Vec::with_capacity(uris.len());
    while let Some(report) = pending.next().await {
        let stop = report.bailed.is_some();
        reports.push(report);
        if stop {
            tracing::info!(validated = reports.len(), total = uris.len(), "bailing out of batch");
            break;
        }
    }
    reports
}

#[cfg(test)]
mod tests {
    use super::*;
    use vocab_fetch::DesiseTerm;

    const URI: &str = "http://www.ivoa.net/rdf/test";

    fn desise(terms: &[(&str, DesiseTerm)]) -> Desise {
        Desise {
            uri: Some(URI.to_string()),
            flavour: Some("RDF Class".to_string()),
            terms: terms
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        }
    }

    fn described(label: &str) -> DesiseTerm {
        DesiseTerm {
            label: Some(label.to_string()),
            description: Some(format!("About {label}")),
            ..DesiseTerm::default()
        }
    }

    fn turtle(body: &str) -> String {
        format!(
            "@base <{URI}>.\n@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#>.\n{body}\n"
        )
    }

    fn run(voc: &RemoteVocabulary) -> Vec<Finding> {
        RuleEngine::new(external_rules()).run(voc).unwrap()
    }

    fn messages(findings: &[Finding]) -> Vec<&str> {
        findings.iter().map(|f| f.message.as_str()).collect()
    }

    const RDFXML: &str = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
        xmlns:rdfs="http://www.w3.org/2000/01/rdf-schema#">
      <rdfs:Class rdf:about="http://www.ivoa.net/rdf/test#alpha"><rdfs:label>Alpha</rdfs:label></rdfs:Class>
    </rdf:RDF>"#;

    #[test]
    fn consistent_vocabulary_is_clean() {
        let voc = RemoteVocabulary::from_parts(
            URI,
            desise(&[("alpha", described("Alpha"))]),
            Ok(turtle("<#alpha> a rdfs:Class; rdfs:label \"Alpha\".")),
            Ok(RDFXML.to_string()),
        );
        assert!(run(&voc).is_empty(), "{:?}", run(&voc));
    }

    #[test]
    fn https_uri_is_rejected() {
        let voc = RemoteVocabulary::from_parts(
            "https://www.ivoa.net/rdf/test",
            desise(&[]),
            Ok("@base <https://www.ivoa.net/rdf/test>.".to_string()),
            Ok(RDFXML.to_string()),
        );
        let findings = run(&voc);
        assert!(findings[0].message.starts_with("Vocabulary URI does not point"));
    }

    #[test]
    fn malformed_identifiers_are_errors() {
        let voc = RemoteVocabulary::from_parts(
            URI,
            desise(&[("good-one", described("Good")), ("bad one", described("Bad"))]),
            Ok(turtle("")),
            Ok(RDFXML.to_string()),
        );
        let findings = run(&voc);
        assert!(messages(&findings).contains(&"Identifier bad one malformed."));
        assert!(!messages(&findings).contains(&"Identifier good-one malformed."));
    }

    #[test]
    fn desise_gaps_and_bad_replacements() {
        let mut old = described("Old");
        old.deprecated = Some(serde_json::Value::String(String::new()));
        old.use_instead = Some("older".to_string());
        let mut older = described("Older");
        older.deprecated = Some(serde_json::Value::String(String::new()));
        let mut lost = described("Lost");
        lost.use_instead = Some("nowhere".to_string());
        let bare = DesiseTerm::default();

        let voc = RemoteVocabulary::from_parts(
            URI,
            desise(&[("old", old), ("older", older), ("lost", lost), ("bare", bare)]),
            Err(RuleFault::Retrieval {
                representation: "Turtle".into(),
                message: "gone".into(),
            }),
            Err(RuleFault::Retrieval {
                representation: "RDF/XML".into(),
                message: "gone".into(),
            }),
        );
        let findings = run(&voc);
        let messages = messages(&findings);
        assert!(messages.contains(&"Term bare has no label in desise."));
        assert!(messages.contains(&"Term bare has no description in desise."));
        assert!(messages.contains(&"Term old is to be replaced by older, which is itself deprecated."));
        assert!(messages.contains(&"Term lost is to be replaced by nowhere, which is not in the vocabulary."));
        assert!(messages.contains(&"usable_turtle: cannot retrieve Turtle: gone"));
        assert!(messages.contains(&"usable_rdfx: cannot retrieve RDF/XML: gone"));
    }

    #[test]
    fn turtle_without_base_is_an_error() {
        let voc = RemoteVocabulary::from_parts(
            URI,
            desise(&[("alpha", described("Alpha"))]),
            Ok("@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#>.".to_string()),
            Ok(RDFXML.to_string()),
        );
        assert_eq!(
            messages(&run(&voc)),
            ["Turtle source does not declare the right base URI"]
        );
    }

    #[test]
    fn label_counts_must_be_exactly_one() {
        let voc = RemoteVocabulary::from_parts(
            URI,
            desise(&[("alpha", described("Alpha")), ("beta", described("Beta"))]),
            Ok(turtle(
                "<#alpha> rdfs:label \"Alpha\", \"Alpha again\".\n<#beta> rdfs:label \"Beta\".",
            )),
            Ok(RDFXML.to_string()),
        );
        assert_eq!(
            messages(&run(&voc)),
            [
                "alpha has not exactly one label in Turtle",
                "beta has not exactly one label in RDF/XML",
            ]
        );
    }

    #[test]
    fn unparsable_turtle_faults() {
        let voc = RemoteVocabulary::from_parts(
            URI,
            desise(&[]),
            Ok(turtle("<#alpha> rdfs:label")),
            Ok(RDFXML.to_string()),
        );
        let findings = run(&voc);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.starts_with("usable_turtle: malformed"));
    }

    #[test]
    fn store_failure_while_counting_faults() {
        let items: Vec<Result<(), &str>> = vec![Ok(()), Err("storage unavailable"), Ok(())];
        let fault = count_matches(items.into_iter(), "Turtle").unwrap_err();
        assert_eq!(fault.to_string(), "malformed Turtle: storage unavailable");
        let items: Vec<Result<(), &str>> = vec![Ok(()), Ok(())];
        assert_eq!(count_matches(items.into_iter(), "Turtle").unwrap(), 2);
    }
}
