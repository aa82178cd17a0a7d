//! # Load Subcommand
//!
//! Builds vocabularies from RDF/XML and prints a short summary for each:
//!
//! ```text
//! === Vocabulary messenger.rdf
//! 7 terms, e.g., GravitationalWave
//! ```
//!
//! Without locators, the command checks itself against an embedded sample
//! vocabulary and prints usage.

use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use clap::Args;

use vocab_fetch::{FetchConfig, VocabClient};
use vocab_model::Vocabulary;
use vocab_validate::{Reporter, ValidatingVocabulary, VocabularyReport};

/// A small, clean RDF Class vocabulary.
pub const SAMPLE_VOCABULARY: &str = include_str!("../data/sample.rdf");

pub const USAGE: &str = "Usage: vocab load <voc-spec> {<voc-spec>}\n\
                         where <voc-spec> either references a local RDF/X file or the vocabulary URL.";

/// Arguments for the load subcommand.
#[derive(Args, Debug)]
pub struct LoadArgs {
    /// Local RDF/XML files or http(s) vocabulary URLs.
    pub locators: Vec<String>,

    /// Also run the local validation rules and print their findings.
    #[arg(long)]
    pub validate: bool,

    /// Print each model as JSON instead of a summary.
    #[arg(long)]
    pub json: bool,
}

/// Execute the load subcommand.
///
/// Exits 2 after the self-test when no locators are given, and 1 if a
/// locator could not be loaded or validation found errors.
pub fn run_load(args: &LoadArgs) -> Result<u8> {
    if args.locators.is_empty() {
        self_test()?;
        eprintln!("{USAGE}");
        return Ok(2);
    }

    let config = FetchConfig::from_env().context("invalid retrieval configuration")?;
    let client = VocabClient::new(config).context("failed to build HTTP client")?;
    let runtime = crate::runtime()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let clean = runtime.block_on(load_all(&mut out, &client, args))?;
    Ok(if clean { 0 } else { 1 })
}

/// Load and summarize every locator in turn.
///
/// A locator that cannot be read or built is reported under its own header
/// and does not stop the others. Returns `false` if any locator failed or
/// carried errors.
pub async fn load_all<W: Write>(out: &mut W, client: &VocabClient, args: &LoadArgs) -> Result<bool> {
    let mut clean = true;
    for locator in &args.locators {
        writeln!(out, "\n=== Vocabulary {locator}")?;
        let loaded = match client.read_locator(locator).await {
            Ok(source) => summarize(out, locator, &source, args),
            Err(e) => Err(anyhow::Error::new(e).context(format!("cannot load {locator}"))),
        };
        match loaded {
            Ok(ok) => clean &= ok,
            Err(e) => {
                tracing::error!("{e:#}");
                writeln!(out, "ERROR {e:#}")?;
                clean = false;
            }
        }
    }
    Ok(clean)
}

/// Build the vocabulary in `source` and write its summary below the
/// locator's header.
///
/// Returns `false` if the model carries errors.
pub fn summarize<W: Write>(out: &mut W, locator: &str, source: &str, args: &LoadArgs) -> Result<bool> {
    let voc: Vocabulary = if args.validate {
        source
            .parse::<ValidatingVocabulary>()
            .with_context(|| format!("cannot build vocabulary from {locator}"))?
            .into_vocabulary()
    } else {
        source
            .parse()
            .with_context(|| format!("cannot build vocabulary from {locator}"))?
    };
    tracing::info!(locator, uri = voc.uri(), terms = voc.terms().len(), "loaded vocabulary");

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &voc)?;
        writeln!(out)?;
    } else {
        writeln!(
            out,
            "{} terms, e.g., {}",
            voc.terms().len(),
            voc.first_term().unwrap_or("-")
        )?;
        if args.validate {
            Reporter::new(&mut *out).report(&VocabularyReport::from_vocabulary(voc.uri(), &voc))?;
        }
    }
    Ok(voc.errors().is_empty())
}

/// The embedded sample must build and validate without findings.
pub fn self_test() -> Result<()> {
    let voc: ValidatingVocabulary = SAMPLE_VOCABULARY
        .parse()
        .context("self-test: sample vocabulary does not build")?;
    if !voc.errors().is_empty() || !voc.warnings().is_empty() {
        bail!(
            "self-test: sample vocabulary is not clean: {:?} {:?}",
            voc.errors(),
            voc.warnings()
        );
    }
    if voc.first_term() != Some("GravitationalWave") || voc.terms().len() != 7 {
        bail!("self-test: sample vocabulary has unexpected terms");
    }
    tracing::debug!("self-test passed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(validate: bool, json: bool) -> LoadArgs {
        LoadArgs {
            locators: vec![],
            validate,
            json,
        }
    }

    fn render(source: &str, args: &LoadArgs) -> (bool, String) {
        let mut out = Vec::new();
        let clean = summarize(&mut out, "sample.rdf", source, args).unwrap();
        (clean, String::from_utf8(out).unwrap())
    }

    #[test]
    fn self_test_passes() {
        self_test().unwrap();
    }

    #[test]
    fn summary_lists_count_and_first_term() {
        let (clean, text) = render(SAMPLE_VOCABULARY, &args(false, false));
        assert!(clean);
        assert_eq!(text, "7 terms, e.g., GravitationalWave\n");
    }

    #[test]
    fn empty_vocabulary_summary_uses_dash() {
        let doc = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
            xmlns:ivoasem="http://www.ivoa.net/rdf/ivoasem#">
          <rdf:Description rdf:about="http://www.ivoa.net/rdf/empty">
            <ivoasem:vocflavour>SKOS</ivoasem:vocflavour>
          </rdf:Description>
        </rdf:RDF>"#;
        let (_, text) = render(doc, &args(false, false));
        assert!(text.ends_with("0 terms, e.g., -\n"));
    }

    #[test]
    fn validation_findings_are_reported() {
        let broken = SAMPLE_VOCABULARY.replace(
            "<rdfs:subClassOf rdf:resource=\"http://www.ivoa.net/rdf/messenger#Radio\"/>",
            "<rdfs:subClassOf rdf:resource=\"http://www.ivoa.net/rdf/messenger#Radio\"/>\
             <rdfs:subClassOf rdf:resource=\"http://www.ivoa.net/rdf/messenger#Infrared\"/>",
        );
        let (clean, text) = render(&broken, &args(true, false));
        assert!(!clean);
        assert!(text.contains("\n>>> http://www.ivoa.net/rdf/messenger\n"));
        assert!(text.contains(
            "ERROR Terms in non-SKOS vocabularies may only have up to one wider term, \
             but Millimeter has Radio, Infrared."
        ));
    }

    #[test]
    fn json_output_is_the_model() {
        let (_, text) = render(SAMPLE_VOCABULARY, &args(false, true));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["uri"], "http://www.ivoa.net/rdf/messenger");
        assert_eq!(value["deprecated_terms"]["Submm"][0], "Millimeter");
    }

    #[test]
    fn unknown_flavour_is_an_error() {
        let doc = SAMPLE_VOCABULARY.replace(">RDF Class<", ">OWL<");
        let mut out = Vec::new();
        assert!(summarize(&mut out, "x.rdf", &doc, &args(false, false)).is_err());
    }

    #[test]
    fn local_file_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE_VOCABULARY.as_bytes()).unwrap();
        let args = LoadArgs {
            locators: vec![file.path().display().to_string()],
            validate: true,
            json: false,
        };
        assert_eq!(run_load(&args).unwrap(), 0);
    }

    #[test]
    fn bad_locator_does_not_stop_the_batch() {
        let mut bad = tempfile::NamedTempFile::new().unwrap();
        bad.write_all(SAMPLE_VOCABULARY.replace(">RDF Class<", ">OWL<").as_bytes())
            .unwrap();
        let mut good = tempfile::NamedTempFile::new().unwrap();
        good.write_all(SAMPLE_VOCABULARY.as_bytes()).unwrap();
        let bad_path = bad.path().display().to_string();
        let good_path = good.path().display().to_string();
        let args = LoadArgs {
            locators: vec![bad_path.clone(), good_path.clone()],
            validate: false,
            json: false,
        };

        let client = VocabClient::new(FetchConfig::local_mock("http://localhost").unwrap()).unwrap();
        let runtime = crate::runtime().unwrap();
        let mut out = Vec::new();
        let clean = runtime.block_on(load_all(&mut out, &client, &args)).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(!clean);
        let (bad_part, good_part) = text.split_once(&format!("=== Vocabulary {good_path}")).unwrap();
        assert!(bad_part.contains(&format!(
            "=== Vocabulary {bad_path}\nERROR cannot build vocabulary from {bad_path}"
        )));
        assert!(good_part.ends_with("\n7 terms, e.g., GravitationalWave\n"));
    }

    #[test]
    fn missing_file_is_reported_and_fails() {
        let args = LoadArgs {
            locators: vec!["/nonexistent/voc.rdf".into()],
            validate: false,
            json: false,
        };
        assert_eq!(run_load(&args).unwrap(), 1);
    }
}
