//! # Reporting
//!
//! Findings grouped per vocabulary, printed as text or JSON.
//!
//! ```text
//! >>> http://www.ivoa.net/rdf/datalink/core
//! ERROR Identifier bad one malformed.
//! warning Term stinky: Hierarchy defined in URI.
//! ```

use std::fmt::Display;
use std::io::{self, Write};

use serde::Serialize;
use vocab_core::{Finding, Severity};
use vocab_model::Vocabulary;

/// Errors and warnings for one vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VocabularyReport {
    pub uri: String,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    /// Rule at which a bailing run stopped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bailed: Option<String>,
}

impl VocabularyReport {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            ..Self::default()
        }
    }

    pub fn from_findings<I>(uri: impl Into<String>, findings: I) -> Self
    where
        I: IntoIterator<Item = Finding>,
    {
        let mut report = Self::new(uri);
        for finding in findings {
            report.push(finding);
        }
        report
    }

    /// The diagnostics recorded on a built (and possibly validated) model.
    pub fn from_vocabulary(uri: impl Into<String>, voc: &Vocabulary) -> Self {
        Self {
            uri: uri.into(),
            errors: voc.errors().to_vec(),
            warnings: voc.warnings().to_vec(),
            bailed: None,
        }
    }

    /// A vocabulary whose desise summary could not be retrieved.
    pub fn critically_broken(uri: impl Into<String>, error: &dyn Display) -> Self {
        let mut report = Self::new(uri);
        report
            .errors
            .push(format!("Vocabulary critically broken: {error}"));
        report
    }

    pub fn push(&mut self, finding: Finding) {
        match finding.severity {
            Severity::Error => self.errors.push(finding.message),
            Severity::Warning => self.warnings.push(finding.message),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Writes reports, one `>>> uri` header per vocabulary.
#[derive(Debug)]
pub struct Reporter<W: Write> {
    out: W,
    current: Option<String>,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out, current: None }
    }

    /// Print one line for `uri`, preceded by a header if the vocabulary
    /// changed since the last line.
    pub fn line(&mut self, uri: &str, severity: Severity, message: &str) -> io::Result<()> {
        if self.current.as_deref() != Some(uri) {
            writeln!(self.out, "\n>>> {uri}")?;
            self.current = Some(uri.to_string());
        }
        let tag = match severity {
            Severity::Error => "ERROR",
            Severity::Warning => "warning",
        };
        writeln!(self.out, "{tag} {message}")
    }

    /// Print all lines of `report`. A clean report prints nothing.
    pub fn report(&mut self, report: &VocabularyReport) -> io::Result<()> {
        for message in &report.errors {
            self.line(&report.uri, Severity::Error, message)?;
        }
        for message in &report.warnings {
            self.line(&report.uri, Severity::Warning, message)?;
        }
        Ok(())
    }

    pub fn report_all<'r, I>(&mut self, reports: I) -> io::Result<()>
    where
        I: IntoIterator<Item = &'r VocabularyReport>,
    {
        for report in reports {
            self.report(report)?;
        }
        Ok(())
    }

    /// Print `reports` as a pretty JSON array.
    pub fn json(&mut self, reports: &[VocabularyReport]) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut self.out, reports)?;
        writeln!(self.out)
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
