//! # Diagnostics
//!
//! Human-readable findings about a vocabulary. Each message names the
//! offending term or triple so it is self-contained when printed alone.
//!
//! A `Diagnostics` buffer is append-only: entries can be added but never
//! removed or reordered.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Stylistic or discouraged, but not forbidden.
    Warning,
    /// Violation of a normative rule.
    Error,
}

/// A single finding produced while building or validating a vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.severity {
            Severity::Error => write!(f, "ERROR {}", self.message),
            Severity::Warning => write!(f, "warning {}", self.message),
        }
    }
}

/// Ordered, append-only lists of error and warning messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Append a finding to the list matching its severity.
    pub fn record(&mut self, finding: Finding) {
        match finding.severity {
            Severity::Error => self.errors.push(finding.message),
            Severity::Warning => self.warnings.push(finding.message),
        }
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// True when no errors were recorded. Warnings do not count.
    pub fn is_conformant(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Extend<Finding> for Diagnostics {
    fn extend<T: IntoIterator<Item = Finding>>(&mut self, iter: T) {
        for finding in iter {
            self.record(finding);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_routes_by_severity() {
        let mut d = Diagnostics::new();
        d.extend([
            Finding::error("first"),
            Finding::warning("meh"),
            Finding::error("second"),
        ]);
        assert_eq!(d.errors(), ["first", "second"]);
        assert_eq!(d.warnings(), ["meh"]);
        assert!(!d.is_conformant());
    }

    #[test]
    fn test_warnings_alone_are_conformant() {
        let mut d = Diagnostics::new();
        d.warning("stylistic");
        assert!(d.is_conformant());
    }

    #[test]
    fn test_finding_display() {
        assert_eq!(Finding::error("x").to_string(), "ERROR x");
        assert_eq!(Finding::warning("y").to_string(), "warning y");
    }
}
