//! # Rule Engine
//!
//! Runs an ordered list of independent rules over a context and gathers
//! their findings. Rules are plain descriptors (a name plus two function
//! pointers), assembled in explicit lists such as
//! [`local_rules`](crate::local::local_rules).
//!
//! A rule reports problems with the vocabulary as [`Finding`]s. A
//! [`RuleFault`] means the rule itself could not do its job: a rendering
//! could not be retrieved or parsed, or a record it depends on is missing.
//!
//! In [`FailureMode::Collect`] a fault becomes one error finding and the
//! remaining rules still run. In [`FailureMode::Bail`] the first fault or
//! error finding stops the run.

use thiserror::Error;
use vocab_core::Finding;

/// Outcome of a single rule.
pub type RuleResult = Result<Vec<Finding>, RuleFault>;

/// A rule could not be evaluated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleFault {
    /// A remote rendering could not be retrieved.
    #[error("cannot retrieve {representation}: {message}")]
    Retrieval {
        representation: String,
        message: String,
    },

    /// A retrieved rendering could not be parsed.
    #[error("malformed {format}: {message}")]
    Malformed { format: String, message: String },

    /// Extraction did not keep a record this rule needs.
    #[error("no {0} recorded during extraction")]
    MissingRecord(&'static str),
}

/// A named check over a context of type `C`.
pub struct Rule<C> {
    pub name: &'static str,
    /// Whether the rule is relevant for this context at all.
    pub applies: fn(&C) -> bool,
    pub check: fn(&C) -> RuleResult,
}

impl<C> Rule<C> {
    /// A rule that applies to every context.
    pub fn new(name: &'static str, check: fn(&C) -> RuleResult) -> Self {
        Self {
            name,
            applies: |_| true,
            check,
        }
    }

    /// Restrict the rule to contexts satisfying `applies`.
    pub fn when(mut self, applies: fn(&C) -> bool) -> Self {
        self.applies = applies;
        self
    }
}

impl<C> std::fmt::Debug for Rule<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

/// How the engine reacts to errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailureMode {
    /// Run every rule; downgrade faults to error findings.
    #[default]
    Collect,
    /// Stop at the first fault or error finding.
    Bail,
}

/// The run was stopped early.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("stopped at rule {rule}: {reason}")]
    Bailed {
        rule: &'static str,
        reason: String,
        /// Findings gathered up to and including the stopping rule.
        findings: Vec<Finding>,
    },
}

impl EngineError {
    pub fn into_findings(self) -> Vec<Finding> {
        match self {
            EngineError::Bailed { findings, .. } => findings,
        }
    }
}

/// An ordered rule list with a failure mode.
#[derive(Debug)]
pub struct RuleEngine<C> {
    rules: Vec<Rule<C>>,
    mode: FailureMode,
}

impl<C> RuleEngine<C> {
    pub fn new(rules: Vec<Rule<C>>) -> Self {
        Self {
            rules,
            mode: FailureMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: FailureMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> FailureMode {
        self.mode
    }

    pub fn rule_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|r| r.name)
    }

    /// Run every applicable rule in order.
    ///
    /// Rules must not depend on each other, so running the same engine
    /// twice over the same context yields the same findings.
    ///
    /// # Errors
    ///
    /// Only in [`FailureMode::Bail`]: [`EngineError::Bailed`] at the first
    /// fault or error finding.
    pub fn run(&self, ctx: &C) -> Result<Vec<Finding>, EngineError> {
        let mut findings = Vec::new();

        for rule in &self.rules {
            if !(rule.applies)(ctx) {
                tracing::trace!(rule = rule.name, "rule not applicable");
                continue;
            }

            match (rule.check)(ctx) {
                Ok(found) => {
                    tracing::debug!(rule = rule.name, findings = found.len(), "rule checked");
                    let first_error = found.iter().find(|f| f.is_error()).map(|f| f.message.clone());
                    findings.extend(found);
                    if let (FailureMode::Bail, Some(reason)) = (self.mode, first_error) {
                        return Err(EngineError::Bailed {
                            rule: rule.name,
                            reason,
                            findings,
                        });
                    }
                }
                Err(fault) => {
                    tracing::warn!(rule = rule.name, %fault, "rule faulted");
                    findings.push(Finding::error(format!("{}: {fault}", rule.name)));
                    if self.mode == FailureMode::Bail {
                        return Err(EngineError::Bailed {
                            rule: rule.name,
                            reason: fault.to_string(),
                            findings,
                        });
                    }
                }
            }
        }

        Ok(findings)
    }
}
