//! # Triples
//!
//! Subjects and objects are CURIEs when they fall under a known namespace
//! (see [`crate::namespace`]), full URIs or literals otherwise. Objects are
//! optional: an empty flag element such as `<ivoasem:deprecated/>` has
//! neither a resource reference nor text.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One (subject, predicate, object) statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: Option<String>,
}

impl Triple {
    /// Build a triple from anything string-like.
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: Option<impl Into<String>>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.map(Into::into),
        }
    }

    /// The object, or the empty string for flag triples.
    pub fn object_str(&self) -> &str {
        self.object.as_deref().unwrap_or("")
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.object {
            Some(o) => write!(f, "{} {} {}", self.subject, self.predicate, o),
            None => write!(f, "{} {} -", self.subject, self.predicate),
        }
    }
}
