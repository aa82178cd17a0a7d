//! # Error Types
//!
//! Errors owned by the core crate. Extraction, model-building, and retrieval
//! errors live in their respective crates and wrap these where needed.

use thiserror::Error;

/// An `ivoasem:vocflavour` literal that names no known flavour.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown vocabulary flavour '{0}'")]
pub struct UnknownFlavourError(pub String);
