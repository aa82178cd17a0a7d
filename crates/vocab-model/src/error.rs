//! Model construction errors.

use thiserror::Error;
use vocab_core::Flavour;
use vocab_rdfx::ExtractError;

use crate::vocabulary::Vocabulary;

/// Structural failure while building a [`Vocabulary`].
///
/// Missing labels, dangling references and the like are not build errors;
/// they end up in the model's diagnostics.
#[derive(Error, Debug)]
pub enum BuildError {
    /// The declared flavour is not one of the known flavours. `partial`
    /// carries the URI and the diagnostics gathered before giving up.
    #[error("flavour '{flavour}' unknown (expected one of {})", Flavour::known_names())]
    UnknownFlavour {
        flavour: String,
        partial: Box<Vocabulary>,
    },

    /// The document could not be turned into triples.
    #[error("cannot extract triples: {0}")]
    Extract(#[from] ExtractError),
}

impl BuildError {
    /// The partially built vocabulary, if construction got that far.
    pub fn partial(&self) -> Option<&Vocabulary> {
        match self {
            BuildError::UnknownFlavour { partial, .. } => Some(partial),
            BuildError::Extract(_) => None,
        }
    }
}
