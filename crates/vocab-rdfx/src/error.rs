//! Extraction error types.

use thiserror::Error;

/// Fatal failure while extracting triples. No triples are returned.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The markup is not well-formed XML.
    #[error("malformed RDF/XML near byte {position}: {source}")]
    Xml {
        /// Reader position when the error was detected.
        position: u64,
        source: quick_xml::Error,
    },

    /// The document ended while elements were still open.
    #[error("RDF/XML ended with {open} unclosed element(s), innermost <{element}>")]
    Unterminated {
        /// Canonical name of the innermost open element.
        element: String,
        /// Number of elements left open.
        open: usize,
    },

    /// A property element has no enclosing node carrying `rdf:about`.
    #[error("<{element}> is not inside a node with an rdf:about attribute")]
    MissingSubject {
        /// Canonical name of the property element.
        element: String,
    },

    /// A typed node lacks its `rdf:about` attribute.
    #[error("typed node <{element}> has no rdf:about attribute")]
    MissingIdentity {
        /// Canonical name of the typed node.
        element: String,
    },

    /// A prefix was used without a namespace declaration in scope.
    #[error("undeclared namespace prefix '{prefix}'")]
    UnboundPrefix { prefix: String },
}
