//! # Namespace Canonicalization
//!
//! Maps the namespace URIs we understand to their conventional prefixes.
//! Everything downstream of the extractor sees `rdfs:label`, never
//! `{http://www.w3.org/2000/01/rdf-schema#}label`.
//!
//! Two input shapes are handled:
//!
//! - Clark notation as produced by namespace-aware XML readers
//!   (`{uri}local`), see [`canonicalize_name`].
//! - Bare absolute URIs such as attribute values (`rdf:resource`),
//!   see [`canonicalize_uri`].
//!
//! URI matching uses one combined, start-anchored pattern over all known
//! namespaces. Alternatives are ordered longest first, so a namespace nested
//! inside another wins over the shorter one.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

/// Namespace URIs with their canonical prefixes.
pub const KNOWN_NAMESPACES: &[(&str, &str)] = &[
    ("http://purl.org/dc/terms/", "dc"),
    ("http://www.w3.org/1999/02/22-rdf-syntax-ns#", "rdf"),
    ("http://www.w3.org/2000/01/rdf-schema#", "rdfs"),
    ("http://www.w3.org/2002/07/owl#", "owl"),
    ("http://www.w3.org/2004/02/skos/core#", "skos"),
    ("http://www.ivoa.net/rdf/ivoasem#", "ivoasem"),
];

static URI_PREFIX_PATTERN: Lazy<Regex> = Lazy::new(|| {
    // Assembled from escaped literals only, so compilation cannot fail.
    namespace_pattern(KNOWN_NAMESPACES).expect("namespace alternation is a valid regex")
});

/// Start-anchored alternation over the namespace URIs, longest first.
fn namespace_pattern(namespaces: &[(&str, &str)]) -> Result<Regex, regex::Error> {
    let mut uris: Vec<&str> = namespaces.iter().map(|(uri, _)| *uri).collect();
    uris.sort_by(|a, b| b.len().cmp(&a.len()));
    let alternation = uris
        .into_iter()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!("^(?:{alternation})"))
}

fn prefix_for(namespace_uri: &str) -> Option<&'static str> {
    KNOWN_NAMESPACES
        .iter()
        .find(|(uri, _)| *uri == namespace_uri)
        .map(|(_, prefix)| *prefix)
}

fn uri_for(prefix: &str) -> Option<&'static str> {
    KNOWN_NAMESPACES
        .iter()
        .find(|(_, p)| *p == prefix)
        .map(|(uri, _)| *uri)
}

/// Return a tag or attribute name with a canonical prefix.
///
/// `name` is either `{namespace-uri}local` or a plain string. Names in
/// unknown namespaces, and plain names, come back unchanged.
///
/// ```
/// use vocab_core::canonicalize_name;
///
/// assert_eq!(canonicalize_name("{http://purl.org/dc/terms/}foo"), "dc:foo");
/// assert_eq!(canonicalize_name("{http://dc.g-vo.org}foo"), "{http://dc.g-vo.org}foo");
/// assert_eq!(canonicalize_name("src"), "src");
/// ```
pub fn canonicalize_name(name: &str) -> String {
    if let Some(rest) = name.strip_prefix('{') {
        if let Some((namespace, local)) = rest.split_once('}') {
            if let Some(prefix) = prefix_for(namespace) {
                return format!("{prefix}:{local}");
            }
        }
    }
    name.to_string()
}

/// Return the prefixed form of `uri` if it starts with a known namespace.
///
/// ```
/// use vocab_core::canonicalize_uri;
///
/// assert_eq!(canonicalize_uri("http://purl.org/dc/terms/author"), "dc:author");
/// assert_eq!(canonicalize_uri("abc"), "abc");
/// ```
pub fn canonicalize_uri(uri: &str) -> String {
    match URI_PREFIX_PATTERN.find(uri) {
        Some(m) => match prefix_for(m.as_str()) {
            Some(prefix) => format!("{prefix}:{}", &uri[m.end()..]),
            None => uri.to_string(),
        },
        None => uri.to_string(),
    }
}

/// Rewrite all keys of an attribute map with [`canonicalize_name`].
pub fn canonicalize_attributes<I, K, V>(attributes: I) -> HashMap<String, V>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
{
    attributes
        .into_iter()
        .map(|(k, v)| (canonicalize_name(k.as_ref()), v))
        .collect()
}

/// Expand a CURIE with a known prefix back into an absolute URI.
///
/// Strings without a known prefix are returned unchanged.
pub fn expand_curie(curie: &str) -> String {
    if let Some((prefix, local)) = curie.split_once(':') {
        if let Some(uri) = uri_for(prefix) {
            return format!("{uri}{local}");
        }
    }
    curie.to_string()
}
