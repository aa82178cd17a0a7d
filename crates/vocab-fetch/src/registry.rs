//! # Vocabulary Registry
//!
//! The IVOA vocabulary repository lists its vocabularies in `vocabs.conf`,
//! an INI-style file with one section per vocabulary:
//!
//! ```ini
//! [datalink/core]
//! timestamp: 2022-08-17
//! flavour: RDF Property
//!
//! [refframe]
//! path: refframe
//! ```
//!
//! A vocabulary's URI is the IVOA root followed by the section's `path`
//! key, or by the section name when there is none.

use vocab_core::IVOA_VOCABULARY_ROOT;

/// Vocabulary URIs listed in a registry document, in file order.
///
/// The `DEFAULT` section is not a vocabulary, but a `path` given there
/// applies to every section lacking its own. Keys are matched
/// case-insensitively; both `key = value` and `key: value` are accepted.
pub fn vocabulary_uris(conf: &str) -> Vec<String> {
    let mut sections: Vec<Section> = Vec::new();
    let mut current: Option<Section> = None;

    for raw in conf.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            sections.extend(current.take());
            current = Some(Section {
                name: name.trim().to_string(),
                path: None,
            });
            continue;
        }
        // Continuation lines belong to a multi-line value we never need.
        if raw.starts_with(char::is_whitespace) {
            continue;
        }
        if let (Some(section), Some((key, value))) = (current.as_mut(), split_entry(line)) {
            if key.eq_ignore_ascii_case("path") {
                section.path = Some(value.to_string());
            }
        }
    }
    sections.extend(current);

    let default_path = sections
        .iter()
        .find(|s| s.name == DEFAULT_SECTION)
        .and_then(|s| s.path.clone());
    sections
        .iter()
        .filter(|s| s.name != DEFAULT_SECTION)
        .map(|s| {
            let path = s.path.as_deref().or(default_path.as_deref()).unwrap_or(&s.name);
            format!("{IVOA_VOCABULARY_ROOT}{path}")
        })
        .collect()
}

const DEFAULT_SECTION: &str = "DEFAULT";

struct Section {
    name: String,
    path: Option<String>,
}

fn split_entry(line: &str) -> Option<(&str, &str)> {
    let at = line.find(['=', ':'])?;
    Some((line[..at].trim(), line[at + 1..].trim()))
}
