//! Identifier and label helpers.
//!
//! File names and diagram node identifiers are both derived from free text
//! through [`sanitize`], so the same string always maps to the same id in
//! pages, hierarchy diagrams and network payloads.

/// Strips every character that is not a letter or digit (underscore
/// included in the removals).
///
/// The output is safe as a Mermaid node id and as a file name stem. Distinct
/// inputs can collapse to the same output; collisions are not detected and
/// the last written page wins.
pub fn sanitize(text: &str) -> String {
    text.chars().filter(|c| c.is_alphanumeric()).collect()
}

/// IRI fragment after the last `/` or `#`. Empty when the IRI ends with a
/// separator.
pub fn local_name(iri: &str) -> String {
    iri.rsplit(['/', '#']).next().unwrap_or(iri).to_string()
}
