//! Request Fingerprint Module
//!
//! Derives the cache key shared by both tiers from a request's path and
//! query string.
//!
//! The derivation is pure: the same path and query always produce the same
//! fingerprint. Query parameter order is deliberately left as the caller
//! sent it, so two orderings of the same parameters produce distinct
//! fingerprints and distinct cache entries.

use url::form_urlencoded;

/// Replacement for characters that may not appear in a fingerprint.
const PLACEHOLDER: char = '_';

fn is_unsafe(c: char) -> bool {
    matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' | '=')
}

/// Replaces every unsafe character in `input` with the placeholder.
pub fn sanitize(input: &str) -> String {
    input
        .chars()
        .map(|c| if is_unsafe(c) { PLACEHOLDER } else { c })
        .collect()
}

/// Re-encodes a raw query string deterministically, preserving parameter
/// order. Normalizes percent-encoding so that equivalent encodings of the
/// same query converge on one spelling.
pub fn encode_query(raw_query: &str) -> String {
    let pairs: Vec<(String, String)> = form_urlencoded::parse(raw_query.as_bytes())
        .into_owned()
        .collect();

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (name, value) in &pairs {
        serializer.append_pair(name, value);
    }
    serializer.finish()
}

// == Fingerprint ==
/// The derived cache identity of one request.
///
/// `partition` groups all cached variants of one endpoint (the sanitized
/// path); `key` identifies the exact variant (path plus query) and is the
/// lookup key in both tiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    /// Sanitized request path
    pub partition: String,
    /// Full fingerprint: sanitized path + `_` + sanitized encoded query
    pub key: String,
}

impl Fingerprint {
    /// Derives the fingerprint for a request path and its already-encoded
    /// query string.
    ///
    /// An empty query is valid and still participates: the key then ends in
    /// the separator.
    pub fn derive(path: &str, encoded_query: &str) -> Self {
        let partition = sanitize(path);
        let sanitized_query = sanitize(encoded_query);
        let key = format!("{partition}_{sanitized_query}");

        Self { partition, key }
    }
}
