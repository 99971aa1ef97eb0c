// src/extract/urls.rs
// =============================================================================
// This module pulls candidate URLs out of free-form text.
//
// Video descriptions mix full links ("https://example.com/shop") with bare
// domains ("sponsor: example.com") and sentence punctuation ("...(see
// example.com/faq)."). Instead of a full URL grammar we run one regex over
// the text and normalize each match:
// - strip trailing ) , . ; left over from the sentence
// - add https:// when no scheme was written
// - drop duplicates, keeping the order of first appearance
//
// Order matters: the checker addresses results by index, so the list we
// return here decides the slot every URL lands in.
//
// Known limitations (matching the grammar, not bugs):
// - IP-literal hosts get no special handling (http://127.0.0.1 is not matched
//   because its last label is a single character)
// - scheme-relative URLs (//host/path) lose their leading slashes
// - the domain part of an email address is picked up as a URL
// =============================================================================

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

// Optional scheme, one or more `label.` segments, a top-level label of at
// least two characters, then an optional path made of URL-safe characters.
//
// Host and path classes are ASCII-only and case-sensitive. Only the scheme
// ignores case: a global (?i) turns on Unicode case folding, under which
// [A-Za-z] also matches 'ſ' (U+017F) and the Kelvin sign (U+212A).
static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    // Rust concept: `Lazy` compiles the regex on first use, then reuses it
    Regex::new(
        r"(?i:https?://)?(?:[A-Za-z0-9_-]+\.)+[A-Za-z0-9_-]{2,}(?:/[A-Za-z0-9_\-.~:?#@!$&'()*+,;=%]*)?",
    )
    .expect("URL pattern is a valid regex")
});

// Characters trimmed from the end of every match
const TRAILING_PUNCTUATION: &[char] = &[')', ',', '.', ';'];

/// Extracts every candidate URL from `text`.
///
/// The result is deduplicated, every entry starts with `http://` or
/// `https://`, and entries appear in the order they were first seen.
/// Never fails: text without anything URL-shaped gives an empty list.
///
/// ```
/// let urls = linkpulse::extract_urls("Merch: example.com/shop. Old: http://a.io");
/// assert_eq!(urls, vec!["https://example.com/shop", "http://a.io"]);
/// ```
pub fn extract_urls(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    // HashSet answers "seen it already?", Vec keeps the order
    let mut seen = HashSet::new();
    let mut urls = Vec::new();

    // find_iter walks the text left to right, yielding non-overlapping matches
    for found in URL_PATTERN.find_iter(text) {
        let candidate = normalize(found.as_str());

        // insert() returns false when the URL was already in the set
        if seen.insert(candidate.clone()) {
            urls.push(candidate);
        }
    }

    urls
}

// Turns one raw regex match into a CandidateUrl
fn normalize(raw: &str) -> String {
    let trimmed = raw.trim_end_matches(TRAILING_PUNCTUATION);

    if has_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

// Case-insensitive check for http:// or https://
pub(crate) fn has_scheme(candidate: &str) -> bool {
    let lower = candidate
        .get(..8)
        .unwrap_or(candidate)
        .to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why once_cell::sync::Lazy?
//    - Compiling a regex is much slower than running it
//    - A static Lazy compiles it the first time it's used, then every call
//      shares the same compiled Regex
//
// 2. What is trim_end_matches with a slice of chars?
//    - It removes any of those characters from the end, repeatedly
//    - "page)." -> "page"
//
// 3. Why does extract_urls return Vec<String> and not Vec<&str>?
//    - Adding "https://" creates a new string, so we need owned values
// -----------------------------------------------------------------------------
