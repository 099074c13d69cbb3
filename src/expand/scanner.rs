//! Extraction of directly-mentioned list names from message text.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// `@name` on a word boundary: start-of-string or whitespace before the `@`.
/// The greedy identifier class gives the trailing boundary for free — a
/// mention of `@engineering` can never yield the token `eng`.
static MENTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\s)@([-._a-zA-Z0-9]+)").expect("static regex"));

/// Returns the subset of known list names directly mentioned in `text`.
///
/// Matching is exact-name and case-sensitive; how often a name appears does
/// not matter. The result preserves the order of `names`, so callers passing
/// the store's sorted name list get sorted seeds.
///
/// `.`, `-`, and `_` belong to the identifier alphabet, so they bind to the
/// token: `"ping @eng."` mentions a list named `eng.`, not `eng`. Sentence
/// punctuation outside the alphabet (`,`, `!`, `?`) is a boundary as usual.
#[must_use]
pub fn scan_mentions(text: &str, names: &[String]) -> Vec<String> {
    let mentioned: HashSet<&str> = MENTION
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .collect();

    names
        .iter()
        .filter(|name| mentioned.contains(name.as_str()))
        .cloned()
        .collect()
}
