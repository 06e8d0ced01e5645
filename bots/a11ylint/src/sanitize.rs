// SPDX-License-Identifier: PMPL-1.0-or-later
//! Comment stripping and whitespace normalization for markup sources.
//!
//! Rules that must ignore commented-out attributes (alt text, keyboard
//! access) run their scans over the output of [`remove_comments`].

use regex::Regex;
use std::sync::LazyLock;

/// Block comments, line comments and markup comments, in that priority.
///
/// The block alternative comes first so that `//` or `<!--` appearing inside
/// a `/* ... */` comment is swallowed by the enclosing block match.
static COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/\*[\s\S]*?\*/|//[^\r\n]*|<!--[\s\S]*?-->").expect("valid comment regex")
});

/// Collapse every run of whitespace to a single space and trim both ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strip block, line and markup comments, then normalize whitespace.
///
/// Line comments are matched naively: a `//` inside an attribute value
/// (e.g. a URL) also starts a comment.
pub fn remove_comments(text: &str) -> String {
    let stripped = COMMENT_RE.replace_all(text, "");
    normalize_whitespace(&stripped)
}
