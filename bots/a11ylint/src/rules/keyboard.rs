// SPDX-License-Identifier: PMPL-1.0-or-later
//! Keyboard access rule - WCAG 2.1.1 Keyboard (Level A)
//!
//! Interactive elements (`button`, `a`, `input`, `select`, `textarea`,
//! `video` and `div role="button"`) must either be focusable through an
//! explicit `tabindex` or carry a focus/click/key handler.

use crate::fleet::{ImpactAssessment, Severity, WcagLevel};
use crate::rules::Rule;
use crate::sanitize::remove_comments;
use regex::Regex;
use std::sync::LazyLock;

static INTERACTIVE_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)<(?:(?:button|a|input|select|textarea|video)\b|div\b[^>]*?role=["']button["'])([^>]*?)>"#,
    )
    .expect("valid interactive tag regex")
});

static KEYBOARD_HANDLER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)tabindex=|onfocus=|onclick=|onkeydown=|onkeyup=")
        .expect("valid keyboard handler regex")
});

/// Whether every interactive element is reachable or operable by keyboard.
///
/// Comments are stripped first. Vacuously true when there are no
/// interactive elements.
pub fn check_keyboard_access(markup: &str) -> bool {
    let cleaned = remove_comments(markup);
    let mut all_accessible = true;

    for tag in INTERACTIVE_TAG_RE.find_iter(&cleaned) {
        let tag = tag.as_str();
        tracing::debug!(tag, "evaluating keyboard access");

        if !KEYBOARD_HANDLER_RE.is_match(tag) {
            tracing::warn!(tag, "element is not keyboard accessible");
            all_accessible = false;
        }
    }

    all_accessible
}

/// Rule wrapper for [`check_keyboard_access`]
pub struct KeyboardAccessRule;

impl Rule for KeyboardAccessRule {
    fn id(&self) -> &'static str {
        "WCAG-2.1.1-keyboard-access"
    }

    fn name(&self) -> &'static str {
        "Keyboard: Interactive Element Access"
    }

    fn description(&self) -> &'static str {
        "Interactive elements need a tabindex or a focus, click or key handler (WCAG 2.1.1)"
    }

    fn wcag(&self) -> (&'static str, WcagLevel) {
        ("2.1.1", WcagLevel::A)
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn impact(&self) -> ImpactAssessment {
        ImpactAssessment::motor()
    }

    fn failure_message(&self) -> &'static str {
        "Interactive element has neither a tabindex nor a focus, click or key handler."
    }

    fn category(&self) -> &'static str {
        "accessibility/keyboard"
    }

    fn check(&self, markup: &str) -> bool {
        check_keyboard_access(markup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessible_elements() {
        let html = r##"
            <button tabindex="0">Click me</button>
            <a href="#" tabindex="0">Link</a>
            <input type="text" onfocus="handleFocus()">
            <select onkeydown="handleKey()"></select>
            <textarea onkeyup="handleKey()"></textarea>
            <video controls tabindex="0"></video>
            <div role="button" onclick="go()">Go</div>
        "##;
        assert!(check_keyboard_access(html));
    }

    #[test]
    fn test_negative_tabindex_counts_as_focusable() {
        assert!(check_keyboard_access(r#"<button tabindex="-1">X</button>"#));
        assert!(check_keyboard_access(r#"<div role="button" tabindex="-1">X</div>"#));
    }

    #[test]
    fn test_inaccessible_elements() {
        assert!(!check_keyboard_access("<button>Click me</button>"));
        assert!(!check_keyboard_access(r#"<a href="/home">Home</a>"#));
        assert!(!check_keyboard_access(r#"<input type="text">"#));
        assert!(!check_keyboard_access("<video controls></video>"));
    }

    #[test]
    fn test_div_button_role() {
        assert!(!check_keyboard_access(r#"<div class="btn" role="button">Go</div>"#));
        assert!(check_keyboard_access(r#"<div role="button" tabindex="0">Go</div>"#));
    }

    #[test]
    fn test_plain_div_is_not_interactive() {
        assert!(check_keyboard_access(r#"<div class="card">Text</div>"#));
        assert!(check_keyboard_access(r#"<div role="region">Text</div>"#));
    }

    #[test]
    fn test_prefix_tags_are_not_links() {
        assert!(check_keyboard_access("<aside>Note</aside><article>Body</article><abbr>A</abbr>"));
        assert!(check_keyboard_access("<audio src=\"a.mp3\"></audio><address>1 Main St</address>"));
    }

    #[test]
    fn test_no_interactive_elements() {
        assert!(check_keyboard_access("<main><p>Just text</p></main>"));
        assert!(check_keyboard_access(""));
    }

    #[test]
    fn test_one_bad_element_fails_document() {
        let html = r#"<button onclick="a()">A</button><button>B</button>"#;
        assert!(!check_keyboard_access(html));
    }

    #[test]
    fn test_commented_out_element_is_ignored() {
        let html = r#"<!-- <button>Old</button> --><button tabindex="0">New</button>"#;
        assert!(check_keyboard_access(html));
    }

    #[test]
    fn test_rule_metadata() {
        let rule = KeyboardAccessRule;
        assert_eq!(rule.wcag(), ("2.1.1", WcagLevel::A));
        assert_eq!(rule.impact().affected_groups(), vec!["motor"]);
        assert!(!rule.check("<button>x</button>"));
    }
}
