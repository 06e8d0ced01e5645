// SPDX-License-Identifier: PMPL-1.0-or-later
//! Image alt text rule - WCAG 1.1.1 Non-text Content (Level A)
//!
//! Every element whose role calls for a text alternative must carry an
//! `alt=` assignment in its own tag:
//! - `<img>` and the JSX `<Image>` component
//! - `<area>`
//! - `<input type="image">`
//! - `<video>`
//!
//! Comments are stripped first, so `// alt="..."` or `{/* alt="..." */}`
//! inside a JSX tag does not count.

use crate::fleet::{ImpactAssessment, Severity, WcagLevel};
use crate::rules::Rule;
use crate::sanitize::remove_comments;
use regex::Regex;
use std::sync::LazyLock;

static ALT_REQUIRED_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<(?:img|image|area|input[^>]*type=["']?image["']?|video)[^>]*>"#)
        .expect("valid alt tag regex")
});

static ALT_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"alt=["']?[^"']*["']?"#).expect("valid alt attribute regex"));

/// Whether every tag that needs a text alternative carries `alt=`.
///
/// Vacuously true when the markup contains no such tag.
pub fn check_alt(markup: &str) -> bool {
    let cleaned = remove_comments(markup);
    let mut all_valid = true;

    for tag in ALT_REQUIRED_TAG_RE.find_iter(&cleaned) {
        if !ALT_ATTR_RE.is_match(tag.as_str()) {
            tracing::debug!(tag = tag.as_str(), "missing alt attribute");
            all_valid = false;
        }
    }

    all_valid
}

/// Rule wrapper for [`check_alt`]
pub struct AltTextRule;

impl Rule for AltTextRule {
    fn id(&self) -> &'static str {
        "WCAG-1.1.1-alt-text"
    }

    fn name(&self) -> &'static str {
        "Non-text Content: Missing Alt"
    }

    fn description(&self) -> &'static str {
        "Checks <img>, <Image>, <area>, <input type=image> and <video> for an alt attribute (WCAG 1.1.1)"
    }

    fn wcag(&self) -> (&'static str, WcagLevel) {
        ("1.1.1", WcagLevel::A)
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn impact(&self) -> ImpactAssessment {
        ImpactAssessment::blind()
    }

    fn failure_message(&self) -> &'static str {
        "An element that requires a text alternative is missing its alt attribute."
    }

    fn check(&self, markup: &str) -> bool {
        check_alt(markup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_alt_required_tags() {
        let html = r#"
            <main>
                <div>
                    <h1>Page Heading</h1>
                    <p>Some paragraph text.</p>
                </div>
            </main>
        "#;
        assert!(check_alt(html));
    }

    #[test]
    fn test_all_alt_present() {
        let html = r##"
            <img src="image.jpg" alt="Description">
            <input type="image" src="button.png" alt="Submit">
            <area shape="rect" coords="34,44,270,350" href="#" alt="Area description">
            <video src="video.mp4" alt="Video description"></video>
        "##;
        assert!(check_alt(html));
    }

    #[test]
    fn test_missing_alt() {
        let html = r##"
            <img src="image.jpg">
            <input type="image" src="button.png">
            <area shape="rect" coords="34,44,270,350" href="#">
            <video src="video.mp4"></video>
        "##;
        assert!(!check_alt(html));
    }

    #[test]
    fn test_single_missing_alt_fails_whole_document() {
        let html = r#"<img src="a.png" alt="A"><img src="b.png"><img src="c.png" alt="">"#;
        assert!(!check_alt(html));
    }

    #[test]
    fn test_alt_added_passes() {
        assert!(!check_alt(r#"<img src="photo.jpg">"#));
        assert!(check_alt(r#"<img src="photo.jpg" alt="x">"#));
    }

    #[test]
    fn test_line_commented_alt_in_jsx() {
        let jsx = r#"
            <Image
                width={500}
                height={500}
                // alt="Descriptive alternative text"
                src="/some-image.jpg"
            />
        "#;
        assert!(!check_alt(jsx));
    }

    #[test]
    fn test_block_commented_alt_in_jsx() {
        let jsx = r#"<Image width={500} height={500} {/* alt="Descriptive alternative text" */} src="/some-image.jpg" />"#;
        assert!(!check_alt(jsx));
    }

    #[test]
    fn test_markup_commented_image_is_ignored() {
        let html = r#"<!-- <img src="old.png"> --><img src="new.png" alt="New">"#;
        assert!(check_alt(html));
    }

    #[test]
    fn test_text_input_does_not_need_alt() {
        assert!(check_alt(r#"<input type="text" name="q">"#));
    }

    #[test]
    fn test_case_insensitive_tags() {
        assert!(!check_alt(r#"<IMG SRC="a.png">"#));
        assert!(check_alt(r#"<IMG SRC="a.png" alt="A">"#));
    }

    #[test]
    fn test_rule_metadata() {
        let rule = AltTextRule;
        assert_eq!(rule.wcag(), ("1.1.1", WcagLevel::A));
        assert!(rule.applies_to_level(WcagLevel::A));
        assert!(!rule.check(r#"<img src="x.png">"#));
    }
}
