// SPDX-License-Identifier: PMPL-1.0-or-later
//! Accessibility rules over raw markup text.
//!
//! Every rule is a pure `&str -> bool` scan built on regular expressions;
//! nothing here builds a document tree. The [`Rule`] trait wraps each scan
//! with the metadata the fleet needs (WCAG criterion, severity, impact) so
//! the scanner can turn verdicts into findings.

pub mod alt_text;
pub mod aria;
pub mod keyboard;

use crate::fleet::{Finding, ImpactAssessment, RuleVerdict, Severity, WcagLevel};
use std::path::Path;

/// Markup file extensions the structural rules understand
pub const MARKUP_EXTENSIONS: &[&str] = &["html", "htm", "jsx", "tsx", "svelte", "vue"];

/// Trait implemented by all rules
pub trait Rule: Send + Sync {
    /// Stable identifier, `WCAG-<criterion>-<slug>`
    fn id(&self) -> &'static str;

    /// Human-readable name of this rule
    fn name(&self) -> &'static str;

    /// Short description of what this rule checks
    fn description(&self) -> &'static str;

    /// WCAG success criterion and the level it belongs to
    fn wcag(&self) -> (&'static str, WcagLevel);

    /// Severity of the finding emitted when the rule fails
    fn severity(&self) -> Severity;

    /// Who is affected when the rule fails
    fn impact(&self) -> ImpactAssessment;

    /// Message attached to the finding when the rule fails
    fn failure_message(&self) -> &'static str;

    /// Evaluate the rule against a markup document
    fn check(&self, markup: &str) -> bool;

    /// Finding category
    fn category(&self) -> &'static str {
        "accessibility/markup"
    }

    /// File extensions this rule applies to
    fn applicable_extensions(&self) -> &[&str] {
        MARKUP_EXTENSIONS
    }

    /// Check if this rule applies to the given WCAG level
    fn applies_to_level(&self, level: WcagLevel) -> bool {
        self.wcag().1 <= level
    }
}

/// The fixed rule battery, in reporting order
pub fn catalogue() -> Vec<Box<dyn Rule>> {
    let mut rules: Vec<Box<dyn Rule>> = vec![
        Box::new(alt_text::AltTextRule),
        Box::new(aria::AriaRule(aria::AriaCheck::Aggregate)),
    ];
    rules.extend(
        aria::AriaCheck::SUB_RULES
            .iter()
            .map(|check| Box::new(aria::AriaRule(*check)) as Box<dyn Rule>),
    );
    rules.push(Box::new(keyboard::KeyboardAccessRule));
    rules
}

/// Run one rule against a document and build its verdict, plus a finding
/// when it fails
pub fn evaluate(rule: &dyn Rule, file: Option<&Path>, markup: &str) -> (RuleVerdict, Option<Finding>) {
    let passed = rule.check(markup);
    let (criterion, level) = rule.wcag();

    let verdict = RuleVerdict {
        rule_id: rule.id().to_string(),
        rule_name: rule.name().to_string(),
        file: file.map(Path::to_path_buf),
        passed,
        wcag_criterion: criterion.to_string(),
        wcag_level: level,
    };

    let finding = (!passed).then(|| {
        Finding::new(rule.id(), rule.severity(), rule.failure_message())
            .with_wcag(criterion, level)
            .with_category(rule.category())
            .with_rule_name(rule.name())
            .with_file(file.map(Path::to_path_buf))
            .with_impact(rule.impact())
    });

    (verdict, finding)
}
