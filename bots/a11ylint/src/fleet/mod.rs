// SPDX-License-Identifier: PMPL-1.0-or-later
//! Finding and verdict types shared with the gitbot-fleet coordinator.
//!
//! Every rule evaluation yields a [`RuleVerdict`]; every failed verdict
//! additionally yields a [`Finding`] carrying severity, WCAG reference and
//! impact so the fleet can aggregate it with other bots' output.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Severity levels for findings (mirrors gitbot-shared-context::Severity)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Critical issue - blocks release
    Error,
    /// Should be addressed
    Warning,
    /// Informational
    Info,
}

impl Severity {
    /// Whether this severity blocks releases
    pub fn blocks_release(&self) -> bool {
        matches!(self, Severity::Error)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Info => write!(f, "INFO"),
        }
    }
}

/// WCAG conformance level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WcagLevel {
    /// Level A - minimum conformance
    A,
    /// Level AA - standard conformance
    AA,
    /// Level AAA - enhanced conformance
    AAA,
}

impl std::fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WcagLevel::A => write!(f, "A"),
            WcagLevel::AA => write!(f, "AA"),
            WcagLevel::AAA => write!(f, "AAA"),
        }
    }
}

/// Impact assessment: who is affected by an accessibility issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactAssessment {
    pub blind: bool,
    pub motor: bool,
    pub cognitive: bool,
}

impl ImpactAssessment {
    const NONE: Self = Self { blind: false, motor: false, cognitive: false };

    /// Screen reader users
    pub const fn blind() -> Self {
        Self { blind: true, ..Self::NONE }
    }

    /// Keyboard-only and switch users
    pub const fn motor() -> Self {
        Self { motor: true, ..Self::NONE }
    }

    pub const fn cognitive() -> Self {
        Self { cognitive: true, ..Self::NONE }
    }

    /// Screen reader users who also navigate by keyboard
    pub const fn blind_and_motor() -> Self {
        Self { blind: true, motor: true, ..Self::NONE }
    }

    /// Describe affected groups
    pub fn affected_groups(&self) -> Vec<&'static str> {
        let mut groups = Vec::new();
        if self.blind { groups.push("blind"); }
        if self.motor { groups.push("motor"); }
        if self.cognitive { groups.push("cognitive"); }
        groups
    }
}

/// Outcome of evaluating one rule against one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleVerdict {
    /// Rule identifier (e.g., "WCAG-1.1.1-alt-text")
    pub rule_id: String,
    /// Human-readable rule name
    pub rule_name: String,
    /// Document the rule ran against
    pub file: Option<PathBuf>,
    /// Whether the document satisfied the rule
    pub passed: bool,
    /// WCAG criterion reference
    pub wcag_criterion: String,
    /// WCAG conformance level
    pub wcag_level: WcagLevel,
}

/// A failed rule, in the fleet's finding format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    /// Unique identifier
    pub id: Uuid,
    /// Source bot identifier
    pub source: String,
    /// Rule identifier (e.g., "WCAG-1.1.1-alt-text")
    pub rule_id: String,
    /// Human-readable rule name
    pub rule_name: String,
    pub severity: Severity,
    /// Detailed message
    pub message: String,
    /// Category (e.g., "accessibility/wcag-a")
    pub category: String,
    /// File where issue was found
    pub file: Option<PathBuf>,
    /// When this finding was created
    pub created_at: DateTime<Utc>,
    /// WCAG criterion reference
    pub wcag_criterion: Option<String>,
    /// WCAG conformance level
    pub wcag_level: Option<WcagLevel>,
    /// Impact assessment
    pub impact: Option<ImpactAssessment>,
}

impl Finding {
    /// Create a new finding
    pub fn new(rule_id: &str, severity: Severity, message: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            source: "a11ylint".to_string(),
            rule_id: rule_id.to_string(),
            rule_name: rule_id.to_string(),
            severity,
            message: message.to_string(),
            category: String::new(),
            file: None,
            created_at: Utc::now(),
            wcag_criterion: None,
            wcag_level: None,
            impact: None,
        }
    }

    /// Set the WCAG criterion and level
    pub fn with_wcag(mut self, criterion: &str, level: WcagLevel) -> Self {
        self.wcag_criterion = Some(criterion.to_string());
        self.wcag_level = Some(level);
        self.category = match level {
            WcagLevel::A => "accessibility/wcag-a".to_string(),
            WcagLevel::AA => "accessibility/wcag-aa".to_string(),
            WcagLevel::AAA => "accessibility/wcag-aaa".to_string(),
        };
        self
    }

    /// Set the category
    pub fn with_category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }

    /// Set the rule name
    pub fn with_rule_name(mut self, name: &str) -> Self {
        self.rule_name = name.to_string();
        self
    }

    /// Set file location
    pub fn with_file(mut self, file: Option<PathBuf>) -> Self {
        self.file = file;
        self
    }

    /// Set impact assessment
    pub fn with_impact(mut self, impact: ImpactAssessment) -> Self {
        self.impact = Some(impact);
        self
    }

    /// Get location string for display
    pub fn location_string(&self) -> String {
        match &self.file {
            Some(f) => f.display().to_string(),
            None => "<input>".to_string(),
        }
    }
}

/// A collection of findings with aggregation methods
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FindingSet {
    /// All findings
    pub findings: Vec<Finding>,
}

impl FindingSet {
    /// Create empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a finding
    pub fn add(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    /// Extend with findings from an iterator
    pub fn extend(&mut self, findings: impl IntoIterator<Item = Finding>) {
        self.findings.extend(findings);
    }

    /// Get findings by severity
    pub fn by_severity(&self, severity: Severity) -> Vec<&Finding> {
        self.findings.iter().filter(|f| f.severity == severity).collect()
    }

    /// Get all errors
    pub fn errors(&self) -> Vec<&Finding> {
        self.by_severity(Severity::Error)
    }

    /// Get all warnings
    pub fn warnings(&self) -> Vec<&Finding> {
        self.by_severity(Severity::Warning)
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(|f| f.severity == Severity::Error)
    }

    /// Check if release should be blocked
    pub fn blocks_release(&self) -> bool {
        self.findings.iter().any(|f| f.severity.blocks_release())
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Everything a lint run produced: one verdict per (document, rule) pair
/// and one finding per failed verdict
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LintReport {
    /// Number of documents evaluated
    pub files_scanned: usize,
    pub verdicts: Vec<RuleVerdict>,
    pub findings: FindingSet,
}

impl LintReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a verdict, with the finding it produced if it failed
    pub fn record(&mut self, verdict: RuleVerdict, finding: Option<Finding>) {
        self.verdicts.push(verdict);
        if let Some(finding) = finding {
            self.findings.add(finding);
        }
    }

    /// Fold another report (e.g. for a different file) into this one
    pub fn merge(&mut self, other: LintReport) {
        self.files_scanned += other.files_scanned;
        self.verdicts.extend(other.verdicts);
        self.findings.extend(other.findings.findings);
    }

    pub fn passed(&self) -> Vec<&RuleVerdict> {
        self.verdicts.iter().filter(|v| v.passed).collect()
    }

    pub fn failed(&self) -> Vec<&RuleVerdict> {
        self.verdicts.iter().filter(|v| !v.passed).collect()
    }

    /// Verdict of a rule for a given document, if it was evaluated
    pub fn verdict(&self, rule_id: &str, file: Option<&std::path::Path>) -> Option<bool> {
        self.verdicts
            .iter()
            .find(|v| v.rule_id == rule_id && v.file.as_deref() == file)
            .map(|v| v.passed)
    }

    pub fn has_errors(&self) -> bool {
        self.findings.has_errors()
    }

    pub fn blocks_release(&self) -> bool {
        self.findings.blocks_release()
    }
}
