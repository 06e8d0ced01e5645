// SPDX-License-Identifier: PMPL-1.0-or-later
//! Report generation for lint runs.
//!
//! Supports multiple output formats:
//! - Text: per-rule PASS/FAIL table followed by findings and a RESULT line
//! - JSON: the whole [`LintReport`] for programmatic consumption
//! - SARIF: Static Analysis Results Interchange Format for IDE/CI integration

use crate::error::Result;
use crate::fleet::{LintReport, Severity};
use serde::Serialize;
use std::fmt::Write as _;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI integration
    Sarif,
}

/// Generate a report from a lint run
pub fn generate_report(report: &LintReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(generate_text_report(report)),
        OutputFormat::Json => generate_json_report(report),
        OutputFormat::Sarif => generate_sarif_report(report),
    }
}

/// Generate human-readable text report
fn generate_text_report(report: &LintReport) -> String {
    let mut output = String::new();

    output.push_str("=== a11ylint WCAG Report ===\n\n");

    if report.verdicts.is_empty() {
        let _ = writeln!(output, "Files scanned: {}", report.files_scanned);
        output.push_str("No rules were evaluated.\n");
        return output;
    }

    let passed = report.passed().len();
    let failed = report.failed().len();
    let _ = writeln!(
        output,
        "Files scanned: {}, rule checks: {} passed, {} failed\n",
        report.files_scanned, passed, failed
    );

    let mut current_file = None;
    for verdict in &report.verdicts {
        if current_file != Some(&verdict.file) {
            current_file = Some(&verdict.file);
            let name = verdict
                .file
                .as_ref()
                .map(|f| f.display().to_string())
                .unwrap_or_else(|| "<input>".to_string());
            let _ = writeln!(output, "{}", name);
        }

        let _ = writeln!(
            output,
            "  {:<4}  {:<38}  WCAG {} ({})",
            if verdict.passed { "PASS" } else { "FAIL" },
            verdict.rule_id,
            verdict.wcag_criterion,
            verdict.wcag_level
        );
    }
    output.push('\n');

    let findings = &report.findings;
    let _ = writeln!(
        output,
        "Findings: {} error(s), {} warning(s), {} total\n",
        findings.errors().len(),
        findings.warnings().len(),
        findings.len()
    );

    for severity in &[Severity::Error, Severity::Warning, Severity::Info] {
        let sev_findings = findings.by_severity(*severity);
        if sev_findings.is_empty() {
            continue;
        }

        let _ = writeln!(output, "--- {} ({}) ---", severity, sev_findings.len());

        for finding in sev_findings {
            let _ = writeln!(output, "[{}] {}", finding.rule_id, finding.message);
            let _ = writeln!(output, "  Location: {}", finding.location_string());

            if let (Some(criterion), Some(level)) = (&finding.wcag_criterion, &finding.wcag_level) {
                let _ = writeln!(output, "  WCAG: {} (Level {})", criterion, level);
            }

            if let Some(ref impact) = finding.impact {
                let groups = impact.affected_groups();
                if !groups.is_empty() {
                    let _ = writeln!(output, "  Affects: {}", groups.join(", "));
                }
            }

            output.push('\n');
        }
    }

    if report.blocks_release() {
        output.push_str("RESULT: RELEASE BLOCKED (errors found)\n");
    } else if !findings.is_empty() {
        output.push_str("RESULT: PASS WITH WARNINGS\n");
    } else {
        output.push_str("RESULT: PASS\n");
    }

    output
}

/// Generate JSON report
fn generate_json_report(report: &LintReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// SARIF report structure (simplified)
#[derive(Debug, Serialize)]
struct SarifReport {
    #[serde(rename = "$schema")]
    schema: String,
    version: String,
    runs: Vec<SarifRun>,
}

#[derive(Debug, Serialize)]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>,
}

#[derive(Debug, Serialize)]
struct SarifTool {
    driver: SarifDriver,
}

#[derive(Debug, Serialize)]
struct SarifDriver {
    name: String,
    version: String,
    rules: Vec<SarifRule>,
}

#[derive(Debug, Serialize)]
struct SarifRule {
    id: String,
    name: String,
    #[serde(rename = "shortDescription")]
    short_description: SarifMessage,
}

#[derive(Debug, Serialize)]
struct SarifResult {
    #[serde(rename = "ruleId")]
    rule_id: String,
    level: String,
    message: SarifMessage,
    locations: Vec<SarifLocation>,
}

#[derive(Debug, Serialize)]
struct SarifMessage {
    text: String,
}

#[derive(Debug, Serialize)]
struct SarifLocation {
    #[serde(rename = "physicalLocation")]
    physical_location: SarifPhysicalLocation,
}

#[derive(Debug, Serialize)]
struct SarifPhysicalLocation {
    #[serde(rename = "artifactLocation")]
    artifact_location: SarifArtifactLocation,
}

#[derive(Debug, Serialize)]
struct SarifArtifactLocation {
    uri: String,
}

/// Generate SARIF report
fn generate_sarif_report(report: &LintReport) -> Result<String> {
    let rules: Vec<SarifRule> = crate::rules::catalogue()
        .iter()
        .map(|r| SarifRule {
            id: r.id().to_string(),
            name: r.name().to_string(),
            short_description: SarifMessage { text: r.description().to_string() },
        })
        .collect();

    let results: Vec<SarifResult> = report.findings.findings.iter().map(|f| {
        let level = match f.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "note",
        };

        let locations = f
            .file
            .iter()
            .map(|file| SarifLocation {
                physical_location: SarifPhysicalLocation {
                    artifact_location: SarifArtifactLocation {
                        uri: file.display().to_string(),
                    },
                },
            })
            .collect();

        SarifResult {
            rule_id: f.rule_id.clone(),
            level: level.to_string(),
            message: SarifMessage { text: f.message.clone() },
            locations,
        }
    }).collect();

    let sarif = SarifReport {
        schema: "https://json.schemastore.org/sarif-2.1.0.json".to_string(),
        version: "2.1.0".to_string(),
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: "a11ylint".to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    rules,
                },
            },
            results,
        }],
    };

    Ok(serde_json::to_string_pretty(&sarif)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::WcagLevel;
    use crate::scanner::scan_markup;
    use std::path::Path;

    fn failing_report() -> LintReport {
        scan_markup(Some(Path::new("index.html")), r#"<img src="a.png">"#, WcagLevel::AA)
    }

    #[test]
    fn test_text_report_empty() {
        let report = generate_report(&LintReport::new(), OutputFormat::Text).unwrap();
        assert!(report.contains("No rules were evaluated"));
    }

    #[test]
    fn test_text_report_with_findings() {
        let report = failing_report();
        let text = generate_report(&report, OutputFormat::Text).unwrap();
        assert!(text.contains("index.html"));
        assert!(text.contains(&format!(
            "Findings: {} error(s), {} warning(s), {} total",
            report.findings.errors().len(),
            report.findings.warnings().len(),
            report.findings.len()
        )));
        assert!(text.contains("FAIL  WCAG-1.1.1-alt-text"));
        assert!(text.contains("PASS  WCAG-2.1.1-keyboard-access"));
        assert!(text.contains("Affects: blind"));
        assert!(text.contains("RELEASE BLOCKED"));
    }

    #[test]
    fn test_text_report_warnings_only() {
        // Passes every error rule; only the live region check fails
        let html = r#"<input aria-invalid="true" aria-label="Email" tabindex="0">"#;
        let report = scan_markup(Some(Path::new("plain.html")), html, WcagLevel::AA);
        assert!(!report.blocks_release());
        let text = generate_report(&report, OutputFormat::Text).unwrap();
        assert!(text.contains("Findings: 0 error(s)"));
        assert!(text.contains("RESULT: PASS WITH WARNINGS"));
    }

    #[test]
    fn test_json_report() {
        let json = generate_report(&failing_report(), OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
        assert_eq!(parsed["files_scanned"], 1);
        assert!(parsed["verdicts"].is_array());
        assert!(parsed["findings"]["findings"].is_array());
    }

    #[test]
    fn test_sarif_report() {
        let sarif = generate_report(&failing_report(), OutputFormat::Sarif).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&sarif).expect("valid JSON");
        assert_eq!(parsed["version"], "2.1.0");
        assert_eq!(parsed["runs"][0]["tool"]["driver"]["name"], "a11ylint");
        let results = parsed["runs"][0]["results"].as_array().unwrap();
        assert!(results.iter().any(|r| r["ruleId"] == "WCAG-1.1.1-alt-text" && r["level"] == "error"));
        assert_eq!(
            results[0]["locations"][0]["physicalLocation"]["artifactLocation"]["uri"],
            "index.html"
        );
    }
}
