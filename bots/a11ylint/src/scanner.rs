// SPDX-License-Identifier: PMPL-1.0-or-later
//! Directory scanner for running the rule battery across a project.
//!
//! Walks directory trees, picks markup files by extension, and evaluates
//! every applicable rule against each file's full text.

use crate::config::Config;
use crate::error::Result;
use crate::fleet::{LintReport, WcagLevel};
use crate::rules::{self, Rule};
use std::path::Path;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Whether a rule should run for this file and level
fn applies(rule: &dyn Rule, path: Option<&Path>, level: WcagLevel) -> bool {
    if !rule.applies_to_level(level) {
        return false;
    }

    match path.and_then(|p| p.extension()).and_then(|e| e.to_str()) {
        Some(ext) => rule
            .applicable_extensions()
            .iter()
            .any(|e| e.eq_ignore_ascii_case(ext)),
        None => true,
    }
}

/// Run the rule battery over one document already in memory.
///
/// Without a path (or with an extensionless one) every rule at or below
/// `level` runs.
pub fn scan_markup(path: Option<&Path>, content: &str, level: WcagLevel) -> LintReport {
    let mut report = LintReport::new();
    report.files_scanned = 1;

    for rule in rules::catalogue() {
        if !applies(rule.as_ref(), path, level) {
            continue;
        }

        let (verdict, finding) = rules::evaluate(rule.as_ref(), path, content);
        debug!(rule = rule.id(), passed = verdict.passed, "rule evaluated");
        report.record(verdict, finding);
    }

    report
}

/// Scan a single file
pub fn scan_file(path: &Path, config: &Config) -> Result<LintReport> {
    let content = std::fs::read_to_string(path)?;
    Ok(scan_markup(Some(path), &content, config.level))
}

/// Scan a directory, skipping excluded and hidden directories
pub fn scan_directory(dir: &Path, config: &Config) -> Result<LintReport> {
    let mut report = LintReport::new();

    info!("Scanning directory: {}", dir.display());

    for entry in WalkDir::new(dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            if e.depth() > 0 && e.file_type().is_dir() {
                let name = e.file_name().to_str().unwrap_or("");
                return !config.scan.excludes_dir(name) && !name.starts_with('.');
            }
            true
        })
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                debug!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        if !config.scan.includes_extension(ext) {
            continue;
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                info!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };

        report.merge(scan_markup(Some(path), &content, config.level));
    }

    info!(
        "Scanned {} files, {} rule(s) failed",
        report.files_scanned,
        report.failed().len()
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_scan_nonexistent_dir() {
        let result = scan_directory(Path::new("/nonexistent/path"), &Config::default());
        // walkdir reports the missing root as an entry error, which is skipped
        let report = result.unwrap();
        assert_eq!(report.files_scanned, 0);
    }

    #[test]
    fn test_scan_markup_level_filter() {
        let html = r#"<div aria-live="polite">Updates</div>"#;
        let at_a = scan_markup(None, html, WcagLevel::A);
        let at_aa = scan_markup(None, html, WcagLevel::AA);

        assert_eq!(at_aa.verdicts.len(), rules::catalogue().len());
        assert_eq!(at_a.verdicts.len() + 1, at_aa.verdicts.len());
        assert_eq!(at_a.verdict("WCAG-4.1.3-aria-live-regions", None), None);
        assert_eq!(at_aa.verdict("WCAG-4.1.3-aria-live-regions", None), Some(true));
    }

    #[test]
    fn test_scan_markup_unknown_extension_runs_nothing() {
        let report = scan_markup(Some(Path::new("styles.css")), "<img src=a.png>", WcagLevel::AA);
        assert!(report.verdicts.is_empty());
        assert!(report.findings.is_empty());
    }

    #[test]
    fn test_scan_directory_filters_and_skips() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.html"), r#"<img src="a.png">"#).unwrap();
        fs::write(dir.path().join("notes.txt"), r#"<img src="a.png">"#).unwrap();
        fs::create_dir(dir.path().join("node_modules")).unwrap();
        fs::write(dir.path().join("node_modules").join("dep.html"), "<button>x</button>").unwrap();
        fs::create_dir(dir.path().join(".cache")).unwrap();
        fs::write(dir.path().join(".cache").join("c.html"), "<button>x</button>").unwrap();
        fs::create_dir(dir.path().join("pages")).unwrap();
        fs::write(dir.path().join("pages").join("App.jsx"), "<main></main>").unwrap();

        let report = scan_directory(dir.path(), &Config::default()).unwrap();
        assert_eq!(report.files_scanned, 2);

        let index = dir.path().join("index.html");
        assert_eq!(report.verdict("WCAG-1.1.1-alt-text", Some(index.as_path())), Some(false));
        let app = dir.path().join("pages").join("App.jsx");
        assert_eq!(report.verdict("WCAG-1.1.1-alt-text", Some(app.as_path())), Some(true));
        assert!(report.has_errors());
    }

    #[test]
    fn test_scan_file_missing() {
        let err = scan_file(Path::new("/nonexistent/index.html"), &Config::default());
        assert!(err.is_err());
    }
}
