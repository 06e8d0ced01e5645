// SPDX-License-Identifier: PMPL-1.0-or-later
//! Configuration handling for a11ylint
//!
//! Configuration only decides which files are scanned, at which WCAG level,
//! and how logs look. Rule semantics are fixed.

use crate::error::{LintError, Result};
use crate::fleet::WcagLevel;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Maximum WCAG level whose rules are evaluated
    #[serde(default = "default_level")]
    pub level: WcagLevel,

    /// File selection
    #[serde(default)]
    pub scan: ScanConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: default_level(),
            scan: ScanConfig::default(),
            log: LogConfig::default(),
        }
    }
}

fn default_level() -> WcagLevel {
    WcagLevel::AA
}

/// Which files a directory scan visits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// File extensions to lint, without the leading dot
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Directory names skipped during traversal
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            exclude: default_exclude(),
        }
    }
}

impl ScanConfig {
    /// Whether a file with this extension should be linted
    pub fn includes_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }

    /// Whether a directory with this name should be skipped
    pub fn excludes_dir(&self, name: &str) -> bool {
        self.exclude.iter().any(|d| d == name)
    }
}

fn default_extensions() -> Vec<String> {
    crate::rules::MARKUP_EXTENSIONS.iter().map(|e| e.to_string()).collect()
}

fn default_exclude() -> Vec<String> {
    vec![
        "node_modules".to_string(),
        ".git".to_string(),
        "target".to_string(),
        "dist".to_string(),
        "build".to_string(),
        "_build".to_string(),
        "vendor".to_string(),
        ".next".to_string(),
        ".nuxt".to_string(),
        "coverage".to_string(),
    ]
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Output style of the tracing subscriber
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

/// Load configuration from a path, falling back to defaults when the file
/// does not exist
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!("Config file not found at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;

    if config.scan.extensions.is_empty() {
        return Err(LintError::Config(format!(
            "{}: scan.extensions must list at least one extension",
            path.display()
        )));
    }

    debug!(?config, "Loaded configuration");
    Ok(config)
}

/// Get the default config path for a repository
pub fn default_config_path() -> PathBuf {
    PathBuf::from("a11ylint.toml")
}

/// Write default configuration to a file
pub fn write_default_config(path: &Path) -> Result<()> {
    let config = Config::default();

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = toml::to_string_pretty(&config)?;
    std::fs::write(path, content)?;
    Ok(())
}
