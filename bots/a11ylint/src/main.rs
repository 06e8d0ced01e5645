// SPDX-License-Identifier: PMPL-1.0-or-later
//! a11ylint CLI - static WCAG checks over markup files
//!
//! Part of the gitbot-fleet ecosystem.

use a11ylint::color::{self, WCAG_AA_NORMAL_TEXT};
use a11ylint::config::{self, LogConfig, LogFormat};
use a11ylint::fleet::WcagLevel;
use a11ylint::report::{generate_report, OutputFormat};
use a11ylint::rules;
use a11ylint::scanner;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Static WCAG linter for HTML and JSX markup
#[derive(Parser)]
#[command(name = "a11ylint")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file (defaults are used when it does not exist)
    #[arg(long, global = true, default_value_os_t = config::default_config_path())]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every rule on each markup file under a directory
    Check {
        /// Directory to scan
        dir: PathBuf,

        /// WCAG conformance level (overrides the config file)
        #[arg(long)]
        level: Option<WcagLevelArg>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: FormatArg,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Run every rule on a single file
    Analyze {
        /// File to analyze
        file: PathBuf,

        /// WCAG conformance level (overrides the config file)
        #[arg(long)]
        level: Option<WcagLevelArg>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: FormatArg,
    },

    /// Check two colors against the AA contrast threshold for normal text
    Contrast {
        /// Foreground color (hex, rgb() or hsl())
        color1: String,

        /// Background color (hex, rgb() or hsl())
        color2: String,
    },

    /// List the rule catalogue
    Rules,

    /// Write a default configuration file
    Init {
        /// Where to write the configuration
        #[arg(long, default_value_os_t = config::default_config_path())]
        path: PathBuf,
    },
}

/// WCAG conformance level CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum WcagLevelArg {
    /// Level A - minimum
    A,
    /// Level AA - standard
    Aa,
    /// Level AAA - enhanced
    Aaa,
}

impl From<WcagLevelArg> for WcagLevel {
    fn from(arg: WcagLevelArg) -> Self {
        match arg {
            WcagLevelArg::A => WcagLevel::A,
            WcagLevelArg::Aa => WcagLevel::AA,
            WcagLevelArg::Aaa => WcagLevel::AAA,
        }
    }
}

/// Output format CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI
    Sarif,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Sarif => OutputFormat::Sarif,
        }
    }
}

fn init_logging(log: &LogConfig, verbose: bool) {
    let level = if verbose { "a11ylint=debug" } else { log.level.as_str() };
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    match log.format {
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = config::load_config(&cli.config)?;
    init_logging(&config.log, cli.verbose);

    match cli.command {
        Commands::Check { dir, level, format, output } => {
            if let Some(level) = level {
                config.level = level.into();
            }
            let report = scanner::scan_directory(&dir, &config)?;
            write_output(&generate_report(&report, format.into())?, output.as_deref())?;

            if report.blocks_release() {
                std::process::exit(1);
            }
        }

        Commands::Analyze { file, level, format } => {
            if let Some(level) = level {
                config.level = level.into();
            }
            let report = scanner::scan_file(&file, &config)?;
            println!("{}", generate_report(&report, format.into())?);

            if report.blocks_release() {
                std::process::exit(1);
            }
        }

        Commands::Contrast { color1, color2 } => {
            let rgb1 = color::convert_to_rgb(&color1)?;
            let rgb2 = color::convert_to_rgb(&color2)?;
            let ratio = color::contrast_ratio(rgb1, rgb2);
            let passes = color::check_contrast_ratio(&color1, &color2)?;

            println!(
                "{} ({}) vs {} ({})",
                color1,
                color::detect_color_mode(&color1),
                color2,
                color::detect_color_mode(&color2)
            );
            println!("Contrast ratio: {:.2}:1", ratio);
            println!(
                "{} (WCAG 1.4.3 AA normal text requires {}:1)",
                if passes { "PASS" } else { "FAIL" },
                WCAG_AA_NORMAL_TEXT
            );

            if !passes {
                std::process::exit(1);
            }
        }

        Commands::Rules => {
            for rule in rules::catalogue() {
                let (criterion, level) = rule.wcag();
                println!(
                    "{:<38} {:<7} {:<3} {:<8} {}",
                    rule.id(),
                    criterion,
                    level.to_string(),
                    rule.severity().to_string(),
                    rule.name()
                );
            }
        }

        Commands::Init { path } => {
            config::write_default_config(&path)?;
            println!("Created configuration file: {}", path.display());
        }
    }

    Ok(())
}

/// Write output to file or stdout
fn write_output(content: &str, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(p) => {
            std::fs::write(p, content)?;
            eprintln!("Report written to {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
