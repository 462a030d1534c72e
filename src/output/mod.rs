//! Output formatting for upgrade results
//!
//! This module provides:
//! - Text output for human-readable display
//! - JSON output for machine processing

mod json;
mod text;

pub use json::JsonFormatter;
pub use text::{TextFormatter, VersionChangeType};

use crate::domain::UpgradeDecision;
use std::io::Write;
use std::path::PathBuf;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for machine processing
    Json,
}

/// Configuration for output formatting
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Output format (text, json)
    pub format: OutputFormat,
    /// Also list packages that stay as they are
    pub verbose: bool,
    /// Whether the manifest is left untouched
    pub dry_run: bool,
    /// Whether to use colors (when supported)
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            verbose: false,
            dry_run: true,
            color: true,
        }
    }
}

impl OutputConfig {
    /// Create configuration from CLI arguments
    pub fn from_cli(json: bool, verbose: bool, dry_run: bool) -> Self {
        let format = if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        };

        Self {
            format,
            verbose,
            dry_run,
            color: true,
        }
    }

    /// Disable colors
    pub fn without_color(mut self) -> Self {
        self.color = false;
        self
    }
}

/// Everything a formatter needs to report one run
#[derive(Debug, Clone)]
pub struct UpgradeReport {
    /// Manifest that was evaluated
    pub manifest: PathBuf,
    /// One decision per package with both a current and a latest version
    pub decisions: Vec<UpgradeDecision>,
}

impl UpgradeReport {
    /// Create a new report
    pub fn new(manifest: impl Into<PathBuf>, decisions: Vec<UpgradeDecision>) -> Self {
        Self {
            manifest: manifest.into(),
            decisions,
        }
    }

    /// Decisions that upgrade their package
    pub fn upgrades(&self) -> impl Iterator<Item = &UpgradeDecision> {
        self.decisions.iter().filter(|d| d.upgraded_spec().is_some())
    }

    /// Decisions that keep their package
    pub fn kept(&self) -> impl Iterator<Item = &UpgradeDecision> {
        self.decisions.iter().filter(|d| d.upgraded_spec().is_none())
    }

    /// Returns true if at least one package is upgraded
    pub fn has_upgrades(&self) -> bool {
        self.upgrades().next().is_some()
    }
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format and write an upgrade report
    fn format(&self, report: &UpgradeReport, writer: &mut dyn Write) -> std::io::Result<()>;
}

/// Create an output formatter based on configuration
pub fn create_formatter(config: &OutputConfig) -> Box<dyn OutputFormatter> {
    match config.format {
        OutputFormat::Text => Box::new(TextFormatter::with_color(
            config.verbose,
            config.dry_run,
            config.color,
        )),
        OutputFormat::Json => Box::new(JsonFormatter::new(config.verbose)),
    }
}
