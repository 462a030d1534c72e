//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Human-readable upgrade display with colors
//! - Semantic version change type indication (major/minor/patch)
//! - Kept package display in verbose mode
//! - Summary line with a hint when nothing was written

use crate::domain::UpgradeDecision;
use crate::output::{OutputFormatter, UpgradeReport};
use crate::parser::{classify, first_comparator};
use colored::Colorize;
use std::io::Write;

/// Semantic version change type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionChangeType {
    /// Major version change (breaking)
    Major,
    /// Minor version change (features)
    Minor,
    /// Patch version change (fixes)
    Patch,
    /// Unknown or unparseable
    Unknown,
}

impl VersionChangeType {
    /// Determine the change type between two specifiers.
    ///
    /// Aliases and source URLs are unwrapped first; the first comparator
    /// of each range is compared part by part.
    pub fn from_specs(old: &str, new: &str) -> Self {
        let parts = |spec: &str| {
            let parsed = classify(spec);
            let first = first_comparator(parsed.comparable()?)?;
            Some((first.major, first.minor))
        };

        match (parts(old), parts(new)) {
            (Some((old_major, old_minor)), Some((new_major, new_minor))) => {
                if new_major != old_major {
                    VersionChangeType::Major
                } else if new_minor != old_minor {
                    VersionChangeType::Minor
                } else {
                    VersionChangeType::Patch
                }
            }
            _ => VersionChangeType::Unknown,
        }
    }

    /// Get the display label with color
    pub fn colored_label(&self) -> String {
        match self {
            VersionChangeType::Major => "major".red().bold().to_string(),
            VersionChangeType::Minor => "minor".yellow().to_string(),
            VersionChangeType::Patch => "patch".green().to_string(),
            VersionChangeType::Unknown => "?".dimmed().to_string(),
        }
    }

    /// Get the plain label
    pub fn label(&self) -> &'static str {
        match self {
            VersionChangeType::Major => "major",
            VersionChangeType::Minor => "minor",
            VersionChangeType::Patch => "patch",
            VersionChangeType::Unknown => "?",
        }
    }
}

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Also list kept packages
    verbose: bool,
    /// Whether the manifest is left untouched
    dry_run: bool,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter with color option
    pub fn with_color(verbose: bool, dry_run: bool, color: bool) -> Self {
        Self {
            verbose,
            dry_run,
            color,
        }
    }

    fn max_name_length<'a>(&self, decisions: impl Iterator<Item = &'a UpgradeDecision>) -> usize {
        decisions.map(|d| d.package_name.len()).max().unwrap_or(0)
    }

    fn format_upgrade_line(
        &self,
        name: &str,
        current: &str,
        new_spec: &str,
        width: usize,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let change_type = VersionChangeType::from_specs(current, new_spec);

        if self.color {
            let name_display = format!("{:width$}", name, width = width);
            writeln!(
                writer,
                "  {} {} {} {} [{}]",
                name_display,
                current.dimmed(),
                "→".dimmed(),
                new_spec.bright_white().bold(),
                change_type.colored_label()
            )
        } else {
            writeln!(
                writer,
                "  {:width$} {} -> {} [{}]",
                name,
                current,
                new_spec,
                change_type.label(),
                width = width
            )
        }
    }

    fn format_kept_line(
        &self,
        decision: &UpgradeDecision,
        width: usize,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if self.color {
            let name_display = format!("{:width$}", decision.package_name, width = width);
            writeln!(
                writer,
                "  {} {} {}",
                name_display.dimmed(),
                decision.current.dimmed(),
                format!("(latest {})", decision.latest).dimmed()
            )
        } else {
            writeln!(
                writer,
                "  {:width$} {} (latest {})",
                decision.package_name,
                decision.current,
                decision.latest,
                width = width
            )
        }
    }

    fn format_summary(&self, report: &UpgradeReport, writer: &mut dyn Write) -> std::io::Result<()> {
        if !report.has_upgrades() {
            let message = "All dependencies match the latest versions.";
            if self.color {
                return writeln!(writer, "{}", message.green());
            }
            return writeln!(writer, "{}", message);
        }

        let count = report.upgrades().count();
        let noun = if count == 1 { "upgrade" } else { "upgrades" };

        writeln!(writer)?;
        if self.dry_run {
            let hint = format!(
                "Run with -u to upgrade {}.",
                report.manifest.display()
            );
            if self.color {
                writeln!(writer, "{} {} {}", count.to_string().green(), noun, hint.dimmed())
            } else {
                writeln!(writer, "{} {} {}", count, noun, hint)
            }
        } else if self.color {
            writeln!(
                writer,
                "{} {} written to {}",
                count.to_string().green(),
                noun,
                report.manifest.display().to_string().bold()
            )
        } else {
            writeln!(writer, "{} {} written to {}", count, noun, report.manifest.display())
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &UpgradeReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let width = if self.verbose {
            self.max_name_length(report.decisions.iter())
        } else {
            self.max_name_length(report.upgrades())
        };

        for decision in report.upgrades() {
            if let Some(new_spec) = decision.upgraded_spec() {
                self.format_upgrade_line(
                    &decision.package_name,
                    &decision.current,
                    new_spec,
                    width,
                    writer,
                )?;
            }
        }

        if self.verbose {
            for decision in report.kept() {
                self.format_kept_line(decision, width, writer)?;
            }
        }

        self.format_summary(report, writer)
    }
}
