//! CLI argument parsing module for rangeup

use crate::domain::{Target, DEFAULT_TARGET};
use crate::error::ConfigError;
use crate::output::OutputConfig;
use crate::update::{PackageFilter, UpgradeOptions};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Upgrade package.json version ranges to the latest versions
#[derive(Parser, Debug, Clone)]
#[command(
    name = "rangeup",
    version,
    about = "Upgrade package.json version ranges while preserving notation and formatting"
)]
pub struct CliArgs {
    /// Manifest to upgrade
    #[arg(default_value = "package.json")]
    pub path: PathBuf,

    /// Static registry: a JSON file or http(s) URL mapping package names to latest versions
    #[arg(long, value_name = "PATH|URL")]
    pub registry: Option<String>,

    /// Release channel counted as latest; a value starting with @ names an explicit tag
    #[arg(long, default_value = DEFAULT_TARGET)]
    pub target: String,

    /// Sections to check, comma-separated (prod, dev, peer, optional, packageManager)
    #[arg(long, action = ArgAction::Append)]
    pub dep: Vec<String>,

    /// Replace ranges with the bare latest version
    #[arg(long)]
    pub remove_range: bool,

    // Package filters
    /// Only upgrade matching packages: name, glob with *, or /regex/ (can be specified multiple times)
    #[arg(long, action = ArgAction::Append)]
    pub filter: Vec<String>,

    /// Never upgrade matching packages: name, glob with *, or /regex/ (can be specified multiple times)
    #[arg(long, action = ArgAction::Append)]
    pub reject: Vec<String>,

    /// Write the upgraded manifest (default is a dry run)
    #[arg(short, long)]
    pub upgrade: bool,

    // Output options
    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output and debug logging
    #[arg(long)]
    pub verbose: bool,

    /// Disable colored text output
    #[arg(long)]
    pub no_color: bool,
}

impl CliArgs {
    /// Returns true unless `--upgrade` was given
    pub fn is_dry_run(&self) -> bool {
        !self.upgrade
    }

    /// Returns the static registry source
    pub fn registry_source(&self) -> Result<&str, ConfigError> {
        self.registry
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::MissingRegistry)
    }

    /// Build the upgrade options
    pub fn upgrade_options(&self) -> UpgradeOptions {
        UpgradeOptions::new()
            .with_target(Target::from(self.target.as_str()))
            .with_remove_range(self.remove_range)
            .with_dep(self.dep.clone())
    }

    /// Build the output configuration
    pub fn output_config(&self) -> OutputConfig {
        let config = OutputConfig::from_cli(self.json, self.verbose, self.is_dry_run());
        if self.no_color {
            config.without_color()
        } else {
            config
        }
    }

    /// Build the package filter
    pub fn package_filter(&self) -> Result<PackageFilter, ConfigError> {
        PackageFilter::new()
            .with_filter(&self.filter)?
            .with_reject(&self.reject)
    }
}
