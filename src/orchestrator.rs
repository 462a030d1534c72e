//! Upgrade orchestrator for coordinating the entire workflow
//!
//! This module provides:
//! - Workflow coordination: read → extract → filter → fetch → decide → patch → write
//! - Dry-run mode support
//! - Package filter application

use crate::cli::CliArgs;
use crate::error::AppError;
use crate::manifest::{current_dependencies, read_manifest, upgrade_package_data, write_manifest};
use crate::output::UpgradeReport;
use crate::registry::{fetch_latest_versions, LatestVersionSource, StaticRegistry};
use crate::update::{upgrade_decisions, PackageFilter, UpgradeOptions};
use indexmap::IndexMap;
use std::path::PathBuf;
use tracing::{debug, info};

/// Orchestrator for coordinating the upgrade workflow
pub struct Orchestrator {
    /// Manifest to upgrade
    path: PathBuf,
    /// Whether the patched manifest is kept in memory only
    dry_run: bool,
    /// Upgrade policy
    options: UpgradeOptions,
    /// Package name filter
    filter: PackageFilter,
    /// Where latest versions come from
    source: Box<dyn LatestVersionSource>,
}

/// Result of running the orchestrator
#[derive(Debug)]
pub struct OrchestratorResult {
    /// Per-package decisions
    pub report: UpgradeReport,
    /// Manifest text with upgrades applied
    pub patched: String,
    /// Whether the manifest file was rewritten
    pub written: bool,
}

impl Orchestrator {
    /// Create a new orchestrator with the given CLI arguments
    pub fn new(args: &CliArgs) -> Result<Self, AppError> {
        let registry = StaticRegistry::new(args.registry_source()?)?;
        Self::with_source(args, Box::new(registry))
    }

    /// Create an orchestrator with a custom version source (for testing)
    pub fn with_source(
        args: &CliArgs,
        source: Box<dyn LatestVersionSource>,
    ) -> Result<Self, AppError> {
        Ok(Self {
            path: args.path.clone(),
            dry_run: args.is_dry_run(),
            options: args.upgrade_options(),
            filter: args.package_filter()?,
            source,
        })
    }

    /// Run the upgrade workflow
    pub async fn run(&self) -> Result<OrchestratorResult, AppError> {
        // Step 1: Read the manifest and extract the requested sections
        let content = read_manifest(&self.path)?;
        let sections = self.options.dep_sections();
        debug!(path = %self.path.display(), ?sections, "reading dependencies");

        let current: IndexMap<String, String> =
            current_dependencies(&self.path, &content, &sections)?
                .into_iter()
                .filter(|(name, _)| {
                    let keep = self.filter.should_process_package(name);
                    if !keep {
                        debug!(package = %name, "filtered out");
                    }
                    keep
                })
                .collect();

        // Step 2: Look up latest versions for every declared package
        let packages = current
            .iter()
            .filter(|(_, spec)| !spec.is_empty())
            .map(|(name, _)| name);
        let latest = fetch_latest_versions(self.source.as_ref(), packages).await?;

        // Step 3: Decide and synthesize
        let decisions = upgrade_decisions(&current, &latest, &self.options);
        let upgraded: IndexMap<String, String> = decisions
            .iter()
            .filter_map(|d| Some((d.package_name.clone(), d.upgraded_spec()?.to_string())))
            .collect();

        // Step 4: Patch the original text
        let patched = upgrade_package_data(&content, &current, &upgraded, &sections);

        // Step 5: Write back unless dry-run
        let written = !self.dry_run && patched != content;
        if written {
            write_manifest(&self.path, &patched)?;
            info!(path = %self.path.display(), upgrades = upgraded.len(), "manifest written");
        }

        Ok(OrchestratorResult {
            report: UpgradeReport::new(&self.path, decisions),
            patched,
            written,
        })
    }
}
