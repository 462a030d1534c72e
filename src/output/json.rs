//! JSON output formatter for machine processing
//!
//! Emits `{"upgraded": {"<name>": "<new spec>"}}`. In verbose mode every
//! evaluated package is listed under `decisions` as well.

use crate::domain::UpgradeDecision;
use crate::output::{OutputFormatter, UpgradeReport};
use indexmap::IndexMap;
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Include every decision, not just upgrades
    verbose: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    upgraded: IndexMap<&'a str, &'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    decisions: Option<&'a [UpgradeDecision]>,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &UpgradeReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let upgraded = report
            .upgrades()
            .filter_map(|d| Some((d.package_name.as_str(), d.upgraded_spec()?)))
            .collect();

        let output = JsonOutput {
            upgraded,
            decisions: self.verbose.then_some(report.decisions.as_slice()),
        };

        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)
    }
}
