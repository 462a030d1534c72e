//! Upgrade decision for a single package

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of evaluating one package that has both a current specifier and a latest version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeDecision {
    /// Package name as declared in the manifest
    pub package_name: String,
    /// Declared specifier
    pub current: String,
    /// Latest version supplied by the registry
    pub latest: String,
    /// Whether the package should be upgraded
    pub eligible: bool,
    /// The synthesized specifier, present only when eligible
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_spec: Option<String>,
}

impl UpgradeDecision {
    /// Creates an eligible decision
    pub fn upgrade(
        package_name: impl Into<String>,
        current: impl Into<String>,
        latest: impl Into<String>,
        new_spec: impl Into<String>,
    ) -> Self {
        Self {
            package_name: package_name.into(),
            current: current.into(),
            latest: latest.into(),
            eligible: true,
            new_spec: Some(new_spec.into()),
        }
    }

    /// Creates a not-eligible decision
    pub fn keep(
        package_name: impl Into<String>,
        current: impl Into<String>,
        latest: impl Into<String>,
    ) -> Self {
        Self {
            package_name: package_name.into(),
            current: current.into(),
            latest: latest.into(),
            eligible: false,
            new_spec: None,
        }
    }

    /// Returns the new specifier when the decision is an upgrade
    pub fn upgraded_spec(&self) -> Option<&str> {
        if self.eligible {
            self.new_spec.as_deref()
        } else {
            None
        }
    }
}

impl fmt::Display for UpgradeDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upgraded_spec() {
            Some(new_spec) => write!(f, "{}: {} → {}", self.package_name, self.current, new_spec),
            None => write!(f, "{}: {} (latest {})", self.package_name, self.current, self.latest),
        }
    }
}
