//! Dependency-bearing sections of a package.json manifest

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sections used when no `--dep` selector is given
pub const DEFAULT_DEP_SECTIONS: [&str; 4] = ["prod", "dev", "optional", "packageManager"];

/// Known dependency sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DependencySection {
    /// `dependencies` (alias `prod`)
    Dependencies,
    /// `devDependencies` (alias `dev`)
    DevDependencies,
    /// `peerDependencies` (alias `peer`)
    PeerDependencies,
    /// `optionalDependencies` (alias `optional`)
    OptionalDependencies,
    /// `overrides`, always patched alongside the requested sections
    Overrides,
    /// Top-level `packageManager` field formatted `name@version`
    PackageManager,
}

impl DependencySection {
    /// Returns the manifest key of this section
    pub fn key(&self) -> &'static str {
        match self {
            DependencySection::Dependencies => "dependencies",
            DependencySection::DevDependencies => "devDependencies",
            DependencySection::PeerDependencies => "peerDependencies",
            DependencySection::OptionalDependencies => "optionalDependencies",
            DependencySection::Overrides => "overrides",
            DependencySection::PackageManager => "packageManager",
        }
    }

    /// Resolves a short alias (`prod`, `dev`, `peer`, `optional`)
    pub fn from_alias(alias: &str) -> Option<Self> {
        match alias {
            "prod" => Some(DependencySection::Dependencies),
            "dev" => Some(DependencySection::DevDependencies),
            "peer" => Some(DependencySection::PeerDependencies),
            "optional" => Some(DependencySection::OptionalDependencies),
            _ => None,
        }
    }
}

impl fmt::Display for DependencySection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Resolves a section selector into manifest keys.
///
/// Each entry may itself be comma-separated. Aliases map to full keys;
/// anything unrecognised passes through unchanged as a literal key. An
/// empty selector falls back to [`DEFAULT_DEP_SECTIONS`].
pub fn resolve_dep_sections<S: AsRef<str>>(dep: &[S]) -> Vec<String> {
    let names: Vec<&str> = dep
        .iter()
        .flat_map(|d| d.as_ref().split(','))
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .collect();

    let names = if names.is_empty() {
        DEFAULT_DEP_SECTIONS.to_vec()
    } else {
        names
    };

    names
        .into_iter()
        .map(|name| {
            DependencySection::from_alias(name)
                .map(|s| s.key().to_string())
                .unwrap_or_else(|| name.to_string())
        })
        .collect()
}
