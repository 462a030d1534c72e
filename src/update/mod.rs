//! Upgrade logic for a dependency set
//!
//! This module provides:
//! - npm range semantics (`matcher`)
//! - Per-package eligibility and new specifier synthesis
//! - Preferred wildcard inference across the whole set
//! - Package filters from CLI args
//! - The pipeline tying these together over a current/latest map pair

mod eligibility;
mod filter;
pub mod matcher;
mod synthesize;
mod wildcard;

pub use eligibility::is_upgradeable;
pub use filter::PackageFilter;
pub use synthesize::upgrade_dependency_declaration;
pub use wildcard::preferred_wildcard;

use crate::domain::{is_tag_reference, resolve_dep_sections, Target, UpgradeDecision, WildcardStyle};
use crate::parser::{classify, first_comparator, parse_range};
use indexmap::IndexMap;
use tracing::debug;

/// Options controlling an upgrade run
#[derive(Debug, Clone, Default)]
pub struct UpgradeOptions {
    /// Which channel counts as latest, per package
    pub target: Target,
    /// Replace ranges with the bare latest version
    pub remove_range: bool,
    /// Requested sections, as given by the user (aliases allowed)
    pub dep: Vec<String>,
    /// Forces a wildcard style instead of inferring it from the current set
    pub wildcard: Option<WildcardStyle>,
}

impl UpgradeOptions {
    /// Create options with the default target and sections
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target policy
    pub fn with_target(mut self, target: impl Into<Target>) -> Self {
        self.target = target.into();
        self
    }

    /// Set whether ranges are dropped in favour of bare versions
    pub fn with_remove_range(mut self, remove_range: bool) -> Self {
        self.remove_range = remove_range;
        self
    }

    /// Set the requested sections
    pub fn with_dep(mut self, dep: Vec<String>) -> Self {
        self.dep = dep;
        self
    }

    /// Force a wildcard style
    pub fn with_wildcard(mut self, wildcard: WildcardStyle) -> Self {
        self.wildcard = Some(wildcard);
        self
    }

    /// Returns the requested sections with aliases resolved
    pub fn dep_sections(&self) -> Vec<String> {
        resolve_dep_sections(&self.dep)
    }
}

/// Returns true if the first comparator of `range` carries a prerelease
fn is_pre(range: Option<&str>) -> bool {
    range
        .and_then(first_comparator)
        .is_some_and(|parts| parts.is_prerelease())
}

/// Evaluates every package that has both a non-empty current specifier and
/// a latest version, in current map order.
pub fn upgrade_decisions(
    current: &IndexMap<String, String>,
    latest: &IndexMap<String, String>,
    options: &UpgradeOptions,
) -> Vec<UpgradeDecision> {
    let declared: IndexMap<String, String> = current
        .iter()
        .filter(|(_, spec)| !spec.is_empty())
        .map(|(name, spec)| (name.clone(), spec.clone()))
        .collect();

    let wildcard = options
        .wildcard
        .unwrap_or_else(|| preferred_wildcard(&declared));

    declared
        .iter()
        .filter_map(|(name, current_spec)| {
            let Some(latest_version) = latest.get(name) else {
                debug!(package = %name, "skipped: no latest version");
                return None;
            };
            Some(decide(name, current_spec, latest_version, wildcard, options))
        })
        .collect()
}

fn decide(
    name: &str,
    current: &str,
    latest: &str,
    wildcard: WildcardStyle,
    options: &UpgradeOptions,
) -> UpgradeDecision {
    let current_parsed = classify(current);
    let latest_parsed = classify(latest);
    let current_comparable = current_parsed.comparable();
    let latest_comparable = latest_parsed.comparable();

    let policy = options
        .target
        .resolve(name, &parse_range(current_comparable.unwrap_or_default()));
    let downgrade = is_pre(current_comparable) && is_tag_reference(&policy);

    if !is_upgradeable(current_comparable, latest_comparable, downgrade) {
        debug!(package = %name, current, latest, %policy, "not eligible");
        return UpgradeDecision::keep(name, current, latest);
    }

    // Eligibility guarantees both comparables are present
    let (Some(current_range), Some(latest_version)) = (current_comparable, latest_comparable)
    else {
        return UpgradeDecision::keep(name, current, latest);
    };

    let synthesized =
        upgrade_dependency_declaration(current_range, latest_version, wildcard, options.remove_range);
    let new_spec = current_parsed.rewrap(&synthesized);

    debug!(package = %name, from = current, to = %new_spec, "upgraded");
    UpgradeDecision::upgrade(name, current, latest, new_spec)
}

/// Returns the upgraded specifier of every eligible package, keyed by name
pub fn upgrade_dependencies(
    current: &IndexMap<String, String>,
    latest: &IndexMap<String, String>,
    options: &UpgradeOptions,
) -> IndexMap<String, String> {
    upgrade_decisions(current, latest, options)
        .into_iter()
        .filter_map(|decision| {
            let new_spec = decision.upgraded_spec()?.to_string();
            Some((decision.package_name, new_spec))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn upgrade(current: &[(&str, &str)], latest: &[(&str, &str)]) -> IndexMap<String, String> {
        upgrade_dependencies(&map(current), &map(latest), &UpgradeOptions::new())
    }

    #[test]
    fn test_lodash_scenario() {
        let upgraded = upgrade(&[("lodash", "^4.17.0")], &[("lodash", "4.17.21")]);
        assert_eq!(upgraded, map(&[("lodash", "^4.17.21")]));
    }

    #[test]
    fn test_partial_range_with_prerelease_latest() {
        let upgraded = upgrade(&[("a", "^1.2")], &[("a", "2.0.0-beta.1")]);
        assert_eq!(upgraded, map(&[("a", "^2.0")]));
    }

    #[test]
    fn test_url_dependency_does_not_set_wildcard() {
        let upgraded = upgrade(
            &[("lib", "github:org/lib.xyz#main"), ("b", ">=1.0.0 <2.0.0")],
            &[("b", "3.1.0")],
        );
        assert_eq!(upgraded, map(&[("b", "^3.1.0")]));
    }

    #[test]
    fn test_missing_latest_excluded() {
        let upgraded = upgrade(
            &[("lodash", "^4.17.0"), ("react", "^17.0.0")],
            &[("lodash", "4.17.21")],
        );
        assert_eq!(upgraded.len(), 1);
        assert!(!upgraded.contains_key("react"));
    }

    #[test]
    fn test_empty_current_dropped() {
        let decisions = upgrade_decisions(
            &map(&[("lodash", ""), ("react", "^17.0.0")]),
            &map(&[("lodash", "4.17.21"), ("react", "18.2.0")]),
            &UpgradeOptions::new(),
        );
        assert_eq!(decisions.len(), 1);
        assert_eq!(decisions[0].package_name, "react");
    }

    #[test]
    fn test_alias_preserved() {
        let upgraded = upgrade(&[("foo", "npm:foo@^1.0.0")], &[("foo", "2.0.0")]);
        assert_eq!(upgraded["foo"], "npm:foo@^2.0.0");

        let upgraded = upgrade(&[("bar", "npm:@scope/real@~1.0.0")], &[("bar", "1.1.0")]);
        assert_eq!(upgraded["bar"], "npm:@scope/real@~1.1.0");
    }

    #[test]
    fn test_alias_latest_unwrapped() {
        let upgraded = upgrade(&[("foo", "npm:foo@^1.0.0")], &[("foo", "npm:foo@2.0.0")]);
        assert_eq!(upgraded["foo"], "npm:foo@^2.0.0");
    }

    #[test]
    fn test_source_url_tag_replaced() {
        let upgraded = upgrade(
            &[("repo", "github:user/repo#v1.0.0")],
            &[("repo", "1.2.0")],
        );
        assert_eq!(upgraded["repo"], "github:user/repo#v1.2.0");

        let upgraded = upgrade(
            &[("repo", "https://github.com/user/repo.git#semver:^1.0.0")],
            &[("repo", "https://github.com/user/repo.git#v2.1.0")],
        );
        assert_eq!(
            upgraded["repo"],
            "https://github.com/user/repo.git#semver:^2.1.0"
        );
    }

    #[test]
    fn test_source_url_branch_not_upgraded() {
        let upgraded = upgrade(&[("repo", "github:user/repo#main")], &[("repo", "2.0.0")]);
        assert!(upgraded.is_empty());
    }

    #[test]
    fn test_downgrade_gate() {
        let current = map(&[("pkg", "2.0.0-beta.1")]);
        let latest = map(&[("pkg", "1.9.0")]);

        let latest_policy = upgrade_dependencies(&current, &latest, &UpgradeOptions::new());
        assert!(latest_policy.is_empty());

        let tag_policy =
            upgrade_dependencies(&current, &latest, &UpgradeOptions::new().with_target("@next"));
        assert_eq!(tag_policy["pkg"], "1.9.0");
    }

    #[test]
    fn test_downgrade_gate_keeps_operator() {
        let upgraded = upgrade_dependencies(
            &map(&[("pkg", "^2.0.0-beta.1")]),
            &map(&[("pkg", "1.9.0")]),
            &UpgradeOptions::new().with_target("@next"),
        );
        assert_eq!(upgraded["pkg"], "^1.9.0");
    }

    #[test]
    fn test_computed_target() {
        let options = UpgradeOptions::new().with_target(Target::computed(|name, _| {
            if name == "react" {
                "@canary".to_string()
            } else {
                "latest".to_string()
            }
        }));
        let current = map(&[("react", "19.0.0-rc.1"), ("vue", "3.5.0-rc.1")]);
        let latest = map(&[("react", "18.3.1"), ("vue", "3.4.0")]);

        let upgraded = upgrade_dependencies(&current, &latest, &options);
        assert_eq!(upgraded, map(&[("react", "18.3.1")]));
    }

    #[test]
    fn test_idempotence() {
        let current = map(&[
            ("lodash", "^4.17.0"),
            ("react", "~17.0"),
            ("vue", "2.x"),
            ("foo", "npm:foo@^1.0.0"),
            ("repo", "github:user/repo#v1.0.0"),
            ("range", ">=1.0.0 <2.0.0"),
        ]);
        let latest = map(&[
            ("lodash", "4.17.21"),
            ("react", "18.2.0"),
            ("vue", "3.4.0"),
            ("foo", "2.0.0"),
            ("repo", "1.2.0"),
            ("range", "3.0.0"),
        ]);
        let options = UpgradeOptions::new();

        let first = upgrade_dependencies(&current, &latest, &options);
        assert_eq!(first.len(), current.len());

        let second = upgrade_dependencies(&first, &latest, &options);
        assert!(second.is_empty(), "unexpected upgrades: {:?}", second);
    }

    #[test]
    fn test_notation_roundtrip() {
        let current = map(&[("pkg", "^1.2.3")]);
        let latest = map(&[("pkg", "1.2.3")]);
        assert!(upgrade_dependencies(&current, &latest, &UpgradeOptions::new()).is_empty());
        assert_eq!(
            upgrade_dependency_declaration("^1.2.3", "1.2.3", WildcardStyle::Caret, false),
            "^1.2.3"
        );
    }

    #[test]
    fn test_inferred_wildcard_for_compound_range() {
        let upgraded = upgrade(
            &[("a", "~1.0.0"), ("b", ">=1.0.0 <2.0.0")],
            &[("a", "1.0.0"), ("b", "3.0.0")],
        );
        assert_eq!(upgraded["b"], "~3.0.0");
    }

    #[test]
    fn test_explicit_wildcard() {
        let upgraded = upgrade_dependencies(
            &map(&[("b", "<2.0.0")]),
            &map(&[("b", "3.1.0")]),
            &UpgradeOptions::new().with_wildcard(WildcardStyle::DotX),
        );
        assert_eq!(upgraded["b"], "3.x");
    }

    #[test]
    fn test_remove_range() {
        let upgraded = upgrade_dependencies(
            &map(&[("lodash", "^4.17.0"), ("foo", "npm:foo@^1.0.0")]),
            &map(&[("lodash", "4.17.21"), ("foo", "2.0.0")]),
            &UpgradeOptions::new().with_remove_range(true),
        );
        assert_eq!(upgraded["lodash"], "4.17.21");
        assert_eq!(upgraded["foo"], "npm:foo@2.0.0");
    }

    #[test]
    fn test_decisions_include_kept_packages() {
        let decisions = upgrade_decisions(
            &map(&[("lodash", "^4.17.21"), ("react", "^17.0.0")]),
            &map(&[("lodash", "4.17.21"), ("react", "18.2.0")]),
            &UpgradeOptions::new(),
        );
        assert_eq!(decisions.len(), 2);
        assert!(!decisions[0].eligible);
        assert_eq!(decisions[1].upgraded_spec(), Some("^18.2.0"));
    }

    #[test]
    fn test_dep_sections_resolved() {
        let options = UpgradeOptions::new().with_dep(vec!["dev,peer".to_string()]);
        assert_eq!(options.dep_sections(), vec!["devDependencies", "peerDependencies"]);
    }
}
