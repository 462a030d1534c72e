//! New specifier synthesis
//!
//! Builds the replacement range for a package from its current range and
//! the latest version, keeping the current notation: operator, precision
//! and wildcard segments carry over, only the numbers move.

use super::matcher::valid_version;
use crate::domain::WildcardStyle;
use crate::parser::{is_wild_part, is_wildcard, parse_comparator, parse_range, SemverParts};

/// Returns the upgraded range for `current` given the concrete `latest` version.
///
/// `wildcard` is used only where the current range has no single operator to
/// carry over: `<`/`<=` bounds and compound ranges.
pub fn upgrade_dependency_declaration(
    current: &str,
    latest: &str,
    wildcard: WildcardStyle,
    remove_range: bool,
) -> String {
    let exact = latest.strip_prefix('=').unwrap_or(latest);
    let latest_parts = match parse_comparator(exact) {
        Some(parts) if parts.operator.is_none() && valid_version(exact) => parts,
        _ => return latest.to_string(),
    };

    if remove_range {
        return latest_parts.to_string();
    }

    if is_wildcard(current) {
        return current.to_string();
    }

    let parsed = parse_range(current);
    let mut comparators: Vec<&SemverParts> = parsed.iter().filter(|p| !p.is_separator()).collect();
    // least precise comparator first; sort_by_key is stable
    comparators.sort_by_key(|p| p.num_parts());

    let Some(declared) = comparators.first() else {
        return latest.to_string();
    };

    let choose = |declared_part: &Option<String>, latest_part: &Option<String>| {
        if is_wild_part(declared_part.as_deref()) {
            declared_part.clone()
        } else if declared_part.is_some() {
            latest_part.clone()
        } else {
            None
        }
    };

    // prerelease and build tags are only valid after a full major.minor.patch
    let full_precision = [&declared.major, &declared.minor, &declared.patch]
        .iter()
        .all(|p| p.is_some() && !is_wild_part(p.as_deref()));

    let version = SemverParts {
        operator: None,
        major: choose(&declared.major, &latest_parts.major),
        minor: choose(&declared.minor, &latest_parts.minor),
        patch: choose(&declared.patch, &latest_parts.patch),
        release: latest_parts.release.clone().filter(|_| full_precision),
        build: latest_parts.build.clone().filter(|_| full_precision),
    }
    .to_string();

    let operator = declared.operator_str();
    let has_wildcard = ["^", "~", ".*", ".x"].iter().any(|w| version.contains(w));
    let is_less_than = matches!(operator, "<" | "<=");
    let is_mixed = parsed.len() > 1;

    if !has_wildcard && (is_less_than || is_mixed) {
        return wildcard.apply(&version);
    }

    let operator = if operator == ">" { ">=" } else { operator };
    format!("{}{}", operator, version)
}
