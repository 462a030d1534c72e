//! Upgrade eligibility for a single package
//!
//! Both inputs are comparable ranges, already unwrapped from any alias or
//! source URL.

use super::matcher::{ltr, satisfies, valid_range, valid_version};
use crate::parser::{first_comparator, is_wildcard, stringify};

/// Decides whether `latest` should replace `current`.
///
/// A package is eligible when the latest version is a concrete version
/// that falls outside the current range and, unless `downgrade` is set,
/// is not below it. Missing or malformed input is never eligible.
pub fn is_upgradeable(current: Option<&str>, latest: Option<&str>, downgrade: bool) -> bool {
    let (Some(current), Some(latest)) = (current, latest) else {
        return false;
    };

    if !valid_range(current) || is_wildcard(current) {
        return false;
    }

    let Some(first) = first_comparator(current) else {
        return false;
    };
    let version = stringify(&first);

    // `<` ranges exclude their own version, so compare against the full range
    let compare_to = if first.operator_str() == "<" {
        current
    } else {
        version.as_str()
    };

    valid_range(&version)
        && valid_version(latest)
        && !satisfies(latest, compare_to)
        && (downgrade || !ltr(latest, &version))
}
