//! Preferred wildcard inference across a dependency map

use crate::domain::WildcardStyle;
use crate::parser::classify;
use indexmap::IndexMap;

/// Returns the style of the first constraint using a non-exact operator
/// family, scanning in map order. Falls back to caret.
///
/// Only the comparable range of each specifier is inspected, so alias
/// names and URL paths never contribute a style.
pub fn preferred_wildcard(dependencies: &IndexMap<String, String>) -> WildcardStyle {
    dependencies
        .values()
        .filter(|spec| !spec.is_empty())
        .find_map(|spec| classify(spec).comparable().and_then(WildcardStyle::detect))
        .unwrap_or_default()
}
