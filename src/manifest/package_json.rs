//! Current dependency extraction from package.json
//!
//! Handles:
//! - dependencies
//! - devDependencies
//! - peerDependencies
//! - optionalDependencies
//! - overrides (flat values and the nested `{ ".": "<version>" }` form)
//! - packageManager (`name@version`)

use crate::domain::DependencySection;
use crate::error::ManifestError;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::path::Path;

/// Key holding the package's own version inside a nested override
const OVERRIDE_SELF_KEY: &str = ".";

/// Returns the declared specifiers of the requested sections, merged in
/// section order.
///
/// A package listed in several sections keeps the position of its first
/// occurrence and the value of its last. Non-string values are skipped.
pub fn current_dependencies(
    path: &Path,
    content: &str,
    sections: &[String],
) -> Result<IndexMap<String, String>, ManifestError> {
    let json: Value = serde_json::from_str(content)
        .map_err(|e| ManifestError::json_parse_error(path, e.to_string()))?;

    let mut dependencies = IndexMap::new();

    for section in sections {
        match json.get(section) {
            Some(Value::Object(entries)) => collect_entries(entries, &mut dependencies),
            Some(Value::String(field)) if section == DependencySection::PackageManager.key() => {
                if let Some((name, version)) = field.split_once('@') {
                    dependencies.insert(name.to_string(), version.to_string());
                }
            }
            _ => {}
        }
    }

    Ok(dependencies)
}

fn collect_entries(entries: &Map<String, Value>, dependencies: &mut IndexMap<String, String>) {
    for (name, value) in entries {
        let spec = match value {
            Value::String(spec) => spec,
            Value::Object(nested) => match nested.get(OVERRIDE_SELF_KEY) {
                Some(Value::String(spec)) => spec,
                _ => continue,
            },
            _ => continue,
        };
        dependencies.insert(name.clone(), spec.clone());
    }
}
