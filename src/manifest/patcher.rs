//! Span-based patching of package.json text
//!
//! Upgraded values are written back into the original text without
//! re-serializing it. Each dependency section is located by scanning the
//! top-level object, then every upgraded package is matched inside the
//! section by its exact current value. Only the value token is replaced,
//! so key order, whitespace and anything outside those tokens survive
//! byte for byte.

use crate::domain::DependencySection;
use indexmap::IndexMap;
use regex::Regex;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::ops::Range;
use tracing::{debug, warn};

/// A replacement of one byte range of the original text
#[derive(Debug, Clone, PartialEq, Eq)]
struct Edit {
    span: Range<usize>,
    replacement: String,
}

/// Returns the index just past the string starting at `start` (a `"`)
fn string_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return Some(i + 1),
            _ => i += 1,
        }
    }
    None
}

fn skip_whitespace(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

/// Returns the index of the brace closing the object opened at `open`
fn matching_brace(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            b'"' => {
                i = string_end(bytes, i)?;
                continue;
            }
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Finds the text span of every top-level `"<section>": { ... }` entry
/// whose key is in `sections`, from the key through the closing brace.
fn section_spans(text: &str, sections: &[String]) -> Vec<Range<usize>> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut depth = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'"' => {
                let Some(end) = string_end(bytes, i) else {
                    break;
                };
                if depth == 1 {
                    let key = &text[i + 1..end - 1];
                    let colon = skip_whitespace(bytes, end);
                    if bytes.get(colon) == Some(&b':') {
                        let value = skip_whitespace(bytes, colon + 1);
                        if bytes.get(value) == Some(&b'{') && sections.iter().any(|s| s == key) {
                            if let Some(close) = matching_brace(bytes, value) {
                                spans.push(i..close + 1);
                                i = close + 1;
                                continue;
                            }
                        }
                    }
                }
                i = end;
                continue;
            }
            b'{' | b'[' => depth += 1,
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
        i += 1;
    }

    spans
}

/// Matches `"name": "<current>"` and the nested `"name": { ".": "<current>" }`
/// form, capturing the value token in group 1
fn dependency_pattern(name: &str, current: &str) -> Option<Regex> {
    let pattern = format!(
        r#""{}"\s*:\s*(?:"|\{{\s*"[^"]"\s*:\s*")({})""#,
        regex::escape(name),
        regex::escape(current)
    );
    Regex::new(&pattern).ok()
}

/// Locates the version token of a `"packageManager": "name@version"` field
fn package_manager_edit(text: &str, upgraded: &IndexMap<String, String>) -> Option<(String, Edit)> {
    let json: Value = match serde_json::from_str(text) {
        Ok(json) => json,
        Err(e) => {
            warn!(error = %e, "packageManager not patched: manifest is not valid JSON");
            return None;
        }
    };

    let field = json.get(DependencySection::PackageManager.key())?.as_str()?;
    let name = field.split('@').next().unwrap_or_default();
    let new_version = upgraded.get(name)?;

    let re = Regex::new(r#""packageManager"\s*:\s*"[^"@]*@([^"]*)""#).ok()?;
    let token = re.captures(text)?.get(1)?;

    Some((
        name.to_string(),
        Edit {
            span: token.range(),
            replacement: new_version.clone(),
        },
    ))
}

/// Applies edits in order of position, dropping any that overlap an earlier one
fn apply_edits(text: &str, mut edits: Vec<Edit>) -> String {
    edits.sort_by_key(|e| (e.span.start, e.span.end));

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for edit in edits {
        if edit.span.start < cursor {
            debug!(span = ?edit.span, "overlapping edit skipped");
            continue;
        }
        out.push_str(&text[cursor..edit.span.start]);
        out.push_str(&edit.replacement);
        cursor = edit.span.end;
    }
    out.push_str(&text[cursor..]);
    out
}

/// Writes upgraded specifiers into the manifest text.
///
/// `dep_sections` are resolved section keys; `overrides` is always patched
/// as well. A package whose current value cannot be found is left as is.
pub fn upgrade_package_data(
    text: &str,
    current: &IndexMap<String, String>,
    upgraded: &IndexMap<String, String>,
    dep_sections: &[String],
) -> String {
    let overrides = DependencySection::Overrides.key();
    let mut sections = dep_sections.to_vec();
    if !sections.iter().any(|s| s == overrides) {
        sections.push(overrides.to_string());
    }

    // Compiled once per call, shared by all sections
    let mut pattern_cache: HashMap<&str, Option<Regex>> = HashMap::new();
    let mut located: HashSet<String> = HashSet::new();
    let mut edits = Vec::new();

    for span in section_spans(text, &sections) {
        let section = &text[span.clone()];

        for (name, new_spec) in upgraded {
            let Some(current_spec) = current.get(name) else {
                continue;
            };
            let re = pattern_cache
                .entry(name.as_str())
                .or_insert_with(|| dependency_pattern(name, current_spec));
            let Some(re) = re else {
                continue;
            };

            for caps in re.captures_iter(section) {
                if let Some(value) = caps.get(1) {
                    edits.push(Edit {
                        span: span.start + value.start()..span.start + value.end(),
                        replacement: new_spec.clone(),
                    });
                    located.insert(name.clone());
                }
            }
        }
    }

    if sections
        .iter()
        .any(|s| s == DependencySection::PackageManager.key())
    {
        if let Some((name, edit)) = package_manager_edit(text, upgraded) {
            edits.push(edit);
            located.insert(name);
        }
    }

    for name in upgraded.keys().filter(|name| !located.contains(*name)) {
        debug!(package = %name, "current value not found in manifest; left unpatched");
    }

    apply_edits(text, edits)
}
