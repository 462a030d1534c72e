//! Package filter configuration
//!
//! This module provides the PackageFilter struct that decides which
//! packages take part in an upgrade run, from `--filter` and `--reject`
//! patterns.

use crate::error::ConfigError;
use regex::Regex;

/// A single name pattern
#[derive(Debug, Clone)]
enum NamePattern {
    /// Exact package name
    Name(String),
    /// Glob with `*` or a `/regex/`, compiled
    Regex(Regex),
}

impl NamePattern {
    fn parse(pattern: &str) -> Result<Self, ConfigError> {
        let invalid = |e: regex::Error| ConfigError::InvalidFilterPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        };

        if let Some(body) = pattern
            .strip_prefix('/')
            .and_then(|rest| rest.strip_suffix('/'))
            .filter(|body| !body.is_empty())
        {
            return Regex::new(body).map(NamePattern::Regex).map_err(invalid);
        }

        if pattern.contains('*') {
            let glob = pattern
                .split('*')
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(".*");
            return Regex::new(&format!("^{}$", glob))
                .map(NamePattern::Regex)
                .map_err(invalid);
        }

        Ok(NamePattern::Name(pattern.to_string()))
    }

    fn matches(&self, name: &str) -> bool {
        match self {
            NamePattern::Name(n) => n == name,
            NamePattern::Regex(re) => re.is_match(name),
        }
    }
}

/// Splits each argument on commas and whitespace, dropping empty entries.
/// A `/regex/` argument is kept whole.
fn split_patterns(patterns: &[String]) -> Vec<&str> {
    patterns
        .iter()
        .map(|p| p.trim())
        .flat_map(|p| {
            if p.len() > 1 && p.starts_with('/') && p.ends_with('/') {
                vec![p]
            } else {
                p.split(|c: char| c == ',' || c.is_whitespace()).collect()
            }
        })
        .filter(|p| !p.is_empty())
        .collect()
}

fn compile(patterns: &[String]) -> Result<Vec<NamePattern>, ConfigError> {
    split_patterns(patterns)
        .into_iter()
        .map(NamePattern::parse)
        .collect()
}

/// Package name filter
#[derive(Debug, Clone, Default)]
pub struct PackageFilter {
    /// If non-empty, only packages matching one of these are processed
    filter: Vec<NamePattern>,
    /// Packages matching any of these are never processed
    reject: Vec<NamePattern>,
}

impl PackageFilter {
    /// Create a new PackageFilter that accepts every package
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the include patterns
    pub fn with_filter(mut self, patterns: &[String]) -> Result<Self, ConfigError> {
        self.filter = compile(patterns)?;
        Ok(self)
    }

    /// Set the reject patterns
    pub fn with_reject(mut self, patterns: &[String]) -> Result<Self, ConfigError> {
        self.reject = compile(patterns)?;
        Ok(self)
    }

    /// Check if a package should be processed. Reject wins over filter.
    pub fn should_process_package(&self, name: &str) -> bool {
        if self.reject.iter().any(|p| p.matches(name)) {
            return false;
        }
        if self.filter.is_empty() {
            return true;
        }
        self.filter.iter().any(|p| p.matches(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_new_filter_accepts_all() {
        let filter = PackageFilter::new();
        assert!(filter.should_process_package("any-package"));
        assert!(filter.should_process_package("@scope/pkg"));
    }

    #[test]
    fn test_with_filter_names() {
        let filter = PackageFilter::new()
            .with_filter(&patterns(&["lodash,react", "vue"]))
            .unwrap();
        assert!(filter.should_process_package("lodash"));
        assert!(filter.should_process_package("react"));
        assert!(filter.should_process_package("vue"));
        assert!(!filter.should_process_package("express"));
    }

    #[test]
    fn test_with_filter_glob() {
        let filter = PackageFilter::new()
            .with_filter(&patterns(&["@types/*"]))
            .unwrap();
        assert!(filter.should_process_package("@types/node"));
        assert!(!filter.should_process_package("typescript"));
    }

    #[test]
    fn test_with_filter_regex() {
        let filter = PackageFilter::new()
            .with_filter(&patterns(&["/^eslint(-|$)/"]))
            .unwrap();
        assert!(filter.should_process_package("eslint"));
        assert!(filter.should_process_package("eslint-plugin-react"));
        assert!(!filter.should_process_package("typescript-eslint"));
    }

    #[test]
    fn test_reject_wins() {
        let filter = PackageFilter::new()
            .with_filter(&patterns(&["*"]))
            .unwrap()
            .with_reject(&patterns(&["react"]))
            .unwrap();
        assert!(!filter.should_process_package("react"));
        assert!(filter.should_process_package("react-dom"));
    }

    #[test]
    fn test_glob_escapes_regex_chars() {
        let filter = PackageFilter::new()
            .with_reject(&patterns(&["socket.io*"]))
            .unwrap();
        assert!(!filter.should_process_package("socket.io-client"));
        assert!(filter.should_process_package("socketxio"));
    }

    #[test]
    fn test_invalid_regex() {
        let result = PackageFilter::new().with_filter(&patterns(&["/(/"]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidFilterPattern { .. })
        ));
    }
}
