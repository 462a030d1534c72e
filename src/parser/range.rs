//! Token-level parsing of npm range expressions
//!
//! Splits a range such as `>=1.2 <2 || ^3.0.0-beta.1` into one
//! [`SemverParts`] per comparator. Parts are kept as strings so wildcard
//! segments (`x`, `*`) survive a parse/stringify cycle, which the
//! specifier synthesizer relies on.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Operators recognised in front of a version, longest first
const OPERATORS: [&str; 8] = [">=", "<=", "~>", ">", "<", "=", "^", "~"];

/// Specifiers that accept any version
const PURE_WILDCARDS: [&str; 7] = ["^", "~", "^*", "*", "x", "x.x", "x.x.x"];

static PARTS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^v?(\d+|[xX*])(?:\.(\d+|[xX*]))?(?:\.(\d+|[xX*]))?(?:-([0-9A-Za-z.-]+))?(?:\+([0-9A-Za-z.-]+))?$",
    )
    .unwrap()
});

// Joins operators separated from their version by whitespace: `>= 1.2.3`
static DETACHED_OPERATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(>=|<=|~>|[<>=^~])\s+").unwrap());

/// One comparator of a range, split into its textual parts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SemverParts {
    /// Operator in front of the version (`^`, `~`, `>=`, ...), or the bare
    /// `||` / `-` separators which carry no version
    pub operator: Option<String>,
    pub major: Option<String>,
    pub minor: Option<String>,
    pub patch: Option<String>,
    /// Prerelease identifier (after `-`)
    pub release: Option<String>,
    /// Build metadata (after `+`)
    pub build: Option<String>,
}

impl SemverParts {
    fn separator(operator: &str) -> Self {
        Self {
            operator: Some(operator.to_string()),
            ..Self::default()
        }
    }

    /// Returns true for the `||` and `-` tokens that only join comparators
    pub fn is_separator(&self) -> bool {
        self.major.is_none() && matches!(self.operator.as_deref(), Some("||") | Some("-"))
    }

    /// Operator as a string slice, empty when there is none
    pub fn operator_str(&self) -> &str {
        self.operator.as_deref().unwrap_or("")
    }

    /// Number of base parts (major, minor, patch) present
    pub fn num_parts(&self) -> usize {
        [&self.major, &self.minor, &self.patch]
            .iter()
            .filter(|p| p.is_some())
            .count()
    }

    /// Returns true if this comparator carries a prerelease identifier
    pub fn is_prerelease(&self) -> bool {
        self.release.is_some()
    }
}

/// Renders the version without its operator: `major[.minor[.patch]][-release][+build]`
impl fmt::Display for SemverParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(major) = &self.major {
            write!(f, "{}", major)?;
            if let Some(minor) = &self.minor {
                write!(f, ".{}", minor)?;
                if let Some(patch) = &self.patch {
                    write!(f, ".{}", patch)?;
                }
            }
        }
        if let Some(release) = &self.release {
            write!(f, "-{}", release)?;
        }
        if let Some(build) = &self.build {
            write!(f, "+{}", build)?;
        }
        Ok(())
    }
}

/// Returns the version of `parts` as a string, without operator
pub fn stringify(parts: &SemverParts) -> String {
    parts.to_string()
}

/// Returns true if a single version part is a wildcard
pub fn is_wild_part(part: Option<&str>) -> bool {
    matches!(part, Some("*") | Some("x") | Some("X"))
}

/// Parses a single comparator token such as `^1.2.x` or `v3.0.0-rc.1`
pub fn parse_comparator(token: &str) -> Option<SemverParts> {
    let token = token.trim();
    let (operator, rest) = OPERATORS
        .iter()
        .find_map(|op| token.strip_prefix(op).map(|rest| (Some(op.to_string()), rest)))
        .unwrap_or((None, token));

    let caps = PARTS_RE.captures(rest.trim())?;
    let part = |i: usize| caps.get(i).map(|m| m.as_str().to_string());

    Some(SemverParts {
        operator,
        major: part(1),
        minor: part(2),
        patch: part(3),
        release: part(4),
        build: part(5),
    })
}

/// Splits a range expression into comparators.
///
/// `||` and hyphen `-` separators are returned as operator-only tokens.
/// Tokens that are not versions are dropped, so an unparseable range
/// yields an empty vector.
pub fn parse_range(range: &str) -> Vec<SemverParts> {
    let joined = DETACHED_OPERATOR_RE.replace_all(range.trim(), "$1");

    joined
        .split_whitespace()
        .filter_map(|token| match token {
            "||" | "-" => Some(SemverParts::separator(token)),
            _ => parse_comparator(token),
        })
        .collect()
}

/// Like [`parse_range`] but returns `None` when any token is not a version
pub fn parse_range_strict(range: &str) -> Option<Vec<SemverParts>> {
    let joined = DETACHED_OPERATOR_RE.replace_all(range.trim(), "$1");

    joined
        .split_whitespace()
        .map(|token| match token {
            "||" | "-" => Some(SemverParts::separator(token)),
            _ => parse_comparator(token),
        })
        .collect()
}

/// Returns true if `spec` accepts any version outright (`*`, `x`, `^`, `~`, ...)
pub fn is_wildcard(spec: &str) -> bool {
    PURE_WILDCARDS.contains(&spec.trim())
}

/// Parses a range and returns its first comparator, if any
pub fn first_comparator(range: &str) -> Option<SemverParts> {
    parse_range(range).into_iter().find(|p| !p.is_separator())
}
