//! npm range semantics on top of `semver::Version`
//!
//! Supports npm semver range specifications:
//! - `1.2.3`, `=1.2.3` - exact match
//! - `^1.2.3` - compatible with version (>=1.2.3 <2.0.0)
//! - `~1.2.3` - approximately equivalent (>=1.2.3 <1.3.0)
//! - `>=1.2.3`, `>1.2.3`, `<=1.2.3`, `<1.2.3` - comparison operators
//! - `1.2.x`, `1.x`, `1.2`, `*` - partial versions and wildcards
//! - `1.0.0 - 2.0.0` - hyphen ranges
//! - space-separated AND, `||` separated OR
//!
//! A prerelease version only satisfies a comparator set that itself names
//! a prerelease on the same `major.minor.patch` tuple.

use crate::parser::{is_wild_part, parse_range_strict, SemverParts};
use semver::{Prerelease, Version};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
}

#[derive(Debug, Clone)]
struct Comparator {
    op: Op,
    version: Version,
}

impl Comparator {
    fn new(op: Op, version: Version) -> Self {
        Self { op, version }
    }

    fn test(&self, version: &Version) -> bool {
        match self.op {
            Op::Eq => version == &self.version,
            Op::Gt => version > &self.version,
            Op::Gte => version >= &self.version,
            Op::Lt => version < &self.version,
            Op::Lte => version <= &self.version,
        }
    }

    fn is_lower_bound(&self) -> bool {
        matches!(self.op, Op::Eq | Op::Gt | Op::Gte)
    }
}

/// A parsed range: a union of comparator sets, each an intersection
#[derive(Debug, Clone)]
pub struct Range {
    sets: Vec<Vec<Comparator>>,
}

/// Numeric view of a partial version; `None` marks an absent or wildcard part
struct Partial {
    major: Option<u64>,
    minor: Option<u64>,
    patch: Option<u64>,
    pre: Prerelease,
}

impl Partial {
    fn from_parts(parts: &SemverParts) -> Option<Self> {
        let num = |part: &Option<String>| -> Option<Option<u64>> {
            match part.as_deref() {
                None => Some(None),
                p if is_wild_part(p) => Some(None),
                Some(p) => p.parse().ok().map(Some),
            }
        };

        let major = num(&parts.major)?;
        let minor = if major.is_none() { None } else { num(&parts.minor)? };
        let patch = if minor.is_none() { None } else { num(&parts.patch)? };
        let pre = match &parts.release {
            Some(release) => Prerelease::new(release).ok()?,
            None => Prerelease::EMPTY,
        };

        Some(Self {
            major,
            minor,
            patch,
            pre,
        })
    }

    /// The lowest version this partial names, with missing parts as zero
    fn floor(&self) -> Version {
        let mut version = Version::new(
            self.major.unwrap_or(0),
            self.minor.unwrap_or(0),
            self.patch.unwrap_or(0),
        );
        if self.patch.is_some() {
            version.pre = self.pre.clone();
        }
        version
    }

    /// Exclusive upper bound of the partial's own precision: `1.2` -> `1.3.0-0`
    fn ceiling(&self) -> Option<Version> {
        match (self.major, self.minor, self.patch) {
            (Some(major), None, _) => Some(lowest(major.saturating_add(1), 0, 0)),
            (Some(major), Some(minor), None) => Some(lowest(major, minor.saturating_add(1), 0)),
            _ => None,
        }
    }
}

/// `major.minor.patch-0`, the lowest version of that tuple including prereleases
fn lowest(major: u64, minor: u64, patch: u64) -> Version {
    let mut version = Version::new(major, minor, patch);
    version.pre = Prerelease::new("0").unwrap_or_default();
    version
}

fn nothing() -> Vec<Comparator> {
    vec![Comparator::new(Op::Lt, lowest(0, 0, 0))]
}

fn desugar(parts: &SemverParts) -> Option<Vec<Comparator>> {
    let p = Partial::from_parts(parts)?;
    let Some(major) = p.major else {
        return Some(match parts.operator_str() {
            ">" | "<" => nothing(),
            _ => Vec::new(),
        });
    };
    let full = p.patch.is_some();

    let comparators = match parts.operator_str() {
        "" | "=" => match p.ceiling() {
            Some(ceiling) => vec![
                Comparator::new(Op::Gte, p.floor()),
                Comparator::new(Op::Lt, ceiling),
            ],
            None => vec![Comparator::new(Op::Eq, p.floor())],
        },
        "^" => {
            let minor = p.minor.unwrap_or(0);
            let patch = p.patch.unwrap_or(0);
            let upper = if major > 0 || p.minor.is_none() {
                lowest(major.saturating_add(1), 0, 0)
            } else if minor > 0 || !full {
                lowest(0, minor.saturating_add(1), 0)
            } else {
                lowest(0, 0, patch.saturating_add(1))
            };
            vec![
                Comparator::new(Op::Gte, p.floor()),
                Comparator::new(Op::Lt, upper),
            ]
        }
        "~" | "~>" => {
            let upper = match p.minor {
                None => lowest(major.saturating_add(1), 0, 0),
                Some(minor) => lowest(major, minor.saturating_add(1), 0),
            };
            vec![
                Comparator::new(Op::Gte, p.floor()),
                Comparator::new(Op::Lt, upper),
            ]
        }
        ">" => match p.ceiling() {
            Some(mut ceiling) => {
                ceiling.pre = Prerelease::EMPTY;
                vec![Comparator::new(Op::Gte, ceiling)]
            }
            None => vec![Comparator::new(Op::Gt, p.floor())],
        },
        ">=" => vec![Comparator::new(Op::Gte, p.floor())],
        "<" => {
            if full {
                vec![Comparator::new(Op::Lt, p.floor())]
            } else {
                vec![Comparator::new(
                    Op::Lt,
                    lowest(major, p.minor.unwrap_or(0), 0),
                )]
            }
        }
        "<=" => match p.ceiling() {
            Some(ceiling) => vec![Comparator::new(Op::Lt, ceiling)],
            None => vec![Comparator::new(Op::Lte, p.floor())],
        },
        _ => return None,
    };

    Some(comparators)
}

fn desugar_hyphen(from: &SemverParts, to: &SemverParts) -> Option<Vec<Comparator>> {
    let from = Partial::from_parts(from)?;
    let to = Partial::from_parts(to)?;
    let mut comparators = Vec::new();

    if from.major.is_some() {
        comparators.push(Comparator::new(Op::Gte, from.floor()));
    }
    if to.major.is_some() {
        match to.ceiling() {
            Some(ceiling) => comparators.push(Comparator::new(Op::Lt, ceiling)),
            None => comparators.push(Comparator::new(Op::Lte, to.floor())),
        }
    }

    Some(comparators)
}

fn parse_set(set: &str) -> Option<Vec<Comparator>> {
    let tokens = parse_range_strict(set)?;

    if let [from, sep, to] = tokens.as_slice() {
        if sep.is_separator() && sep.operator_str() == "-" {
            return desugar_hyphen(from, to);
        }
    }

    let mut comparators = Vec::new();
    for token in &tokens {
        if token.is_separator() {
            return None;
        }
        comparators.extend(desugar(token)?);
    }
    Some(comparators)
}

impl Range {
    /// Parses a range expression, returning `None` if any part is invalid
    pub fn parse(range: &str) -> Option<Self> {
        let sets = range
            .split("||")
            .map(parse_set)
            .collect::<Option<Vec<_>>>()?;
        Some(Self { sets })
    }

    /// Returns true if `version` lies within the range
    pub fn satisfies(&self, version: &Version) -> bool {
        self.sets.iter().any(|set| test_set(set, version))
    }

    /// Returns true if `version` is lower than every version in the range
    pub fn is_above(&self, version: &Version) -> bool {
        if self.satisfies(version) {
            return false;
        }

        self.sets.iter().all(|set| {
            let lower = set
                .iter()
                .filter(|c| c.is_lower_bound())
                .max_by(|a, b| a.version.cmp(&b.version));
            match lower {
                Some(c) if c.op == Op::Gt => version <= &c.version,
                Some(c) => version < &c.version,
                None => false,
            }
        })
    }
}

fn test_set(set: &[Comparator], version: &Version) -> bool {
    if !set.iter().all(|c| c.test(version)) {
        return false;
    }
    if version.pre.is_empty() {
        return true;
    }
    set.iter().any(|c| {
        !c.version.pre.is_empty()
            && c.version.major == version.major
            && c.version.minor == version.minor
            && c.version.patch == version.patch
    })
}

/// Parses a concrete version, tolerating a leading `v` or `=`
pub fn parse_version(version: &str) -> Option<Version> {
    let trimmed = version.trim();
    let trimmed = trimmed
        .strip_prefix('=')
        .or_else(|| trimmed.strip_prefix('v'))
        .unwrap_or(trimmed);
    Version::parse(trimmed).ok()
}

/// Returns true if `version` is a concrete semantic version
pub fn valid_version(version: &str) -> bool {
    parse_version(version).is_some()
}

/// Returns true if `range` is a valid range expression
pub fn valid_range(range: &str) -> bool {
    Range::parse(range).is_some()
}

/// Returns true if `version` satisfies `range`; false when either is invalid
pub fn satisfies(version: &str, range: &str) -> bool {
    match (parse_version(version), Range::parse(range)) {
        (Some(version), Some(range)) => range.satisfies(&version),
        _ => false,
    }
}

/// Returns true if `version` is lower than every version in `range`
pub fn ltr(version: &str, range: &str) -> bool {
    match (parse_version(version), Range::parse(range)) {
        (Some(version), Some(range)) => range.is_above(&version),
        _ => false,
    }
}
