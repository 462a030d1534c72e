//! Classification of declared specifiers
//!
//! Never fails: anything that is neither an alias nor a source locator is
//! treated as a plain range, even when it is not a valid range at all.

use crate::domain::{ParsedSpec, ALIAS_MARKER};
use crate::parser::range::first_comparator;
use regex::Regex;
use std::sync::LazyLock;

static ALIAS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^{}:(@?[^@\s]+)@(.*)$",
        regex::escape(ALIAS_MARKER)
    ))
    .unwrap()
});

static SOURCE_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)^(?:
            (?:git\+)?(?:https?|ssh|git|file)://\S+
          | (?:github|gitlab|bitbucket|gist):\S+
          | git@[\w.-]+:\S+
          | [\w.-]+(?:/[\w.-]+)+(?:\#\S*)?
        )$",
    )
    .unwrap()
});

/// Prefix marking a semver range inside a git fragment
const SEMVER_TAG_PREFIX: &str = "semver:";

/// Classifies a declared specifier
pub fn classify(spec: &str) -> ParsedSpec {
    if let Some(caps) = ALIAS_RE.captures(spec) {
        return ParsedSpec::alias(spec, &caps[1], &caps[2]);
    }

    if SOURCE_URL_RE.is_match(spec) {
        return classify_source_url(spec);
    }

    ParsedSpec::plain(spec)
}

fn classify_source_url(spec: &str) -> ParsedSpec {
    let Some(hash) = spec.find('#') else {
        return ParsedSpec::source_url(spec, spec, "", None, None);
    };

    let (prefix, tag) = spec.split_at(hash + 1);
    let (tag_prefix, range) = split_tag(tag);

    // Branch names and commit hashes carry no comparable range
    let comparable = first_comparator(range).map(|_| range.to_string());

    ParsedSpec::source_url(spec, prefix, tag_prefix, Some(tag.to_string()), comparable)
}

/// Splits `semver:^1.0.0` / `v1.0.0` into the kept prefix and the range
fn split_tag(tag: &str) -> (&str, &str) {
    let after_semver = tag.strip_prefix(SEMVER_TAG_PREFIX).unwrap_or(tag);
    let mut prefix_len = tag.len() - after_semver.len();

    let mut chars = after_semver.chars();
    if let (Some('v' | 'V'), Some(next)) = (chars.next(), chars.next()) {
        if next.is_ascii_digit() {
            prefix_len += 1;
        }
    }

    tag.split_at(prefix_len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SpecKind, WrapperMetadata};

    #[test]
    fn test_classify_plain() {
        let spec = classify("^1.2.3");
        assert_eq!(spec.kind, SpecKind::Plain);
        assert_eq!(spec.comparable(), Some("^1.2.3"));
    }

    #[test]
    fn test_classify_plain_unparseable() {
        let spec = classify("latest");
        assert_eq!(spec.kind, SpecKind::Plain);
        assert_eq!(spec.comparable(), Some("latest"));
    }

    #[test]
    fn test_classify_alias() {
        let spec = classify("npm:foo@^1.0.0");
        assert_eq!(spec.kind, SpecKind::AliasedReference);
        assert_eq!(spec.comparable(), Some("^1.0.0"));
        assert_eq!(
            spec.wrapper,
            WrapperMetadata::Alias {
                real_name: "foo".to_string()
            }
        );
    }

    #[test]
    fn test_classify_scoped_alias() {
        let spec = classify("npm:@types/node@20.1.0");
        assert_eq!(spec.kind, SpecKind::AliasedReference);
        assert_eq!(spec.comparable(), Some("20.1.0"));
        assert_eq!(spec.rewrap("20.2.0"), "npm:@types/node@20.2.0");
    }

    #[test]
    fn test_alias_without_range_is_plain() {
        assert_eq!(classify("npm:foo").kind, SpecKind::Plain);
    }

    #[test]
    fn test_classify_github_shorthand_with_v_tag() {
        let spec = classify("github:user/repo#v1.0.0");
        assert_eq!(spec.kind, SpecKind::SourceUrlReference);
        assert_eq!(spec.comparable(), Some("1.0.0"));
        assert_eq!(spec.rewrap("1.2.0"), "github:user/repo#v1.2.0");
    }

    #[test]
    fn test_classify_host_path() {
        let spec = classify("github.com/user/repo#v1.0.0");
        assert_eq!(spec.kind, SpecKind::SourceUrlReference);
        assert_eq!(spec.comparable(), Some("1.0.0"));
    }

    #[test]
    fn test_classify_https_semver_tag() {
        let spec = classify("git+https://github.com/user/repo.git#semver:^2.0.0");
        assert_eq!(spec.kind, SpecKind::SourceUrlReference);
        assert_eq!(spec.comparable(), Some("^2.0.0"));
        assert_eq!(
            spec.rewrap("^2.1.0"),
            "git+https://github.com/user/repo.git#semver:^2.1.0"
        );
    }

    #[test]
    fn test_classify_ssh() {
        let spec = classify("git@github.com:user/repo.git#1.4.0");
        assert_eq!(spec.kind, SpecKind::SourceUrlReference);
        assert_eq!(spec.comparable(), Some("1.4.0"));
    }

    #[test]
    fn test_classify_branch_name() {
        let spec = classify("user/repo#main");
        assert_eq!(spec.kind, SpecKind::SourceUrlReference);
        assert_eq!(spec.comparable(), None);
    }

    #[test]
    fn test_classify_url_without_tag() {
        let spec = classify("https://github.com/user/repo");
        assert_eq!(spec.kind, SpecKind::SourceUrlReference);
        assert_eq!(spec.comparable(), None);
    }

    #[test]
    fn test_range_is_not_url() {
        assert_eq!(classify(">=1.0.0 <2.0.0").kind, SpecKind::Plain);
        assert_eq!(classify("1.0.0 - 2.0.0").kind, SpecKind::Plain);
        assert_eq!(classify("^1.2.3").kind, SpecKind::Plain);
    }

    #[test]
    fn test_split_tag() {
        assert_eq!(split_tag("v1.0.0"), ("v", "1.0.0"));
        assert_eq!(split_tag("semver:^1.0.0"), ("semver:", "^1.0.0"));
        assert_eq!(split_tag("semver:v2.0.0"), ("semver:v", "2.0.0"));
        assert_eq!(split_tag("vendor"), ("", "vendor"));
    }
}
