//! Declared version specifiers and their parsed form
//!
//! A declared specifier is one of:
//! - Plain: `^1.2.3`, `~4.17`, `>=1.0.0 <2.0.0`, `1.x`
//! - Aliased reference: `npm:real-name@^1.0.0`
//! - Source URL reference: `github:user/repo#v1.0.0`, `https://host/user/repo.git#semver:^2.0.0`

use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker of an aliased reference
pub const ALIAS_MARKER: &str = "npm";

/// Structural kind of a declared specifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecKind {
    /// A semver range expression
    Plain,
    /// `npm:<realName>@<range>`
    AliasedReference,
    /// A source locator with an optional `#tag` fragment
    SourceUrlReference,
}

/// What is needed to put a synthesized range back into its wrapper
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WrapperMetadata {
    /// No wrapper
    None,
    /// Alias target
    Alias { real_name: String },
    /// Everything before the tag token, kept verbatim
    SourceUrl {
        /// Locator up to and including the `#` separator
        prefix: String,
        /// Text between the separator and the range (`semver:`, `v`)
        tag_prefix: String,
        /// The raw tag, absent when the locator has no fragment
        tag: Option<String>,
    },
}

/// A classified specifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedSpec {
    /// Structural kind
    pub kind: SpecKind,
    /// The specifier exactly as declared
    pub raw: String,
    /// The semver range once any wrapper is stripped; `None` when the
    /// wrapper carries no usable range (e.g. a branch name)
    pub comparable: Option<String>,
    /// Wrapper reconstruction data
    pub wrapper: WrapperMetadata,
}

impl ParsedSpec {
    /// Creates a plain specifier, comparable to itself
    pub fn plain(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        Self {
            kind: SpecKind::Plain,
            comparable: Some(raw.clone()),
            raw,
            wrapper: WrapperMetadata::None,
        }
    }

    /// Creates an aliased reference
    pub fn alias(
        raw: impl Into<String>,
        real_name: impl Into<String>,
        range: impl Into<String>,
    ) -> Self {
        Self {
            kind: SpecKind::AliasedReference,
            raw: raw.into(),
            comparable: Some(range.into()),
            wrapper: WrapperMetadata::Alias {
                real_name: real_name.into(),
            },
        }
    }

    /// Creates a source URL reference
    pub fn source_url(
        raw: impl Into<String>,
        prefix: impl Into<String>,
        tag_prefix: impl Into<String>,
        tag: Option<String>,
        comparable: Option<String>,
    ) -> Self {
        Self {
            kind: SpecKind::SourceUrlReference,
            raw: raw.into(),
            comparable,
            wrapper: WrapperMetadata::SourceUrl {
                prefix: prefix.into(),
                tag_prefix: tag_prefix.into(),
                tag,
            },
        }
    }

    /// Returns the comparable range, if any
    pub fn comparable(&self) -> Option<&str> {
        self.comparable.as_deref()
    }

    /// Puts a synthesized range back into the original wrapper.
    ///
    /// Only the range token changes; the alias name and the locator
    /// characters are reproduced verbatim.
    pub fn rewrap(&self, range: &str) -> String {
        match &self.wrapper {
            WrapperMetadata::None => range.to_string(),
            WrapperMetadata::Alias { real_name } => {
                format!("{}:{}@{}", ALIAS_MARKER, real_name, range)
            }
            WrapperMetadata::SourceUrl {
                prefix,
                tag_prefix,
                tag: Some(_),
            } => format!("{}{}{}", prefix, tag_prefix, range),
            WrapperMetadata::SourceUrl { tag: None, .. } => self.raw.clone(),
        }
    }
}

impl fmt::Display for ParsedSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}
