//! Range-operator families used when synthesizing new constraints

use serde::{Deserialize, Serialize};
use std::fmt;

/// Preferred operator family for new constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WildcardStyle {
    /// `^1.2.3`
    #[default]
    Caret,
    /// `~1.2.3`
    Tilde,
    /// `1.*`
    DotStar,
    /// `1.x`
    DotX,
    /// `1.2.3`
    Exact,
}

impl WildcardStyle {
    /// Detection order used when scanning a constraint
    const DETECTABLE: [WildcardStyle; 4] = [
        WildcardStyle::Caret,
        WildcardStyle::Tilde,
        WildcardStyle::DotStar,
        WildcardStyle::DotX,
    ];

    /// The marker text of this style, empty for [`WildcardStyle::Exact`]
    pub fn marker(&self) -> &'static str {
        match self {
            WildcardStyle::Caret => "^",
            WildcardStyle::Tilde => "~",
            WildcardStyle::DotStar => ".*",
            WildcardStyle::DotX => ".x",
            WildcardStyle::Exact => "",
        }
    }

    /// Returns the first non-exact style whose marker occurs in `spec`
    pub fn detect(spec: &str) -> Option<Self> {
        Self::DETECTABLE
            .into_iter()
            .find(|style| spec.contains(style.marker()))
    }

    /// Applies this style to a bare version.
    ///
    /// Prefix styles are prepended; partial styles reduce the version to
    /// its major part: `2.1.0` becomes `2.x`.
    pub fn apply(&self, version: &str) -> String {
        match self {
            WildcardStyle::Caret | WildcardStyle::Tilde => format!("{}{}", self.marker(), version),
            WildcardStyle::DotStar | WildcardStyle::DotX => {
                let major = version.split(['.', '-', '+']).next().unwrap_or(version);
                format!("{}{}", major, self.marker())
            }
            WildcardStyle::Exact => version.to_string(),
        }
    }
}

impl fmt::Display for WildcardStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WildcardStyle::Exact => write!(f, "exact"),
            other => write!(f, "{}", other.marker()),
        }
    }
}
