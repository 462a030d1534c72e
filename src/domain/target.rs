//! Target policy: which release channel counts as "latest" for a package

use crate::parser::SemverParts;
use std::fmt;
use std::sync::Arc;

/// Default policy literal
pub const DEFAULT_TARGET: &str = "latest";

/// Leading character of an explicit channel/tag reference such as `@next`
pub const TAG_MARKER: char = '@';

/// Callback computing a policy literal from a package name and its parsed current range
pub type TargetFn = dyn Fn(&str, &[SemverParts]) -> String + Send + Sync;

/// Upgrade target policy
#[derive(Clone)]
pub enum Target {
    /// The same literal for every package
    Literal(String),
    /// A literal computed per package
    Computed(Arc<TargetFn>),
}

impl Target {
    /// Creates a computed target from a closure
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&str, &[SemverParts]) -> String + Send + Sync + 'static,
    {
        Target::Computed(Arc::new(f))
    }

    /// Resolves the policy literal for one package
    pub fn resolve(&self, name: &str, current: &[SemverParts]) -> String {
        match self {
            Target::Literal(literal) => literal.clone(),
            Target::Computed(f) => f(name, current),
        }
    }
}

/// Returns true if a resolved policy literal names an explicit tag.
///
/// Only the leading character is inspected, so any literal starting with
/// the marker qualifies.
pub fn is_tag_reference(literal: &str) -> bool {
    literal.starts_with(TAG_MARKER)
}

impl Default for Target {
    fn default() -> Self {
        Target::Literal(DEFAULT_TARGET.to_string())
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Literal(literal) => f.debug_tuple("Literal").field(literal).finish(),
            Target::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<&str> for Target {
    fn from(literal: &str) -> Self {
        Target::Literal(literal.to_string())
    }
}

impl From<String> for Target {
    fn from(literal: String) -> Self {
        Target::Literal(literal)
    }
}
