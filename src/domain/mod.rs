//! Core domain models for rangeup
//!
//! This module contains the fundamental types used throughout the application:
//! - Parsed version specifiers and their wrappers (alias, source URL)
//! - Wildcard styles used to synthesize new ranges
//! - Dependency sections of a manifest
//! - Target policies and per-package upgrade decisions

mod section;
mod target;
mod update_result;
mod version_spec;
mod wildcard;

pub use section::{resolve_dep_sections, DependencySection, DEFAULT_DEP_SECTIONS};
pub use target::{is_tag_reference, Target, TargetFn, DEFAULT_TARGET, TAG_MARKER};
pub use update_result::UpgradeDecision;
pub use version_spec::{ParsedSpec, SpecKind, WrapperMetadata, ALIAS_MARKER};
pub use wildcard::WildcardStyle;
