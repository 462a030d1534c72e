//! Parsers for declared version specifiers
//!
//! This module provides:
//! - Token-level parsing of npm range expressions into [`SemverParts`]
//! - Classification of specifiers into plain ranges, aliases and source URLs

pub mod range;
pub mod specifier;

pub use range::{
    first_comparator, is_wild_part, is_wildcard, parse_comparator, parse_range, parse_range_strict,
    stringify, SemverParts,
};
pub use specifier::classify;
