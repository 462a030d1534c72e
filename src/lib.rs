//! rangeup - package.json version range upgrader library
//!
//! This library provides:
//! - Classification of declared specifiers (plain ranges, npm aliases, source URLs)
//! - Upgrade eligibility and notation-preserving range synthesis
//! - Span-based patching of the original manifest text
//! - A static registry of latest versions

pub mod cli;
pub mod domain;
pub mod error;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod parser;
pub mod registry;
pub mod update;
