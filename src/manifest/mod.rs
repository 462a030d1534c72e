//! package.json reading, extraction and patching
//!
//! This module provides functionality to:
//! - Read and write the manifest file
//! - Extract the declared specifiers of the requested sections
//! - Patch upgraded specifiers back into the original text

mod package_json;
mod patcher;
mod writer;

pub use package_json::current_dependencies;
pub use patcher::upgrade_package_data;
pub use writer::{read_manifest, write_manifest};
