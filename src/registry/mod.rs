//! Sources of latest versions
//!
//! This module provides:
//! - HTTP client shared foundation
//! - The `LatestVersionSource` trait implemented by every registry
//! - A static registry backed by a JSON file or URL

mod client;
mod static_registry;

pub use client::HttpClient;
pub use static_registry::StaticRegistry;

use crate::error::RegistryError;
use async_trait::async_trait;
use indexmap::IndexMap;
use tracing::debug;

/// Trait for registries that know the latest version of a package
#[async_trait]
pub trait LatestVersionSource: Send + Sync {
    /// Get the registry name
    fn registry_name(&self) -> &'static str;

    /// Fetch the latest version of a package, `None` when unknown
    async fn latest_version(&self, package: &str) -> Result<Option<String>, RegistryError>;
}

/// Looks up the latest version of each package.
///
/// Packages the source does not know are left out of the result. The first
/// registry error aborts the lookup.
pub async fn fetch_latest_versions<'a, I>(
    source: &dyn LatestVersionSource,
    packages: I,
) -> Result<IndexMap<String, String>, RegistryError>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut latest = IndexMap::new();

    for package in packages {
        match source.latest_version(package).await? {
            Some(version) => {
                latest.insert(package.clone(), version);
            }
            None => debug!(
                package = %package,
                registry = source.registry_name(),
                "no latest version"
            ),
        }
    }

    Ok(latest)
}
