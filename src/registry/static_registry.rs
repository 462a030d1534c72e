//! Static registry: latest versions from a JSON file or URL
//!
//! The source is a JSON object mapping package names to versions:
//!
//! ```json
//! { "lodash": "4.17.21", "react": "18.2.0" }
//! ```
//!
//! It is loaded once, on first lookup, and kept by the registry value.

use super::{HttpClient, LatestVersionSource};
use crate::error::RegistryError;
use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::debug;

/// Returns true if `source` should be fetched over HTTP
fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Latest versions read from a static JSON document
pub struct StaticRegistry {
    source: String,
    client: Option<HttpClient>,
    versions: OnceCell<IndexMap<String, String>>,
}

impl StaticRegistry {
    /// Create a registry reading from a local path or an http(s) URL
    pub fn new(source: impl Into<String>) -> Result<Self, RegistryError> {
        let source = source.into();
        let client = if is_url(&source) {
            Some(HttpClient::new()?)
        } else {
            None
        };

        Ok(Self {
            source,
            client,
            versions: OnceCell::new(),
        })
    }

    /// Create an already-loaded registry
    pub fn from_versions(source: impl Into<String>, versions: IndexMap<String, String>) -> Self {
        Self {
            source: source.into(),
            client: None,
            versions: OnceCell::new_with(Some(versions)),
        }
    }

    /// Returns the path or URL this registry reads from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns every known version, loading the source on first call
    pub async fn versions(&self) -> Result<&IndexMap<String, String>, RegistryError> {
        self.versions.get_or_try_init(|| self.load()).await
    }

    async fn load(&self) -> Result<IndexMap<String, String>, RegistryError> {
        let content = match &self.client {
            Some(client) => client.get_text(&self.source).await?,
            None => tokio::fs::read_to_string(&self.source)
                .await
                .map_err(|_| RegistryError::static_registry_not_found(&self.source))?,
        };

        let versions = parse_registry(&self.source, &content)?;
        debug!(source = %self.source, packages = versions.len(), "static registry loaded");
        Ok(versions)
    }
}

/// Parses a registry document, ignoring entries whose value is not a string
fn parse_registry(source: &str, content: &str) -> Result<IndexMap<String, String>, RegistryError> {
    let document: IndexMap<String, Value> = serde_json::from_str(content)
        .map_err(|e| RegistryError::static_registry_parse(source, e.to_string()))?;

    Ok(document
        .into_iter()
        .filter_map(|(name, value)| match value {
            Value::String(version) if !version.is_empty() => Some((name, version)),
            _ => None,
        })
        .collect())
}

#[async_trait]
impl LatestVersionSource for StaticRegistry {
    fn registry_name(&self) -> &'static str {
        "static registry"
    }

    async fn latest_version(&self, package: &str) -> Result<Option<String>, RegistryError> {
        Ok(self.versions().await?.get(package).cloned())
    }
}
