//! HTTP client shared foundation
//!
//! This module provides a shared HTTP client with a configurable timeout
//! and User-Agent. Requests are made once; there is no retry.

use crate::error::RegistryError;
use reqwest::Client;
use std::time::Duration;

/// Default timeout for HTTP requests (30 seconds)
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("rangeup/", env!("CARGO_PKG_VERSION"));

/// Thin wrapper around a reqwest client
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, RegistryError> {
        Self::with_config(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(timeout: Duration, user_agent: &str) -> Result<Self, RegistryError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                RegistryError::network_error("", format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }

    /// Perform a GET request and return the body as text
    pub async fn get_text(&self, url: &str) -> Result<String, RegistryError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| RegistryError::network_error(url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RegistryError::network_error(url, format!("HTTP {}", status)));
        }

        response
            .text()
            .await
            .map_err(|e| RegistryError::network_error(url, e.to_string()))
    }
}
