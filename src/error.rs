//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ManifestError: Issues reading, parsing or writing the manifest
//! - RegistryError: Issues loading latest versions from a registry source
//! - ConfigError: Issues with CLI configuration
//!
//! The upgrade pipeline itself never returns these: malformed specifiers
//! degrade to "not upgradeable" and unmatched manifest values are skipped.

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Manifest file related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Registry related errors
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to manifest file operations
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest file not found
    #[error("manifest file not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write manifest file
    #[error("failed to write manifest file {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing error
    #[error("failed to parse JSON in {path}: {message}")]
    JsonParseError { path: PathBuf, message: String },
}

/// Errors related to registry sources
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The static registry file does not exist or cannot be read
    #[error("the specified static registry file does not exist: {source_path}")]
    StaticRegistryNotFound { source_path: String },

    /// The static registry is not a JSON object of package versions
    #[error("invalid static registry {source_path}: {message}")]
    StaticRegistryParse {
        source_path: String,
        message: String,
    },

    /// Network request failed
    #[error("failed to fetch {url}: {message}")]
    NetworkError { url: String, message: String },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A --filter or --reject pattern is not a valid regular expression
    #[error("invalid package pattern '{pattern}': {message}")]
    InvalidFilterPattern { pattern: String, message: String },

    /// No registry source was configured
    #[error("no registry source given: pass --registry <path|url>")]
    MissingRegistry,
}

impl ManifestError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ManifestError::NotFound { path: path.into() }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new WriteError
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::WriteError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new JsonParseError
    pub fn json_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::JsonParseError {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl RegistryError {
    /// Creates a new StaticRegistryNotFound error
    pub fn static_registry_not_found(source_path: impl Into<String>) -> Self {
        RegistryError::StaticRegistryNotFound {
            source_path: source_path.into(),
        }
    }

    /// Creates a new StaticRegistryParse error
    pub fn static_registry_parse(
        source_path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::StaticRegistryParse {
            source_path: source_path.into(),
            message: message.into(),
        }
    }

    /// Creates a new NetworkError
    pub fn network_error(url: impl Into<String>, message: impl Into<String>) -> Self {
        RegistryError::NetworkError {
            url: url.into(),
            message: message.into(),
        }
    }
}
