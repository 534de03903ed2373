//! Error handling for swagger-mcp startup.
//!
//! This module defines the error type `Error` raised while configuring the
//! bridge and loading the OpenAPI document, along with a convenient `Result`
//! alias. Every variant is fatal: no tool can be registered correctly without
//! a valid configuration and a valid document.
//!
//! # Examples
//!
//! ```
//! use swagger_mcp::core::error::{Error, Result};
//!
//! fn might_fail() -> Result<()> {
//!     Err(Error::schema("no `servers` or `host` entry"))
//! }
//!
//! assert!(might_fail().is_err());
//! ```

use thiserror::Error;

/// Result type for swagger-mcp startup operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for swagger-mcp startup operations
#[derive(Debug, Error)]
pub enum Error {
    /// The document could not be retrieved (network failure or non-2xx status)
    #[error("Failed to fetch OpenAPI document: {0}")]
    Fetch(String),

    /// I/O error while reading a local document
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The document parsed but is not a usable OpenAPI document
    #[error("Invalid OpenAPI document: {0}")]
    Parse(String),

    /// The base address of the API cannot be determined
    #[error("OpenAPI schema error: {0}")]
    Schema(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new fetch error
    pub fn fetch<S: Into<String>>(msg: S) -> Self {
        Self::Fetch(msg.into())
    }

    /// Create a new parse error
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a new schema error
    pub fn schema<S: Into<String>>(msg: S) -> Self {
        Self::Schema(msg.into())
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this error came from decoding the document body
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Json(_) | Self::Yaml(_) | Self::Parse(_))
    }
}
