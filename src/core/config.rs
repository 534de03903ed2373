//! Runtime configuration for the bridge
//!
//! Built once at startup from the command line (and its environment
//! fallbacks) and read-only afterwards.

use std::time::Duration;

use url::Url;

use crate::core::credential::ApiKey;
use crate::core::error::{Error, Result};

/// Default upstream request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Default timeout for fetching the OpenAPI document
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);
/// Default MCP server name
pub const DEFAULT_SERVER_NAME: &str = "swagger-mcp-server";

/// How the MCP server is exposed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TransportKind {
    /// Streamable HTTP on host:port
    #[default]
    Http,
    /// stdin/stdout
    Stdio,
}

impl std::fmt::Display for TransportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportKind::Http => write!(f, "http"),
            TransportKind::Stdio => write!(f, "stdio"),
        }
    }
}

/// Immutable bridge configuration
#[derive(Debug, Clone)]
pub struct Config {
    spec_source: String,
    api_key: Option<ApiKey>,
    base_url: Option<Url>,
    request_timeout: Duration,
    fetch_timeout: Duration,
    server_name: String,
    transport: TransportKind,
    host: String,
    port: u16,
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// URL or file path of the OpenAPI document
    pub fn spec_source(&self) -> &str {
        &self.spec_source
    }

    pub fn api_key(&self) -> Option<&ApiKey> {
        self.api_key.as_ref()
    }

    /// Explicit base URL overriding the one derived from the document
    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout
    }

    pub fn server_name(&self) -> &str {
        &self.server_name
    }

    pub fn transport(&self) -> TransportKind {
        self.transport
    }

    /// Socket address the HTTP transport binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Builder for Config
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    spec_source: Option<String>,
    api_key: Option<String>,
    base_url: Option<Url>,
    request_timeout: Option<Duration>,
    fetch_timeout: Option<Duration>,
    server_name: Option<String>,
    transport: TransportKind,
    host: Option<String>,
    port: Option<u16>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spec_source<S: Into<String>>(mut self, source: S) -> Self {
        self.spec_source = Some(source.into());
        self
    }

    pub fn api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key;
        self
    }

    pub fn base_url(mut self, url: Option<Url>) -> Self {
        self.base_url = url;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = Some(timeout);
        self
    }

    pub fn server_name<S: Into<String>>(mut self, name: S) -> Self {
        self.server_name = Some(name.into());
        self
    }

    pub fn transport(mut self, transport: TransportKind) -> Self {
        self.transport = transport;
        self
    }

    pub fn host<S: Into<String>>(mut self, host: S) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn build(self) -> Result<Config> {
        let spec_source = self
            .spec_source
            .ok_or_else(|| Error::config("OpenAPI document source is required"))?;
        if spec_source.trim().is_empty() {
            return Err(Error::config("OpenAPI document source cannot be empty"));
        }

        let request_timeout = self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT);
        let fetch_timeout = self.fetch_timeout.unwrap_or(DEFAULT_FETCH_TIMEOUT);
        if request_timeout.is_zero() || fetch_timeout.is_zero() {
            return Err(Error::config("Timeouts must be greater than zero"));
        }

        // An empty API_KEY variable means "no key", not an invalid key
        let api_key = match self.api_key {
            Some(key) if !key.trim().is_empty() => Some(ApiKey::new(key)?),
            _ => None,
        };

        Ok(Config {
            spec_source: spec_source.trim().to_string(),
            api_key,
            base_url: self.base_url,
            request_timeout,
            fetch_timeout,
            server_name: self
                .server_name
                .unwrap_or_else(|| DEFAULT_SERVER_NAME.to_string()),
            transport: self.transport,
            host: self.host.unwrap_or_else(|| "127.0.0.1".to_string()),
            port: self.port.unwrap_or(8000),
        })
    }
}
