//! OpenAPI loading implementations

pub mod composite_loader;
pub mod file_loader;
pub mod http_loader;
pub mod parser;
pub mod types;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::core::error::{Error, Result};

pub use composite_loader::CompositeOpenApiLoader;
pub use file_loader::FileOpenApiLoader;
pub use http_loader::HttpOpenApiLoader;
pub use parser::OpenApiParser;
pub use types::{
    ApiInfo, HttpMethod, Operation, Parameter, ParameterLocation, RequestBody, SpecDocument,
};

/// Loads OpenAPI documents
#[async_trait]
pub trait OpenApiLoader: Send + Sync {
    /// Load and parse a document from a source
    async fn load(&self, source: &str) -> Result<SpecDocument>;
}

/// Serialization of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    /// Unknown: JSON first, then YAML
    Unknown,
}

impl DocumentFormat {
    /// Detect the format from the content type first, the file extension second
    pub fn detect(content_type: Option<&str>, source: &str) -> Self {
        let content_type = content_type.unwrap_or_default().to_ascii_lowercase();
        if content_type.contains("yaml") {
            return DocumentFormat::Yaml;
        }
        if content_type.contains("json") {
            return DocumentFormat::Json;
        }

        // Ignore query string and fragment when looking at the extension
        let path = source
            .split(['?', '#'])
            .next()
            .unwrap_or(source)
            .to_ascii_lowercase();
        if path.ends_with(".yaml") || path.ends_with(".yml") {
            DocumentFormat::Yaml
        } else if path.ends_with(".json") {
            DocumentFormat::Json
        } else {
            DocumentFormat::Unknown
        }
    }

    /// Decode document text in this format
    pub fn decode(self, content: &str) -> Result<JsonValue> {
        match self {
            DocumentFormat::Json => Ok(serde_json::from_str(content)?),
            DocumentFormat::Yaml => Ok(serde_yaml::from_str(content)?),
            DocumentFormat::Unknown => match serde_json::from_str::<JsonValue>(content) {
                Ok(value) => Ok(value),
                Err(json_err) => serde_yaml::from_str(content).map_err(|yaml_err| {
                    tracing::debug!(%json_err, %yaml_err, "Document is neither JSON nor YAML");
                    Error::from(yaml_err)
                }),
            },
        }
    }
}
