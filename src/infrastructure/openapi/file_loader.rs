//! File-based OpenAPI document loader
//!
//! This loader handles only file I/O. The actual parsing is done by the OpenApiParser.

use async_trait::async_trait;
use tokio::fs;

use super::{DocumentFormat, OpenApiLoader, OpenApiParser, SpecDocument};
use crate::core::error::Result;

/// Loads OpenAPI documents from local files
#[derive(Default)]
pub struct FileOpenApiLoader {
    base_url: Option<String>,
}

impl FileOpenApiLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use this base URL instead of the one declared by the document
    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        self.base_url = base_url;
        self
    }
}

#[async_trait]
impl OpenApiLoader for FileOpenApiLoader {
    async fn load(&self, source: &str) -> Result<SpecDocument> {
        let content = fs::read_to_string(source).await?;

        let spec_value = DocumentFormat::detect(None, source).decode(&content)?;

        OpenApiParser::new(spec_value)
            .with_base_url(self.base_url.clone())
            .parse()
    }
}
