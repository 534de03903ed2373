//! Composite OpenAPI loader that picks a loading strategy per source

use async_trait::async_trait;
use std::time::Duration;

use super::{FileOpenApiLoader, HttpOpenApiLoader, OpenApiLoader, SpecDocument};
use crate::core::error::Result;

/// Dispatches to the HTTP loader for URLs and to the file loader otherwise
pub struct CompositeOpenApiLoader {
    http: HttpOpenApiLoader,
    file: FileOpenApiLoader,
}

impl CompositeOpenApiLoader {
    pub fn new(fetch_timeout: Duration) -> Result<Self> {
        Ok(Self {
            http: HttpOpenApiLoader::new(fetch_timeout)?,
            file: FileOpenApiLoader::new(),
        })
    }

    /// Use this base URL instead of the one declared by the document
    pub fn with_base_url(self, base_url: Option<String>) -> Self {
        Self {
            http: self.http.with_base_url(base_url.clone()),
            file: self.file.with_base_url(base_url),
        }
    }
}

#[async_trait]
impl OpenApiLoader for CompositeOpenApiLoader {
    async fn load(&self, source: &str) -> Result<SpecDocument> {
        tracing::debug!("CompositeOpenApiLoader: Loading from source: {source}");

        if source.starts_with("http://") || source.starts_with("https://") {
            tracing::debug!("CompositeOpenApiLoader: Using HTTP loader");
            self.http.load(source).await
        } else {
            tracing::debug!("CompositeOpenApiLoader: Using file loader");
            self.file.load(source).await
        }
    }
}
