//! HTTP-based OpenAPI document loader

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

use super::{DocumentFormat, OpenApiLoader, OpenApiParser, SpecDocument};
use crate::core::error::{Error, Result};

/// Loads OpenAPI documents from HTTP/HTTPS URLs
pub struct HttpOpenApiLoader {
    client: Client,
    base_url: Option<String>,
}

impl HttpOpenApiLoader {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| Error::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: None,
        })
    }

    /// Use this base URL instead of the one declared by the document
    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        self.base_url = base_url;
        self
    }
}

#[async_trait]
impl OpenApiLoader for HttpOpenApiLoader {
    async fn load(&self, source: &str) -> Result<SpecDocument> {
        // Only handle HTTP(S) URLs
        let url = Url::parse(source)
            .ok()
            .filter(|url| matches!(url.scheme(), "http" | "https"))
            .ok_or_else(|| {
                Error::fetch(format!(
                    "HttpOpenApiLoader only handles HTTP(S) URLs, got: {source}"
                ))
            })?;

        tracing::debug!(url = %url, "Fetching OpenAPI document");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| Error::fetch(format!("request to {source} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::fetch(format!("HTTP {status} when fetching {source}")));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let content = response
            .text()
            .await
            .map_err(|e| Error::fetch(format!("failed to read response body: {e}")))?;

        let format = DocumentFormat::detect(content_type.as_deref(), url.path());
        let spec_value = format.decode(&content)?;

        OpenApiParser::new(spec_value)
            .with_base_url(self.base_url.clone())
            .with_source_url(Some(url))
            .parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn loader() -> HttpOpenApiLoader {
        HttpOpenApiLoader::new(Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_http_loader_json() {
        let mock_server = MockServer::start().await;
        let spec_json = r#"{
            "openapi": "3.0.0",
            "info": { "title": "Test API", "version": "1.0.0" },
            "servers": [{ "url": "https://api.example.com/v1" }],
            "paths": {}
        }"#;

        Mock::given(method("GET"))
            .and(path("/openapi.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(spec_json)
                    .insert_header("content-type", "application/json"),
            )
            .mount(&mock_server)
            .await;

        let url = format!("{}/openapi.json", mock_server.uri());
        let spec = loader().load(&url).await.unwrap();

        assert_eq!(spec.version, "3.0.0");
        assert_eq!(spec.info.title, "Test API");
        assert_eq!(spec.base_url, "https://api.example.com/v1");
    }

    #[tokio::test]
    async fn test_http_loader_yaml_by_content_type() {
        let mock_server = MockServer::start().await;
        let spec_yaml = r#"swagger: "2.0"
info:
  title: Yaml API
  version: 1.0.0
host: yaml.example.com
basePath: /api
schemes:
  - http
paths: {}"#;

        Mock::given(method("GET"))
            .and(path("/spec"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(spec_yaml)
                    .insert_header("content-type", "application/x-yaml"),
            )
            .mount(&mock_server)
            .await;

        let url = format!("{}/spec", mock_server.uri());
        let spec = loader().load(&url).await.unwrap();
        assert_eq!(spec.info.title, "Yaml API");
        assert_eq!(spec.base_url, "http://yaml.example.com/api");
    }

    #[tokio::test]
    async fn test_http_loader_yaml_by_extension() {
        let mock_server = MockServer::start().await;
        let spec_yaml = "openapi: 3.0.1\ninfo:\n  title: Ext API\n  version: '2'\nservers:\n  - url: https://ext.example.com\npaths: {}\n";

        Mock::given(method("GET"))
            .and(path("/openapi.yml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(spec_yaml))
            .mount(&mock_server)
            .await;

        let url = format!("{}/openapi.yml", mock_server.uri());
        let spec = loader().load(&url).await.unwrap();
        assert_eq!(spec.info.title, "Ext API");
        assert_eq!(spec.info.version, "2");
    }

    #[tokio::test]
    async fn test_http_loader_relative_server_url() {
        let mock_server = MockServer::start().await;
        let spec_json = r#"{
            "openapi": "3.0.4",
            "info": { "title": "Petstore", "version": "1.0.0" },
            "servers": [{ "url": "/api/v3" }],
            "paths": {}
        }"#;

        Mock::given(method("GET"))
            .and(path("/api/v3/openapi.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(spec_json))
            .mount(&mock_server)
            .await;

        let url = format!("{}/api/v3/openapi.json", mock_server.uri());
        let spec = loader().load(&url).await.unwrap();
        assert_eq!(spec.base_url, format!("{}/api/v3", mock_server.uri()));
    }

    #[tokio::test]
    async fn test_http_loader_404() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/notfound"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let url = format!("{}/notfound", mock_server.uri());
        match loader().load(&url).await.unwrap_err() {
            Error::Fetch(msg) => assert!(msg.contains("HTTP 404")),
            other => panic!("Expected Fetch error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_http_loader_malformed_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/broken.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("{ \"openapi\": ")
                    .insert_header("content-type", "application/json"),
            )
            .mount(&mock_server)
            .await;

        let url = format!("{}/broken.json", mock_server.uri());
        let err = loader().load(&url).await.unwrap_err();
        assert!(err.is_parse_error());
    }

    #[tokio::test]
    async fn test_http_loader_connection_refused() {
        let err = loader()
            .load("http://127.0.0.1:1/openapi.json")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Fetch(_)));
    }

    #[tokio::test]
    async fn test_http_loader_non_http_url() {
        match loader().load("file:///path/to/spec.yaml").await.unwrap_err() {
            Error::Fetch(msg) => assert!(msg.contains("only handles HTTP")),
            other => panic!("Expected Fetch error, got {other:?}"),
        }
    }
}
