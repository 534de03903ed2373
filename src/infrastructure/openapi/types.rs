//! In-memory model of a loaded OpenAPI/Swagger document
//!
//! Only the parts the bridge consumes are kept: API metadata, the base URL and
//! the operations with their parameters and JSON request body schema.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// HTTP methods that are exposed as tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Lowercase name as written in OpenAPI path items
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Patch => "patch",
            HttpMethod::Delete => "delete",
        }
    }

    /// Method for the HTTP client
    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "get" => Ok(HttpMethod::Get),
            "post" => Ok(HttpMethod::Post),
            "put" => Ok(HttpMethod::Put),
            "patch" => Ok(HttpMethod::Patch),
            "delete" => Ok(HttpMethod::Delete),
            other => Err(format!("unsupported HTTP method: {other}")),
        }
    }
}

/// Parameter location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
}

impl std::fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParameterLocation::Path => write!(f, "path"),
            ParameterLocation::Query => write!(f, "query"),
            ParameterLocation::Header => write!(f, "header"),
        }
    }
}

/// Operation parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub location: ParameterLocation,
    /// Declared OpenAPI primitive type (`string`, `integer`, ...)
    pub schema_type: String,
    pub required: bool,
    pub description: String,
}

/// Request body of an operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    pub required: bool,
    pub description: Option<String>,
    /// Schema of the `application/json` content, if any
    pub schema: Option<JsonValue>,
}

/// One HTTP method entry under one path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub method: HttpMethod,
    /// Path template, e.g. `/pet/{petId}`
    pub path: String,
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub parameters: Vec<Parameter>,
    pub request_body: Option<RequestBody>,
}

impl Operation {
    /// Human readable description used as tool documentation
    pub fn display_description(&self) -> String {
        [&self.summary, &self.description]
            .into_iter()
            .flatten()
            .find(|s| !s.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| format!("{} {}", self.method.as_str().to_uppercase(), self.path))
    }
}

/// API information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiInfo {
    pub title: String,
    pub version: String,
    pub description: Option<String>,
}

/// A loaded OpenAPI/Swagger document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecDocument {
    /// Value of the `openapi` or `swagger` field
    pub version: String,
    pub info: ApiInfo,
    /// Base URL every operation path is appended to, without trailing slash
    pub base_url: String,
    /// Operations in document order
    pub operations: Vec<Operation>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn operation(summary: Option<&str>, description: Option<&str>) -> Operation {
        Operation {
            method: HttpMethod::Get,
            path: "/companies/{id}".to_string(),
            operation_id: None,
            summary: summary.map(String::from),
            description: description.map(String::from),
            parameters: vec![],
            request_body: None,
        }
    }

    #[test]
    fn test_http_method_from_str() {
        assert_eq!(HttpMethod::from_str("GET").unwrap(), HttpMethod::Get);
        assert_eq!(HttpMethod::from_str("patch").unwrap(), HttpMethod::Patch);
        assert!(HttpMethod::from_str("options").is_err());
        assert!(HttpMethod::from_str("parameters").is_err());
    }

    #[test]
    fn test_display_description_fallbacks() {
        assert_eq!(
            operation(Some("Find company"), Some("Long text")).display_description(),
            "Find company"
        );
        assert_eq!(
            operation(None, Some("Long text")).display_description(),
            "Long text"
        );
        assert_eq!(
            operation(Some(""), None).display_description(),
            "GET /companies/{id}"
        );
    }
}
