//! OpenAPI/Swagger document parser
//!
//! Turns the decoded JSON tree of an OpenAPI 3.x or Swagger 2.0 document into
//! a [`SpecDocument`]. It handles:
//! - API metadata (`info`)
//! - the base URL, from `servers` or from the legacy `host`/`schemes`/`basePath`
//! - path-level and operation-level parameters
//! - JSON request bodies (`requestBody` or a Swagger 2.0 `in: body` parameter)
//!
//! `$ref` entries are not resolved: a parameter that is only a reference is
//! skipped and a request body that is only a reference has no schema.

use serde_json::Value as JsonValue;
use url::Url;

use super::types::{
    ApiInfo, HttpMethod, Operation, Parameter, ParameterLocation, RequestBody, SpecDocument,
};
use crate::core::error::{Error, Result};

/// A parameter entry is either a regular parameter or a Swagger 2.0 body
enum ParsedParameter {
    Regular(Parameter),
    Body(RequestBody),
}

/// OpenAPI document parser
pub struct OpenApiParser {
    /// The raw JSON value of the document
    pub json: JsonValue,
    base_url_override: Option<String>,
    source_url: Option<Url>,
}

impl OpenApiParser {
    /// Create a new parser from decoded content
    pub fn new(json: JsonValue) -> Self {
        Self {
            json,
            base_url_override: None,
            source_url: None,
        }
    }

    /// Use this base URL instead of the one declared by the document
    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        self.base_url_override = base_url;
        self
    }

    /// URL the document was fetched from, used to resolve relative server URLs
    pub fn with_source_url(mut self, source_url: Option<Url>) -> Self {
        self.source_url = source_url;
        self
    }

    /// Parse the document to our domain model
    pub fn parse(&self) -> Result<SpecDocument> {
        if !self.json.is_object() {
            return Err(Error::parse("document root is not an object"));
        }

        let version = self
            .json
            .get("openapi")
            .or_else(|| self.json.get("swagger"))
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::parse("missing `openapi` or `swagger` version field"))?
            .to_string();

        let info = ApiInfo {
            title: self
                .title()
                .ok_or_else(|| Error::parse("missing info.title"))?
                .to_string(),
            version: self
                .version()
                .ok_or_else(|| Error::parse("missing info.version"))?
                .to_string(),
            description: self
                .json
                .get("info")
                .and_then(|info| info.get("description"))
                .and_then(|v| v.as_str())
                .map(String::from),
        };

        let base_url = self.resolve_base_url()?;
        let operations = self.parse_operations()?;
        tracing::debug!("OpenAPI parser found {} operations", operations.len());

        Ok(SpecDocument {
            version,
            info,
            base_url,
            operations,
        })
    }

    /// Get the title of the API
    pub fn title(&self) -> Option<&str> {
        self.json.get("info")?.get("title")?.as_str()
    }

    /// Get the version of the API
    pub fn version(&self) -> Option<&str> {
        self.json.get("info")?.get("version")?.as_str()
    }

    /// Determine the base URL: explicit override, then `servers[0].url`,
    /// then the Swagger 2.0 `schemes[0]://host basePath` triple.
    pub fn resolve_base_url(&self) -> Result<String> {
        if let Some(base_url) = &self.base_url_override {
            return Ok(base_url.trim_end_matches('/').to_string());
        }

        let first_server = self
            .json
            .get("servers")
            .and_then(JsonValue::as_array)
            .and_then(|servers| servers.first());

        if let Some(server) = first_server {
            let url = server
                .get("url")
                .and_then(JsonValue::as_str)
                .ok_or_else(|| Error::schema("servers[0] has no `url`"))?;
            return Ok(self.absolutize(url).trim_end_matches('/').to_string());
        }

        if let Some(host) = self.json.get("host").and_then(JsonValue::as_str) {
            let scheme = self
                .json
                .get("schemes")
                .and_then(JsonValue::as_array)
                .and_then(|schemes| schemes.first())
                .and_then(JsonValue::as_str)
                .unwrap_or("https");
            let base_path = self
                .json
                .get("basePath")
                .and_then(JsonValue::as_str)
                .unwrap_or("");
            return Ok(format!("{scheme}://{host}{base_path}")
                .trim_end_matches('/')
                .to_string());
        }

        Err(Error::schema(
            "cannot determine the API base URL: neither `servers` nor `host` is present",
        ))
    }

    /// Resolve a relative server URL against the document location
    fn absolutize(&self, url: &str) -> String {
        if Url::parse(url).is_ok() {
            return url.to_string();
        }
        match self.source_url.as_ref().and_then(|src| src.join(url).ok()) {
            Some(joined) => joined.to_string(),
            None => url.to_string(),
        }
    }

    /// Parse all supported path/method entries in document order
    pub fn parse_operations(&self) -> Result<Vec<Operation>> {
        let Some(paths) = self.json.get("paths") else {
            tracing::warn!("OpenAPI document has no `paths`; no tools will be generated");
            return Ok(Vec::new());
        };
        let paths = paths
            .as_object()
            .ok_or_else(|| Error::parse("`paths` is not an object"))?;

        let mut operations = Vec::new();
        for (path, path_item) in paths {
            let Some(path_item) = path_item.as_object() else {
                tracing::debug!(path = %path, "Skipping path item that is not an object");
                continue;
            };

            for (key, method_item) in path_item {
                let Ok(method) = key.parse::<HttpMethod>() else {
                    continue;
                };
                let Some(method_item) = method_item.as_object() else {
                    tracing::debug!(path = %path, method = %key, "Skipping malformed operation");
                    continue;
                };
                operations.push(self.build_operation(path, method, path_item, method_item));
            }
        }

        Ok(operations)
    }

    /// Build an Operation from path, method, and method item
    fn build_operation(
        &self,
        path: &str,
        method: HttpMethod,
        path_item: &serde_json::Map<String, JsonValue>,
        method_item: &serde_json::Map<String, JsonValue>,
    ) -> Operation {
        let text = |key: &str| {
            method_item
                .get(key)
                .and_then(JsonValue::as_str)
                .map(String::from)
        };

        let mut parameters = Vec::new();
        let mut request_body = None;

        // Path-level parameters first; an operation parameter with the same
        // name and location replaces the path-level one
        let declared = [path_item.get("parameters"), method_item.get("parameters")];
        for entry in declared
            .into_iter()
            .flatten()
            .filter_map(JsonValue::as_array)
            .flatten()
        {
            match self.parse_parameter(entry) {
                Some(ParsedParameter::Regular(param)) => upsert_parameter(&mut parameters, param),
                Some(ParsedParameter::Body(body)) => request_body = Some(body),
                None => {}
            }
        }

        if let Some(body) = method_item.get("requestBody") {
            request_body = Some(self.parse_request_body(body));
        }

        Operation {
            method,
            path: path.to_string(),
            operation_id: text("operationId"),
            summary: text("summary"),
            description: text("description"),
            parameters,
            request_body,
        }
    }

    /// Parse a single parameter entry
    fn parse_parameter(&self, param: &JsonValue) -> Option<ParsedParameter> {
        let Some(name) = param.get("name").and_then(JsonValue::as_str) else {
            tracing::debug!(parameter = %param, "Skipping parameter without a name");
            return None;
        };

        let required = param
            .get("required")
            .and_then(JsonValue::as_bool)
            .unwrap_or(false);
        let description = param
            .get("description")
            .and_then(JsonValue::as_str)
            .unwrap_or_default()
            .to_string();

        let location = match param.get("in").and_then(JsonValue::as_str) {
            Some("path") => ParameterLocation::Path,
            Some("query") => ParameterLocation::Query,
            Some("header") => ParameterLocation::Header,
            Some("body") => {
                return Some(ParsedParameter::Body(RequestBody {
                    required,
                    description: Some(description).filter(|d| !d.is_empty()),
                    schema: param.get("schema").cloned(),
                }));
            }
            other => {
                tracing::debug!(
                    parameter = %name,
                    location = ?other,
                    "Skipping parameter in unsupported location"
                );
                return None;
            }
        };

        // OpenAPI 3 declares the type in `schema`, Swagger 2.0 on the parameter
        let schema_type = param
            .get("schema")
            .and_then(|schema| schema.get("type"))
            .or_else(|| param.get("type"))
            .and_then(JsonValue::as_str)
            .unwrap_or("string")
            .to_string();

        Some(ParsedParameter::Regular(Parameter {
            name: name.to_string(),
            location,
            schema_type,
            required,
            description,
        }))
    }

    /// Parse an OpenAPI 3 request body
    fn parse_request_body(&self, body: &JsonValue) -> RequestBody {
        RequestBody {
            required: body
                .get("required")
                .and_then(JsonValue::as_bool)
                .unwrap_or(false),
            description: body
                .get("description")
                .and_then(JsonValue::as_str)
                .map(String::from),
            schema: body
                .get("content")
                .and_then(|content| content.get("application/json"))
                .and_then(|media| media.get("schema"))
                .cloned(),
        }
    }
}

fn upsert_parameter(parameters: &mut Vec<Parameter>, param: Parameter) {
    let existing = parameters
        .iter_mut()
        .find(|p| p.name == param.name && p.location == param.location);
    match existing {
        Some(existing) => *existing = param,
        None => parameters.push(param),
    }
}
