//! Invoker: turns a tool call into one HTTP request against the upstream API
//!
//! Every completed HTTP exchange yields text, whatever its status code.
//! Network failures and timeouts are also returned as text, a JSON object
//! `{"error": "<message>"}`, so the calling agent always gets something to
//! read.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::{Map, Value as JsonValue, json};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use super::error::{BridgeError, Result};
use super::index::OperationIndex;
use crate::core::credential::ApiKey;
use crate::infrastructure::openapi::{HttpMethod, Operation, ParameterLocation};

static PATH_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^{}]+)\}").expect("Invalid regex pattern"));

/// A fully resolved upstream request
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub method: HttpMethod,
    /// Absolute URL including the encoded query string
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Map<String, JsonValue>>,
}

/// Executes tool calls against the upstream API
pub struct Invoker {
    client: Client,
    base_url: String,
    index: Arc<OperationIndex>,
    api_key: Option<ApiKey>,
}

impl Invoker {
    pub fn new(
        base_url: impl Into<String>,
        index: Arc<OperationIndex>,
        api_key: Option<ApiKey>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| BridgeError::Client(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            index,
            api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Call the operation behind `identifier` with already bound arguments.
    ///
    /// Only lookup and path resolution failures are errors.
    pub async fn invoke(
        &self,
        identifier: &str,
        arguments: &Map<String, JsonValue>,
    ) -> Result<String> {
        let operation = self.index.find(identifier)?;
        let request = self.build_request(identifier, operation, arguments)?;

        tracing::debug!(
            tool = %identifier,
            method = %request.method,
            url = %request.url,
            "Calling upstream API"
        );

        Ok(self.send(request).await)
    }

    /// Resolve path, query, headers and body for one call without sending it
    pub fn build_request(
        &self,
        identifier: &str,
        operation: &Operation,
        arguments: &Map<String, JsonValue>,
    ) -> Result<PreparedRequest> {
        let mut path_values: HashMap<&str, String> = HashMap::new();
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        let mut has_query = false;
        let mut headers = Vec::new();
        let mut consumed: HashSet<&str> = HashSet::new();

        for param in &operation.parameters {
            let Some(value) = arguments.get(&param.name).filter(|v| !v.is_null()) else {
                continue;
            };
            let rendered = render_value(value);

            match param.location {
                ParameterLocation::Path => {
                    let segment = encode_path_segment(&rendered).ok_or_else(|| {
                        BridgeError::InvalidPathParameter {
                            tool: identifier.to_string(),
                            parameter: param.name.clone(),
                            value: rendered.clone(),
                        }
                    })?;
                    path_values.insert(param.name.as_str(), segment);
                }
                ParameterLocation::Query => {
                    query.append_pair(&param.name, &rendered);
                    has_query = true;
                }
                ParameterLocation::Header if self.is_reserved_header(&param.name) => {
                    tracing::debug!(
                        tool = %identifier,
                        header = %param.name,
                        "Skipping header parameter that would override a fixed header"
                    );
                }
                ParameterLocation::Header => {
                    headers.push((param.name.clone(), rendered));
                }
            }
            consumed.insert(param.name.as_str());
        }

        // Placeholders are resolved against the template, never the output
        let mut missing = None;
        let path = PATH_PLACEHOLDER.replace_all(&operation.path, |caps: &Captures| {
            match path_values.get(&caps[1]) {
                Some(segment) => segment.clone(),
                None => {
                    missing.get_or_insert_with(|| caps[1].to_string());
                    String::new()
                }
            }
        });
        if let Some(parameter) = missing {
            return Err(BridgeError::MissingPathParameter {
                tool: identifier.to_string(),
                parameter,
            });
        }

        let mut url = format!("{}{}", self.base_url, path);
        if has_query {
            url.push('?');
            url.push_str(&query.finish());
        }

        let body = operation
            .request_body
            .as_ref()
            .map(|_| {
                arguments
                    .iter()
                    .filter(|(name, value)| !consumed.contains(name.as_str()) && !value.is_null())
                    .map(|(name, value)| (name.clone(), value.clone()))
                    .collect::<Map<_, _>>()
            })
            .filter(|body| !body.is_empty());

        Ok(PreparedRequest {
            method: operation.method,
            url,
            headers,
            body,
        })
    }

    /// Headers set by the invoker itself
    fn is_reserved_header(&self, name: &str) -> bool {
        name.eq_ignore_ascii_case(CONTENT_TYPE.as_str())
            || (self.api_key.is_some() && name.eq_ignore_ascii_case(AUTHORIZATION.as_str()))
    }

    async fn send(&self, request: PreparedRequest) -> String {
        let mut builder = self
            .client
            .request(request.method.to_reqwest(), &request.url)
            .header(CONTENT_TYPE, "application/json");

        if let Some(key) = &self.api_key {
            builder = builder.header(AUTHORIZATION, key.bearer_header());
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(url = %request.url, error = %e, "Upstream request failed");
                return error_payload(&e.to_string());
            }
        };

        tracing::debug!(status = %response.status(), "Upstream responded");
        match response.text().await {
            Ok(text) => render_response(&text),
            Err(e) => error_payload(&e.to_string()),
        }
    }
}

/// Plain text form of an argument value for paths, queries and headers
fn render_value(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Array(items) => items
            .iter()
            .map(render_value)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

/// Percent-encode a value as exactly one path segment.
///
/// `.` and `..` are refused since they would move the request to another path.
fn encode_path_segment(value: &str) -> Option<String> {
    if value == "." || value == ".." {
        return None;
    }
    // form encoding writes spaces as `+`, which a path reads literally
    let encoded: String = url::form_urlencoded::byte_serialize(value.as_bytes()).collect();
    Some(encoded.replace('+', "%20"))
}

/// Pretty JSON when the body parses as JSON, the raw text otherwise
fn render_response(text: &str) -> String {
    serde_json::from_str::<JsonValue>(text)
        .ok()
        .and_then(|value| serde_json::to_string_pretty(&value).ok())
        .unwrap_or_else(|| text.to_string())
}

fn error_payload(message: &str) -> String {
    let payload = json!({ "error": message });
    serde_json::to_string_pretty(&payload).unwrap_or_else(|_| payload.to_string())
}
