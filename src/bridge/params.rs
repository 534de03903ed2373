//! Parameter extraction: maps an operation's parameters and JSON body
//! properties to typed tool parameters.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::infrastructure::openapi::{Operation, ParameterLocation};

/// Native argument type of a tool parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArgType {
    Text,
    Integer,
    Float,
    Bool,
    List,
    Map,
}

impl ArgType {
    /// Map an OpenAPI primitive type; unknown types are text
    pub fn from_openapi(openapi_type: &str) -> Self {
        match openapi_type {
            "string" => ArgType::Text,
            "integer" => ArgType::Integer,
            "number" => ArgType::Float,
            "boolean" => ArgType::Bool,
            "array" => ArgType::List,
            "object" => ArgType::Map,
            _ => ArgType::Text,
        }
    }

    /// JSON Schema type advertised to MCP clients
    pub fn json_schema_type(&self) -> &'static str {
        match self {
            ArgType::Text => "string",
            ArgType::Integer => "integer",
            ArgType::Float => "number",
            ArgType::Bool => "boolean",
            ArgType::List => "array",
            ArgType::Map => "object",
        }
    }
}

/// Where a tool parameter came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterSource {
    Path,
    Query,
    Header,
    Body,
}

impl From<ParameterLocation> for ParameterSource {
    fn from(location: ParameterLocation) -> Self {
        match location {
            ParameterLocation::Path => ParameterSource::Path,
            ParameterLocation::Query => ParameterSource::Query,
            ParameterLocation::Header => ParameterSource::Header,
        }
    }
}

/// One typed parameter of a tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolParameter {
    pub name: String,
    pub arg_type: ArgType,
    pub description: String,
    pub required: bool,
    pub source: ParameterSource,
}

/// Extract the parameters of an operation.
///
/// Declared parameters come first, then the properties of the JSON request
/// body schema. A later entry with the same name replaces the earlier one
/// in place.
pub fn extract_parameters(operation: &Operation) -> Vec<ToolParameter> {
    let mut params: Vec<ToolParameter> = Vec::new();

    for param in &operation.parameters {
        upsert(
            &mut params,
            ToolParameter {
                name: param.name.clone(),
                arg_type: ArgType::from_openapi(&param.schema_type),
                description: param.description.clone(),
                required: param.required,
                source: param.location.into(),
            },
        );
    }

    let body_schema = operation
        .request_body
        .as_ref()
        .and_then(|body| body.schema.as_ref());
    if let Some(schema) = body_schema {
        let required: Vec<&str> = schema
            .get("required")
            .and_then(JsonValue::as_array)
            .map(|arr| arr.iter().filter_map(JsonValue::as_str).collect())
            .unwrap_or_default();

        if let Some(properties) = schema.get("properties").and_then(JsonValue::as_object) {
            for (name, property) in properties {
                upsert(
                    &mut params,
                    ToolParameter {
                        name: name.clone(),
                        arg_type: ArgType::from_openapi(
                            property
                                .get("type")
                                .and_then(JsonValue::as_str)
                                .unwrap_or("string"),
                        ),
                        description: property
                            .get("description")
                            .and_then(JsonValue::as_str)
                            .unwrap_or_default()
                            .to_string(),
                        required: required.contains(&name.as_str()),
                        source: ParameterSource::Body,
                    },
                );
            }
        }
    }

    params
}

fn upsert(params: &mut Vec<ToolParameter>, param: ToolParameter) {
    match params.iter_mut().find(|p| p.name == param.name) {
        Some(existing) => *existing = param,
        None => params.push(param),
    }
}
