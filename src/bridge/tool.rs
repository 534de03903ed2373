//! Tool synthesis
//!
//! A synthesized tool is plain metadata: an ordered, typed argument list and
//! a description. Every tool is invoked through the same call path, which
//! binds the supplied arguments against this metadata and hands them to the
//! invoker.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue, json};

use super::error::{BridgeError, Result};
use super::params::{ArgType, ToolParameter, extract_parameters};
use crate::infrastructure::openapi::Operation;

/// One argument of a synthesized tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolArgument {
    pub name: String,
    pub arg_type: ArgType,
    pub description: String,
    pub required: bool,
}

/// A callable tool derived from one operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesizedTool {
    pub name: String,
    pub description: String,
    /// Required arguments first, then optional ones
    pub arguments: Vec<ToolArgument>,
}

/// Builds tools from operations
pub struct ToolSynthesizer;

impl ToolSynthesizer {
    /// Build a tool with an explicit argument list.
    ///
    /// The relative order of parameters is kept within the required group and
    /// within the optional group.
    pub fn synthesize(
        identifier: &str,
        description: &str,
        parameters: Vec<ToolParameter>,
    ) -> SynthesizedTool {
        let (required, optional): (Vec<_>, Vec<_>) =
            parameters.into_iter().partition(|param| param.required);

        let arguments = required
            .into_iter()
            .chain(optional)
            .map(|param| ToolArgument {
                name: param.name,
                arg_type: param.arg_type,
                description: param.description,
                required: param.required,
            })
            .collect();

        SynthesizedTool {
            name: identifier.to_string(),
            description: description.to_string(),
            arguments,
        }
    }

    /// Build the tool for an indexed operation
    pub fn for_operation(identifier: &str, operation: &Operation) -> SynthesizedTool {
        Self::synthesize(
            identifier,
            &operation.display_description(),
            extract_parameters(operation),
        )
    }
}

impl SynthesizedTool {
    /// JSON Schema of the argument object, for introspection by MCP clients
    pub fn input_schema(&self) -> Map<String, JsonValue> {
        let mut properties = Map::new();
        for argument in &self.arguments {
            let mut property = Map::new();
            property.insert(
                "type".to_string(),
                json!(argument.arg_type.json_schema_type()),
            );
            if !argument.description.is_empty() {
                property.insert("description".to_string(), json!(argument.description));
            }
            properties.insert(argument.name.clone(), JsonValue::Object(property));
        }

        let required: Vec<&str> = self
            .arguments
            .iter()
            .filter(|argument| argument.required)
            .map(|argument| argument.name.as_str())
            .collect();

        let mut schema = Map::new();
        schema.insert("type".to_string(), json!("object"));
        schema.insert("properties".to_string(), JsonValue::Object(properties));
        if !required.is_empty() {
            schema.insert("required".to_string(), json!(required));
        }
        schema
    }

    /// Names of the arguments in call order
    pub fn argument_names(&self) -> impl Iterator<Item = &str> {
        self.arguments.iter().map(|argument| argument.name.as_str())
    }

    /// Bind supplied values to this tool's arguments.
    ///
    /// Missing keys and `null` values are absent and left out of the result.
    /// Names that are not arguments of this tool are ignored.
    pub fn bind(
        &self,
        supplied: Option<&Map<String, JsonValue>>,
    ) -> Result<Map<String, JsonValue>> {
        let empty = Map::new();
        let supplied = supplied.unwrap_or(&empty);

        for name in supplied.keys() {
            if !self.arguments.iter().any(|argument| &argument.name == name) {
                tracing::debug!(tool = %self.name, argument = %name, "Ignoring unknown argument");
            }
        }

        let mut bound = Map::new();
        for argument in &self.arguments {
            match supplied.get(&argument.name) {
                Some(value) if !value.is_null() => {
                    bound.insert(argument.name.clone(), value.clone());
                }
                _ if argument.required => {
                    return Err(BridgeError::MissingArgument {
                        tool: self.name.clone(),
                        argument: argument.name.clone(),
                    });
                }
                _ => {}
            }
        }
        Ok(bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::params::ParameterSource;

    fn param(name: &str, required: bool) -> ToolParameter {
        ToolParameter {
            name: name.to_string(),
            arg_type: ArgType::Text,
            description: String::new(),
            required,
            source: ParameterSource::Query,
        }
    }

    #[test]
    fn test_required_arguments_come_first() {
        let tool = ToolSynthesizer::synthesize(
            "get_search",
            "Search",
            vec![
                param("page", false),
                param("q", true),
                param("per_page", false),
                param("lang", true),
            ],
        );

        let names: Vec<_> = tool.argument_names().collect();
        assert_eq!(names, vec!["q", "lang", "page", "per_page"]);
        assert_eq!(tool.name, "get_search");
        assert_eq!(tool.description, "Search");
    }

    #[test]
    fn test_required_first_for_any_mix() {
        // Every required/optional pattern over four parameters
        for mask in 0u8..16 {
            let params: Vec<_> = (0..4)
                .map(|i| param(&format!("p{i}"), mask & (1 << i) != 0))
                .collect();
            let tool = ToolSynthesizer::synthesize("t", "d", params);
            let first_optional = tool
                .arguments
                .iter()
                .position(|a| !a.required)
                .unwrap_or(tool.arguments.len());
            assert!(tool.arguments[first_optional..].iter().all(|a| !a.required));
        }
    }

    #[test]
    fn test_zero_parameter_tool() {
        let tool = ToolSynthesizer::synthesize("get_health", "GET /health", vec![]);
        assert!(tool.arguments.is_empty());
        assert_eq!(
            JsonValue::Object(tool.input_schema()),
            json!({ "type": "object", "properties": {} })
        );
        assert!(tool.bind(None).unwrap().is_empty());
    }

    #[test]
    fn test_input_schema() {
        let mut id = param("id", true);
        id.arg_type = ArgType::Integer;
        id.description = "Company id".to_string();
        let tool = ToolSynthesizer::synthesize(
            "get_companies_id",
            "Find company",
            vec![param("format", false), id],
        );

        let schema = JsonValue::Object(tool.input_schema());
        assert_eq!(
            schema,
            json!({
                "type": "object",
                "properties": {
                    "id": { "type": "integer", "description": "Company id" },
                    "format": { "type": "string" }
                },
                "required": ["id"]
            })
        );
    }

    #[test]
    fn test_bind_drops_absent_and_unknown_arguments() {
        let tool = ToolSynthesizer::synthesize(
            "get_search",
            "Search",
            vec![param("q", true), param("page", false)],
        );

        let supplied = json!({ "q": "SFR", "page": null, "extra": 1 });
        let bound = tool.bind(supplied.as_object()).unwrap();
        assert_eq!(JsonValue::Object(bound), json!({ "q": "SFR" }));
    }

    #[test]
    fn test_bind_missing_required_argument() {
        let tool = ToolSynthesizer::synthesize("get_search", "Search", vec![param("q", true)]);

        let err = tool.bind(json!({ "q": null }).as_object()).unwrap_err();
        assert!(matches!(err, BridgeError::MissingArgument { ref argument, .. } if argument == "q"));
        assert!(tool.bind(None).is_err());
    }
}
