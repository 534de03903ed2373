//! Registry of synthesized tools

use std::collections::HashMap;

use super::error::{BridgeError, Result};
use super::index::OperationIndex;
use super::tool::{SynthesizedTool, ToolSynthesizer};

/// Synthesized tools keyed by identifier, in registration order
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<SynthesizedTool>,
    by_name: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create a new empty tool registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Synthesize and register one tool per indexed operation
    pub fn from_index(index: &OperationIndex) -> Self {
        let mut registry = Self::new();
        for (identifier, operation) in index.iter() {
            registry.register(ToolSynthesizer::for_operation(identifier, operation));
        }
        registry
    }

    /// Add a tool. A tool with the same name replaces the existing one in place.
    pub fn register(&mut self, tool: SynthesizedTool) {
        match self.by_name.get(&tool.name) {
            Some(&position) => self.tools[position] = tool,
            None => {
                self.by_name.insert(tool.name.clone(), self.tools.len());
                self.tools.push(tool);
            }
        }
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Result<&SynthesizedTool> {
        self.by_name
            .get(name)
            .map(|&position| &self.tools[position])
            .ok_or_else(|| BridgeError::ToolNotFound(name.to_string()))
    }

    /// All tools in registration order
    pub fn tools(&self) -> &[SynthesizedTool] {
        &self.tools
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::openapi::{
        ApiInfo, HttpMethod, Operation, Parameter, ParameterLocation, SpecDocument,
    };

    fn spec() -> SpecDocument {
        SpecDocument {
            version: "2.0".to_string(),
            info: ApiInfo {
                title: "Companies".to_string(),
                version: "1".to_string(),
                description: None,
            },
            base_url: "https://api.example.com".to_string(),
            operations: vec![
                Operation {
                    method: HttpMethod::Get,
                    path: "/companies/{id}".to_string(),
                    operation_id: Some("findCompany".to_string()),
                    summary: None,
                    description: Some("Find a company".to_string()),
                    parameters: vec![
                        Parameter {
                            name: "format".to_string(),
                            location: ParameterLocation::Query,
                            schema_type: "string".to_string(),
                            required: false,
                            description: String::new(),
                        },
                        Parameter {
                            name: "id".to_string(),
                            location: ParameterLocation::Path,
                            schema_type: "integer".to_string(),
                            required: true,
                            description: String::new(),
                        },
                    ],
                    request_body: None,
                },
                Operation {
                    method: HttpMethod::Get,
                    path: "/health".to_string(),
                    operation_id: None,
                    summary: None,
                    description: None,
                    parameters: vec![],
                    request_body: None,
                },
            ],
        }
    }

    #[test]
    fn test_registry_from_index() {
        let registry = ToolRegistry::from_index(&OperationIndex::build(&spec()));
        assert_eq!(registry.len(), 2);

        let names: Vec<_> = registry.tools().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["get_companies_id", "get_health"]);

        let tool = registry.get("get_companies_id").unwrap();
        assert_eq!(tool.description, "Find a company");
        let args: Vec<_> = tool.argument_names().collect();
        assert_eq!(args, vec!["id", "format"]);

        assert_eq!(registry.get("get_health").unwrap().description, "GET /health");
    }

    #[test]
    fn test_register_replaces_in_place() {
        let mut registry = ToolRegistry::from_index(&OperationIndex::build(&spec()));
        registry.register(ToolSynthesizer::synthesize("get_companies_id", "New", vec![]));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.tools()[0].description, "New");
        assert!(matches!(
            registry.get("missing"),
            Err(BridgeError::ToolNotFound(_))
        ));
    }
}
