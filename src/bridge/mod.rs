//! Bridge between a loaded API description and callable tools
//!
//! Loading produces a [`SpecDocument`]. The bridge indexes its operations,
//! synthesizes one tool per operation and routes every call through a single
//! path: bind the arguments against the tool, then hand them to the invoker.

pub mod error;
pub mod index;
pub mod invoker;
pub mod params;
pub mod registry;
pub mod tool;

pub use error::{BridgeError, Result};
pub use index::OperationIndex;
pub use invoker::{Invoker, PreparedRequest};
pub use params::{ArgType, ParameterSource, ToolParameter, extract_parameters};
pub use registry::ToolRegistry;
pub use tool::{SynthesizedTool, ToolArgument, ToolSynthesizer};

use serde_json::{Map, Value as JsonValue};
use std::sync::Arc;

use crate::core::config::Config;
use crate::infrastructure::openapi::{ApiInfo, SpecDocument};

/// Immutable, shareable set of tools for one API
pub struct Bridge {
    info: ApiInfo,
    registry: ToolRegistry,
    invoker: Invoker,
}

impl Bridge {
    /// Index and register every operation of `spec`
    pub fn new(spec: SpecDocument, config: &Config) -> Result<Self> {
        let index = Arc::new(OperationIndex::build(&spec));
        let registry = ToolRegistry::from_index(&index);
        let invoker = Invoker::new(
            spec.base_url.clone(),
            Arc::clone(&index),
            config.api_key().cloned(),
            config.request_timeout(),
        )?;

        tracing::info!(
            tools = registry.len(),
            operations = spec.operations.len(),
            "Registered tools"
        );

        Ok(Self {
            info: spec.info,
            registry,
            invoker,
        })
    }

    pub fn info(&self) -> &ApiInfo {
        &self.info
    }

    pub fn base_url(&self) -> &str {
        self.invoker.base_url()
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Call a tool by name.
    ///
    /// `arguments` may be `None` for tools without required arguments.
    pub async fn call(
        &self,
        name: &str,
        arguments: Option<&Map<String, JsonValue>>,
    ) -> Result<String> {
        let tool = self.registry.get(name)?;
        let bound = tool.bind(arguments)?;
        self.invoker.invoke(name, &bound).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::openapi::{HttpMethod, Operation, Parameter, ParameterLocation};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn spec(base_url: &str) -> SpecDocument {
        SpecDocument {
            version: "3.0.0".to_string(),
            info: ApiInfo {
                title: "Pets".to_string(),
                version: "1.0".to_string(),
                description: None,
            },
            base_url: base_url.to_string(),
            operations: vec![Operation {
                method: HttpMethod::Get,
                path: "/pets/{petId}".to_string(),
                operation_id: Some("getPet".to_string()),
                summary: Some("Get a pet".to_string()),
                description: None,
                parameters: vec![Parameter {
                    name: "petId".to_string(),
                    location: ParameterLocation::Path,
                    schema_type: "integer".to_string(),
                    required: true,
                    description: String::new(),
                }],
                request_body: None,
            }],
        }
    }

    fn config() -> Config {
        Config::builder().spec_source("spec.json").build().unwrap()
    }

    #[tokio::test]
    async fn test_bridge_call() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pets/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 7 })))
            .mount(&mock_server)
            .await;

        let bridge = Bridge::new(spec(&mock_server.uri()), &config()).unwrap();
        assert_eq!(bridge.info().title, "Pets");
        assert_eq!(bridge.registry().len(), 1);

        let arguments = json!({ "petId": 7 });
        let text = bridge
            .call("get_pets_petid", arguments.as_object())
            .await
            .unwrap();
        assert_eq!(text, "{\n  \"id\": 7\n}");
    }

    #[tokio::test]
    async fn test_bridge_call_errors() {
        let bridge = Bridge::new(spec("http://127.0.0.1:1"), &config()).unwrap();

        let err = bridge.call("get_nothing", None).await.unwrap_err();
        assert!(matches!(err, BridgeError::ToolNotFound(_)));

        let err = bridge.call("get_pets_petid", None).await.unwrap_err();
        assert!(matches!(err, BridgeError::MissingArgument { .. }));
    }
}
