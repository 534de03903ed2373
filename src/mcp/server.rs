//! MCP server exposing the bridge's tools

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    model::*,
    service::RequestContext,
};
use std::sync::Arc;

use crate::bridge::{Bridge, BridgeError};

/// MCP handler backed by one [`Bridge`]
#[derive(Clone)]
pub struct SwaggerMcpServer {
    bridge: Arc<Bridge>,
    name: String,
}

impl SwaggerMcpServer {
    pub fn new(bridge: Arc<Bridge>, name: impl Into<String>) -> Self {
        Self {
            bridge,
            name: name.into(),
        }
    }

    /// MCP tool models in registration order
    pub fn tools(&self) -> Vec<Tool> {
        self.bridge
            .registry()
            .tools()
            .iter()
            .map(|tool| {
                Tool::new(
                    tool.name.clone(),
                    tool.description.clone(),
                    Arc::new(tool.input_schema()),
                )
            })
            .collect()
    }

    /// Run one tool call and wrap the upstream text as MCP content
    pub async fn call(
        &self,
        name: &str,
        arguments: Option<&JsonObject>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = %name, "Tool call");
        let text = self
            .bridge
            .call(name, arguments)
            .await
            .map_err(to_mcp_error)?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

fn to_mcp_error(err: BridgeError) -> McpError {
    if err.is_invalid_params() {
        McpError::invalid_params(err.to_string(), None)
    } else {
        McpError::internal_error(err.to_string(), None)
    }
}

impl ServerHandler for SwaggerMcpServer {
    fn get_info(&self) -> ServerInfo {
        let info = self.bridge.info();
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.name.clone(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(format!(
                "Tools for the {} API (version {}). Each tool calls one HTTP operation and returns the response body.",
                info.title, info.version
            )),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.call(&request.name, request.arguments.as_ref()).await
    }
}
