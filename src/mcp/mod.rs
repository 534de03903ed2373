//! MCP (Model Context Protocol) surface: the tool server and its transports

pub mod server;
pub mod transport;

pub use server::SwaggerMcpServer;
pub use transport::{MCP_HTTP_PATH, serve_http, serve_stdio};
