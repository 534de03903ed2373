//! Swagger MCP bridge
//!
//! Loads an OpenAPI 3.x or Swagger 2.0 document, turns every operation into a
//! tool with a typed argument list and serves those tools over MCP. A tool call
//! becomes one HTTP request to the described API and returns the response body
//! as text.
#![deny(unsafe_code)]

pub mod bridge;
pub mod core;
pub mod infrastructure;
pub mod mcp;

pub use bridge::{Bridge, BridgeError};
pub use crate::core::{Config, Error, Result};
