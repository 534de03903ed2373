//! Error types for tool invocation
//!
//! Upstream HTTP and network failures are not errors: the invoker returns
//! them as JSON text. These variants cover the failures that are reported to
//! the MCP caller as errors.

use thiserror::Error;

/// Result type alias for bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Errors that can occur while routing a tool call
#[derive(Error, Debug)]
pub enum BridgeError {
    /// No operation derives this tool identifier
    #[error("Tool '{0}' not found")]
    ToolNotFound(String),

    /// A required argument was not supplied
    #[error("Tool '{tool}': required argument '{argument}' is missing")]
    MissingArgument { tool: String, argument: String },

    /// A `{name}` placeholder in the path template has no value
    #[error("Tool '{tool}': no value for path parameter '{parameter}'")]
    MissingPathParameter { tool: String, parameter: String },

    /// A path value that cannot stand as a single path segment
    #[error("Tool '{tool}': value '{value}' is not allowed for path parameter '{parameter}'")]
    InvalidPathParameter {
        tool: String,
        parameter: String,
        value: String,
    },

    /// The HTTP client could not be created
    #[error("HTTP client error: {0}")]
    Client(String),
}

impl BridgeError {
    /// Whether the caller can fix this error by changing its arguments
    pub fn is_invalid_params(&self) -> bool {
        matches!(
            self,
            Self::ToolNotFound(_)
                | Self::MissingArgument { .. }
                | Self::MissingPathParameter { .. }
                | Self::InvalidPathParameter { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = BridgeError::ToolNotFound("get_nothing".to_string());
        assert_eq!(err.to_string(), "Tool 'get_nothing' not found");

        let err = BridgeError::MissingPathParameter {
            tool: "get_companies_id".to_string(),
            parameter: "id".to_string(),
        };
        assert!(err.to_string().contains("path parameter 'id'"));
        assert!(err.is_invalid_params());

        assert!(!BridgeError::Client("boom".to_string()).is_invalid_params());
    }
}
