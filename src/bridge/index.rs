//! Operation index keyed by derived tool identifier

use std::collections::HashMap;

use super::error::{BridgeError, Result};
use crate::core::utils::derive_tool_name;
use crate::infrastructure::openapi::{Operation, SpecDocument};

/// Maps tool identifiers to operations, built once at load time
#[derive(Debug, Clone, Default)]
pub struct OperationIndex {
    /// Map of tool identifier to operation
    operations: HashMap<String, Operation>,
    /// Identifiers in document order
    order: Vec<String>,
}

impl OperationIndex {
    /// Index every operation of a loaded document.
    ///
    /// When two operations derive the same identifier the first one in
    /// document order is kept.
    pub fn build(spec: &SpecDocument) -> Self {
        let mut index = Self::default();

        for operation in &spec.operations {
            let identifier = derive_tool_name(&operation.path, operation.method.as_str());

            if let Some(existing) = index.operations.get(&identifier) {
                tracing::warn!(
                    tool = %identifier,
                    kept = %format!("{} {}", existing.method, existing.path),
                    dropped = %format!("{} {}", operation.method, operation.path),
                    "Tool identifier collision, keeping the first operation"
                );
                continue;
            }

            warn_on_shared_parameter_names(&identifier, operation);

            index.order.push(identifier.clone());
            index.operations.insert(identifier, operation.clone());
        }

        index
    }

    /// Look up the operation behind a tool identifier
    pub fn find(&self, identifier: &str) -> Result<&Operation> {
        self.operations
            .get(identifier)
            .ok_or_else(|| BridgeError::ToolNotFound(identifier.to_string()))
    }

    /// Identifiers and operations in document order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Operation)> {
        self.order
            .iter()
            .filter_map(|id| self.operations.get(id).map(|op| (id.as_str(), op)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

// A value supplied for such a name is sent to every location declaring it.
fn warn_on_shared_parameter_names(identifier: &str, operation: &Operation) {
    for (i, param) in operation.parameters.iter().enumerate() {
        let shared = operation.parameters[..i]
            .iter()
            .find(|earlier| earlier.name == param.name && earlier.location != param.location);
        if let Some(earlier) = shared {
            tracing::warn!(
                tool = %identifier,
                parameter = %param.name,
                "Parameter declared in both {} and {}",
                earlier.location,
                param.location
            );
        }
    }
}
