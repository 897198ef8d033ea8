//! Agent-specific error types.

use thiserror::Error;

/// Result type for agent operations.
pub type AgentResult<T> = Result<T, AgentError>;

/// Errors surfaced by the invocation pipeline and the tool providers.
///
/// Tool execution failures and rejected arguments are not represented here:
/// the registry has already turned them into result text.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Listing or calling tools failed at the transport level.
    #[error("Tool registry unavailable while trying to {operation}: {message}")]
    RegistryUnavailable {
        operation: &'static str,
        message: String,
    },

    /// A tool name that is not in the current catalog.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

impl AgentError {
    /// Create a registry-unavailable error for the given operation.
    pub fn unavailable(operation: &'static str, message: impl ToString) -> Self {
        Self::RegistryUnavailable {
            operation,
            message: message.to_string(),
        }
    }

    /// Create an unknown-tool error.
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }
}
