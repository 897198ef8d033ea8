//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools
//! - Name-based dispatch used by the HTTP transport and the in-process
//!   provider of the agent front end
//! - Tool metadata for listing

use std::sync::Arc;
use tracing::{info, warn};

use rmcp::model::{CallToolResult, Tool};

use crate::core::config::Config;

use super::ToolError;
use super::definitions::{RedditScrapeTool, SayHelloTool, WebSearchTool};

/// Tool registry - manages all available tools.
#[derive(Clone)]
pub struct ToolRegistry {
    config: Arc<Config>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// This is the single source of truth for all available tools.
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            SayHelloTool::to_tool(),
            WebSearchTool::to_tool(),
            RedditScrapeTool::to_tool(),
        ]
    }

    /// Dispatch a tool call to the appropriate handler.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<CallToolResult, ToolError> {
        info!("Dispatching tool call: {}", name);
        match name {
            SayHelloTool::NAME => SayHelloTool::call(arguments),
            WebSearchTool::NAME => WebSearchTool::call(arguments, &self.config.tools).await,
            RedditScrapeTool::NAME => RedditScrapeTool::call(arguments, &self.config.tools).await,
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::not_found(name))
            }
        }
    }
}
