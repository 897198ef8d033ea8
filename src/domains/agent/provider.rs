//! Tool providers - how the front end reaches the tool registry.
//!
//! - [`ProcessToolProvider`] spawns the tool server and talks MCP over its
//!   stdin/stdout. Every operation gets its own session, which is shut down
//!   before the operation returns.
//! - [`LocalToolProvider`] calls the registry in the same process.

use rmcp::{
    RoleClient, ServiceExt,
    model::CallToolRequestParam,
    service::{RunningService, ServiceError},
    transport::{ConfigureCommandExt, TokioChildProcess},
};
use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::process::Command;
use tracing::{debug, info, instrument, warn};

use super::catalog::ToolDescriptor;
use super::error::{AgentError, AgentResult};
use crate::core::config::Config;
use crate::domains::tools::ToolRegistry;
use crate::domains::tools::definitions::common::{error_result, result_text};

/// The tool registry as seen by the invocation pipeline.
#[async_trait::async_trait]
pub trait ToolProvider: Send + Sync {
    /// List the available tools.
    async fn list_tools(&self) -> AgentResult<Vec<ToolDescriptor>>;

    /// Call a tool and return its text output.
    ///
    /// Tool failures and rejected arguments come back as `Ok` text; only
    /// transport problems are errors.
    async fn call_tool(&self, name: &str, arguments: Map<String, Value>) -> AgentResult<String>;
}

#[async_trait::async_trait]
impl<P: ToolProvider + ?Sized> ToolProvider for Arc<P> {
    async fn list_tools(&self) -> AgentResult<Vec<ToolDescriptor>> {
        (**self).list_tools().await
    }

    async fn call_tool(&self, name: &str, arguments: Map<String, Value>) -> AgentResult<String> {
        (**self).call_tool(name, arguments).await
    }
}

/// Pick the provider described by the configuration.
///
/// A configured server command selects the child-process provider; otherwise
/// the registry is called in-process.
pub fn provider_from_config(config: Arc<Config>) -> Arc<dyn ToolProvider> {
    if let Some(command) = config.agent.server_command.clone() {
        info!("Tool registry: spawning `{}` per operation", command);
        Arc::new(ProcessToolProvider::new(command, config.agent.server_args.clone()))
    } else {
        info!("Tool registry: in-process");
        Arc::new(LocalToolProvider::new(config))
    }
}

// ============================================================================
// In-process provider
// ============================================================================

/// Calls the tool registry directly.
#[derive(Clone)]
pub struct LocalToolProvider {
    registry: ToolRegistry,
}

impl LocalToolProvider {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            registry: ToolRegistry::new(config),
        }
    }
}

#[async_trait::async_trait]
impl ToolProvider for LocalToolProvider {
    async fn list_tools(&self) -> AgentResult<Vec<ToolDescriptor>> {
        Ok(ToolRegistry::get_all_tools()
            .iter()
            .map(ToolDescriptor::from_tool)
            .collect())
    }

    async fn call_tool(&self, name: &str, arguments: Map<String, Value>) -> AgentResult<String> {
        let result = match self.registry.call_tool(name, Value::Object(arguments)).await {
            Ok(result) => result,
            Err(e) => error_result(&e.to_string()),
        };
        Ok(result_text(&result))
    }
}

// ============================================================================
// Child-process provider
// ============================================================================

type ClientSession = RunningService<RoleClient, ()>;

/// Spawns the tool server for each operation and speaks MCP over STDIO.
#[derive(Debug, Clone)]
pub struct ProcessToolProvider {
    command: String,
    args: Vec<String>,
}

impl ProcessToolProvider {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }

    /// Spawn the server and complete the MCP handshake.
    async fn connect(&self, operation: &'static str) -> AgentResult<ClientSession> {
        debug!("Spawning tool server: {} {:?}", self.command, self.args);

        let transport = TokioChildProcess::new(Command::new(&self.command).configure(|cmd| {
            cmd.args(&self.args);
        }))
        .map_err(|e| AgentError::unavailable(operation, e))?;

        ().serve(transport)
            .await
            .map_err(|e| AgentError::unavailable(operation, e))
    }

    /// Shut the session down and reap the child.
    async fn release(session: ClientSession) {
        if let Err(e) = session.cancel().await {
            warn!("Tool server session did not shut down cleanly: {}", e);
        }
    }
}

/// Build the `tools/call` request parameters.
fn call_request(
    name: &str,
    arguments: Map<String, Value>,
) -> serde_json::Result<CallToolRequestParam> {
    serde_json::from_value(serde_json::json!({
        "name": name,
        "arguments": arguments,
    }))
}

#[async_trait::async_trait]
impl ToolProvider for ProcessToolProvider {
    #[instrument(skip(self))]
    async fn list_tools(&self) -> AgentResult<Vec<ToolDescriptor>> {
        let session = self.connect("list tools").await?;
        let listed = session.list_all_tools().await;
        Self::release(session).await;

        let tools = listed.map_err(|e| AgentError::unavailable("list tools", e))?;
        info!("Tool server listed {} tools", tools.len());
        Ok(tools.iter().map(ToolDescriptor::from_tool).collect())
    }

    #[instrument(skip(self, arguments))]
    async fn call_tool(&self, name: &str, arguments: Map<String, Value>) -> AgentResult<String> {
        let request =
            call_request(name, arguments).map_err(|e| AgentError::unavailable("call a tool", e))?;

        let session = self.connect("call a tool").await?;
        let called = session.call_tool(request).await;
        Self::release(session).await;

        match called {
            Ok(result) => Ok(result_text(&result)),
            // The server refused the call (unknown tool, bad arguments)
            Err(ServiceError::McpError(data)) => Ok(data.message.into_owned()),
            Err(e) => Err(AgentError::unavailable("call a tool", e)),
        }
    }
}
