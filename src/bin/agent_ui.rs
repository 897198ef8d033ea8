//! Agent UI Entry Point
//!
//! Loads the tool catalog once, then serves the browser front end. Set
//! `MCP_AGENT_SERVER_COMMAND` to reach the tools through a spawned
//! `mcp-agent-demo` over STDIO; leave it unset to call them in-process.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{error, info};

use mcp_agent_demo::core::{Config, init_logging};
use mcp_agent_demo::domains::agent::{InvocationPipeline, provider_from_config};
use mcp_agent_demo::frontend::AgentUi;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Arc::new(Config::from_env());

    init_logging(&config.logging);

    info!("Starting agent UI v{}", config.server.version);

    let provider = provider_from_config(Arc::clone(&config));

    // The session cannot start without a catalog
    let pipeline = match InvocationPipeline::connect(provider).await {
        Ok(pipeline) => pipeline,
        Err(e) => {
            error!("Could not load the tool catalog: {}", e);
            return Err(e).context("loading the tool catalog");
        }
    };

    AgentUi::new(config.agent.clone())
        .run(Arc::new(pipeline))
        .await?;

    info!("Agent UI shutting down");

    Ok(())
}
