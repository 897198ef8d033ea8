//! MCP Tool Server Entry Point
//!
//! Initializes logging, loads configuration, and serves the demo tools
//! (`say_hello`, `web_search`, `reddit_scrape`) over the configured transport.

use anyhow::Result;
use tracing::info;

use mcp_agent_demo::core::{Config, McpServer, TransportService, init_logging};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment
    let config = Config::from_env();

    init_logging(&config.logging);

    info!("Starting {} v{}", config.server.name, config.server.version);

    // Create the MCP server
    let server = McpServer::new(config.clone());

    info!("Server initialized");

    // Create and run the transport service
    let transport = TransportService::new(config.transport);
    transport.run(server).await?;

    info!("Server shutting down");

    Ok(())
}
