//! MCP Agent Demo Library
//!
//! A small Model Context Protocol (MCP) tool server and a browser front end
//! that routes free-text commands to its tools.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, logging, the MCP server and its
//!   transports
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: `say_hello`, `web_search` and `reddit_scrape`
//!   - **agent**: keyword router, argument extractor and invocation pipeline
//! - **frontend** (feature `http`): the agent UI served over HTTP
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use mcp_agent_demo::core::Config;
//! use mcp_agent_demo::domains::agent::{InvocationPipeline, LocalToolProvider};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Arc::new(Config::from_env());
//!     let pipeline = InvocationPipeline::connect(LocalToolProvider::new(config)).await?;
//!     println!("{}", pipeline.invoke("say hello Ada").await?);
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

#[cfg(feature = "http")]
pub mod frontend;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
pub use domains::agent::{InvocationPipeline, ToolProvider};
