//! Configuration management for the MCP server and the agent front end.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables or defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

/// Main configuration structure.
///
/// This struct contains all configurable aspects of both programs, organized
/// by concern for clarity and maintainability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration for the tool server.
    pub transport: TransportConfig,

    /// Settings shared by the tools that call out to the web.
    pub tools: ToolsConfig,

    /// Agent front end configuration.
    pub agent: AgentConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Configuration for the outbound HTTP tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// DuckDuckGo HTML results page queried by `web_search`.
    pub search_endpoint: String,

    /// Number of search results returned when the caller does not ask.
    pub search_max_results: usize,

    /// Base URL of Reddit's public JSON listings.
    pub reddit_endpoint: String,

    /// User agent sent with every outbound request.
    /// Reddit rejects anonymous default agents.
    pub user_agent: String,

    /// Number of posts returned when the caller does not ask.
    pub reddit_limit: usize,

    /// Timeout for every outbound request, in seconds.
    pub http_timeout_secs: u64,
}

/// Configuration for the browser front end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Host address the UI binds to.
    pub host: String,

    /// Port the UI listens on.
    pub port: u16,

    /// Command used to spawn the tool server over STDIO.
    /// If None, the tool registry is called in-process.
    pub server_command: Option<String>,

    /// Arguments passed to `server_command`.
    pub server_args: Vec<String>,
}

impl ToolsConfig {
    /// Request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            search_endpoint: "https://html.duckduckgo.com/html/".to_string(),
            search_max_results: 3,
            reddit_endpoint: "https://www.reddit.com".to_string(),
            user_agent: format!(
                "{}/{} (demo tool server)",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ),
            reddit_limit: 5,
            http_timeout_secs: 15,
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8501,
            server_command: None,
            server_args: Vec::new(),
        }
    }
}

impl AgentConfig {
    /// The address the UI binds to.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "mcp-agent-demo".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
            tools: ToolsConfig::default(),
            agent: AgentConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        // Outbound tool settings
        if let Ok(endpoint) = std::env::var("MCP_SEARCH_ENDPOINT") {
            config.tools.search_endpoint = endpoint;
        }
        if let Some(max) = parse_env("MCP_SEARCH_MAX_RESULTS") {
            config.tools.search_max_results = max;
        }
        if let Ok(endpoint) = std::env::var("MCP_REDDIT_ENDPOINT") {
            config.tools.reddit_endpoint = endpoint;
        }
        if let Ok(agent) = std::env::var("MCP_TOOLS_USER_AGENT") {
            config.tools.user_agent = agent;
        }
        if let Some(limit) = parse_env("MCP_REDDIT_LIMIT") {
            config.tools.reddit_limit = limit;
        }
        if let Some(secs) = parse_env("MCP_HTTP_TIMEOUT_SECS") {
            config.tools.http_timeout_secs = secs;
        }

        // Agent front end
        if let Ok(host) = std::env::var("MCP_AGENT_HOST") {
            config.agent.host = host;
        }
        if let Some(port) = parse_env("MCP_AGENT_PORT") {
            config.agent.port = port;
        }
        match std::env::var("MCP_AGENT_SERVER_COMMAND") {
            Ok(command) if !command.trim().is_empty() => {
                info!("Agent will spawn tool server: {}", command);
                config.agent.server_command = Some(command);
            }
            _ => {
                warn!(
                    "MCP_AGENT_SERVER_COMMAND not set - the agent UI will call \
                     the tool registry in-process"
                );
            }
        }
        if let Ok(args) = std::env::var("MCP_AGENT_SERVER_ARGS") {
            config.agent.server_args = args.split_whitespace().map(str::to_string).collect();
        }

        config
    }
}

/// Parse an environment variable, ignoring it when missing or malformed.
fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring invalid value for {}: {:?}", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_agent_server_command_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_AGENT_SERVER_COMMAND", "mcp-agent-demo");
            std::env::set_var("MCP_AGENT_SERVER_ARGS", "--quiet  --fast");
        }
        let config = Config::from_env();
        assert_eq!(config.agent.server_command.as_deref(), Some("mcp-agent-demo"));
        assert_eq!(config.agent.server_args, vec!["--quiet", "--fast"]);
        unsafe {
            std::env::remove_var("MCP_AGENT_SERVER_COMMAND");
            std::env::remove_var("MCP_AGENT_SERVER_ARGS");
        }
    }

    #[test]
    fn test_agent_defaults_to_in_process() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::remove_var("MCP_AGENT_SERVER_COMMAND");
        }
        let config = Config::from_env();
        assert!(config.agent.server_command.is_none());
    }

    #[test]
    fn test_invalid_numbers_are_ignored() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_SEARCH_MAX_RESULTS", "lots");
            std::env::set_var("MCP_REDDIT_LIMIT", "7");
        }
        let config = Config::from_env();
        assert_eq!(config.tools.search_max_results, 3);
        assert_eq!(config.tools.reddit_limit, 7);
        unsafe {
            std::env::remove_var("MCP_SEARCH_MAX_RESULTS");
            std::env::remove_var("MCP_REDDIT_LIMIT");
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.server.name, "mcp-agent-demo");
        assert_eq!(config.agent.address(), "127.0.0.1:8501");
        assert_eq!(config.tools.timeout(), Duration::from_secs(15));
    }
}
