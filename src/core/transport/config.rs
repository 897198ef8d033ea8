//! Transport configuration types.

use serde::{Deserialize, Serialize};

/// Which transport the tool server listens on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// Standard input/output transport (what the agent UI spawns).
    #[cfg(feature = "stdio")]
    Stdio,

    /// TCP socket transport, one MCP session per connection.
    #[cfg(feature = "tcp")]
    Tcp(SocketConfig),

    /// HTTP transport with JSON-RPC over POST.
    #[cfg(feature = "http")]
    Http(HttpConfig),
}

/// Address of a TCP listener.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocketConfig {
    /// Port number to listen on.
    pub port: u16,

    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,
}

/// HTTP transport configuration.
#[cfg(feature = "http")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Listener address.
    #[serde(flatten)]
    pub socket: SocketConfig,

    /// Path for JSON-RPC endpoint.
    #[serde(default = "default_rpc_path")]
    pub rpc_path: String,

    /// Enable CORS for browser clients.
    #[serde(default = "default_cors")]
    pub enable_cors: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

#[cfg(feature = "http")]
fn default_rpc_path() -> String {
    "/mcp".to_string()
}

#[cfg(feature = "http")]
fn default_cors() -> bool {
    true
}

impl SocketConfig {
    /// Read `MCP_{prefix}_HOST` and `MCP_{prefix}_PORT`, falling back to defaults.
    fn from_env(prefix: &str, default_port: u16) -> Self {
        let port = std::env::var(format!("MCP_{}_PORT", prefix))
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(default_port);
        let host =
            std::env::var(format!("MCP_{}_HOST", prefix)).unwrap_or_else(|_| default_host());
        Self { port, host }
    }

    /// The `host:port` string to bind.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(feature = "http")]
impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            socket: SocketConfig {
                port: 8080,
                host: default_host(),
            },
            rpc_path: default_rpc_path(),
            enable_cors: default_cors(),
        }
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        #[cfg(feature = "stdio")]
        {
            return Self::Stdio;
        }

        #[cfg(all(not(feature = "stdio"), feature = "tcp"))]
        {
            return Self::Tcp(SocketConfig::from_env("TCP", 3000));
        }

        #[cfg(all(not(feature = "stdio"), not(feature = "tcp"), feature = "http"))]
        {
            return Self::Http(HttpConfig::default());
        }

        #[cfg(not(any(feature = "stdio", feature = "tcp", feature = "http")))]
        {
            compile_error!("At least one transport feature must be enabled: stdio, tcp, or http");
        }
    }
}

impl TransportConfig {
    /// Load transport config from environment variables.
    ///
    /// `MCP_TRANSPORT` selects the transport; unknown or unset values fall
    /// back to the default for the enabled features.
    pub fn from_env() -> Self {
        let transport = std::env::var("MCP_TRANSPORT")
            .unwrap_or_default()
            .to_lowercase();

        match transport.as_str() {
            #[cfg(feature = "tcp")]
            "tcp" => Self::Tcp(SocketConfig::from_env("TCP", 3000)),
            #[cfg(feature = "http")]
            "http" => {
                let rpc_path =
                    std::env::var("MCP_HTTP_PATH").unwrap_or_else(|_| default_rpc_path());
                let enable_cors = std::env::var("MCP_HTTP_CORS")
                    .map(|v| v.to_lowercase() != "false" && v != "0")
                    .unwrap_or(true);
                Self::Http(HttpConfig {
                    socket: SocketConfig::from_env("HTTP", 8080),
                    rpc_path,
                    enable_cors,
                })
            }
            _ => Self::default(),
        }
    }

    /// Get a description of this transport for logging.
    pub fn description(&self) -> String {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => "STDIO (standard MCP mode)".to_string(),
            #[cfg(feature = "tcp")]
            Self::Tcp(cfg) => format!("TCP on {}", cfg.address()),
            #[cfg(feature = "http")]
            Self::Http(cfg) => format!("HTTP on {}{}", cfg.socket.address(), cfg.rpc_path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_address() {
        let socket = SocketConfig {
            port: 4000,
            host: "0.0.0.0".to_string(),
        };
        assert_eq!(socket.address(), "0.0.0.0:4000");
    }

    #[cfg(feature = "stdio")]
    #[test]
    fn test_default_is_stdio() {
        assert!(matches!(TransportConfig::default(), TransportConfig::Stdio));
        assert_eq!(
            TransportConfig::default().description(),
            "STDIO (standard MCP mode)"
        );
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_config_deserializes_flat() {
        let config: TransportConfig =
            serde_json::from_str(r#"{ "type": "http", "port": 9000 }"#).unwrap();
        match config {
            TransportConfig::Http(http) => {
                assert_eq!(http.socket.address(), "127.0.0.1:9000");
                assert_eq!(http.rpc_path, "/mcp");
                assert!(http.enable_cors);
            }
            #[allow(unreachable_patterns)]
            _ => panic!("expected http transport"),
        }
    }
}
