//! Common utilities shared across tool definitions.
//!
//! Result constructors, argument parsing and the outbound HTTP client.

use rmcp::model::{CallToolResult, Content};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::core::config::ToolsConfig;
use crate::domains::tools::ToolError;

/// Upper bound for any caller-supplied result count.
pub const MAX_LIMIT: usize = 25;

/// Create an error result with a formatted message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Create a success result with text content.
pub fn success_result(content: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(content)])
}

/// Validate and clamp limit to allowed range (1-25).
pub fn validate_limit(limit: usize) -> usize {
    limit.clamp(1, MAX_LIMIT)
}

/// Deserialize tool arguments into a params struct.
pub fn parse_arguments<T: DeserializeOwned>(arguments: serde_json::Value) -> Result<T, ToolError> {
    let arguments = match arguments {
        serde_json::Value::Null => serde_json::Value::Object(Default::default()),
        other => other,
    };
    serde_json::from_value(arguments).map_err(|e| ToolError::invalid_arguments(e.to_string()))
}

/// Build the HTTP client used by the web-facing tools.
pub fn http_client(config: &ToolsConfig) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(config.timeout())
        .user_agent(config.user_agent.as_str())
        .build()
}

/// Concatenate the text blocks of a tool result.
pub fn result_text(result: &CallToolResult) -> String {
    result
        .content
        .iter()
        .filter_map(|c| c.as_text().map(|t| t.text.as_str()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Sample {
        name: String,
    }

    #[test]
    fn test_validate_limit() {
        assert_eq!(validate_limit(0), 1);
        assert_eq!(validate_limit(3), 3);
        assert_eq!(validate_limit(500), MAX_LIMIT);
    }

    #[test]
    fn test_parse_arguments() {
        let sample: Sample = parse_arguments(serde_json::json!({ "name": "Ada" })).unwrap();
        assert_eq!(sample.name, "Ada");

        let err = parse_arguments::<Sample>(serde_json::Value::Null).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[test]
    fn test_result_text_joins_blocks() {
        let result = CallToolResult::success(vec![Content::text("one"), Content::text("two")]);
        assert_eq!(result_text(&result), "one\ntwo");
        assert_eq!(result_text(&error_result("boom")), "boom");
    }
}
