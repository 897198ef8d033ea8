//! Greeting tool definition.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::common::{parse_arguments, success_result};
use crate::domains::tools::ToolError;

/// Parameters for the greeting tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SayHelloParams {
    /// The person's name to greet.
    #[schemars(description = "The person's name to greet")]
    pub name: String,
}

/// Say hello to someone.
pub struct SayHelloTool;

impl SayHelloTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "say_hello";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Say hello to someone";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(name = %params.name))]
    pub fn execute(params: &SayHelloParams) -> CallToolResult {
        info!("Greeting {}", params.name);
        success_result(format!("Hello, {}! Nice to meet you.", params.name))
    }

    /// Parse raw JSON arguments and execute.
    pub fn call(arguments: serde_json::Value) -> Result<CallToolResult, ToolError> {
        let params: SayHelloParams = parse_arguments(arguments)?;
        Ok(Self::execute(&params))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SayHelloParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>() -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            async move { Self::call(serde_json::Value::Object(args)).map_err(McpError::from) }
                .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::result_text;

    #[test]
    fn test_say_hello() {
        let result = SayHelloTool::call(serde_json::json!({ "name": "world" })).unwrap();
        assert_eq!(result.is_error, Some(false));
        assert_eq!(result_text(&result), "Hello, world! Nice to meet you.");
    }

    #[test]
    fn test_say_hello_requires_name() {
        let err = SayHelloTool::call(serde_json::json!({})).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[test]
    fn test_schema_lists_name() {
        let tool = SayHelloTool::to_tool();
        let properties = tool.input_schema.get("properties").unwrap();
        assert!(properties.get("name").is_some());
    }
}
