//! HTTP server hosting the agent UI.

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::handlers;
use crate::core::config::AgentConfig;
use crate::core::transport::{TransportError, TransportResult};
use crate::domains::agent::{InvocationPipeline, ToolProvider};

/// Pipeline shared by every request.
pub type SharedPipeline = Arc<InvocationPipeline<Arc<dyn ToolProvider>>>;

/// State handed to the handlers.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: SharedPipeline,
}

/// The agent UI server.
pub struct AgentUi {
    config: AgentConfig,
}

impl AgentUi {
    pub fn new(config: AgentConfig) -> Self {
        Self { config }
    }

    /// Build the axum router.
    pub fn router(pipeline: SharedPipeline) -> Router {
        Router::new()
            .route("/", get(handlers::index))
            .route("/health", get(handlers::health_check))
            .route("/api/tools", get(handlers::list_tools))
            .route("/api/route", post(handlers::route_command))
            .route("/api/invoke", post(handlers::invoke_command))
            .route("/api/call", post(handlers::call_tool))
            .layer(TraceLayer::new_for_http())
            .with_state(AppState { pipeline })
    }

    /// Bind and serve until the process exits.
    pub async fn run(self, pipeline: SharedPipeline) -> TransportResult<()> {
        let addr = self.config.address();
        let tool_count = pipeline.catalog().tools().len();
        let app = Self::router(pipeline);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!("Agent UI ready - http://{} ({} tools)", addr, tool_count);

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use crate::domains::agent::{AgentError, AgentResult, LocalToolProvider, ToolDescriptor};
    use crate::domains::tools::ToolRegistry;
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    async fn test_router() -> Router {
        let provider: Arc<dyn ToolProvider> =
            Arc::new(LocalToolProvider::new(Arc::new(Config::default())));
        let pipeline = InvocationPipeline::connect(provider).await.unwrap();
        AgentUi::router(Arc::new(pipeline))
    }

    /// Lists the registry's tools but cannot reach it for calls.
    struct UnreachableProvider;

    #[async_trait::async_trait]
    impl ToolProvider for UnreachableProvider {
        async fn list_tools(&self) -> AgentResult<Vec<ToolDescriptor>> {
            Ok(ToolRegistry::get_all_tools()
                .iter()
                .map(ToolDescriptor::from_tool)
                .collect())
        }

        async fn call_tool(
            &self,
            _: &str,
            _: serde_json::Map<String, Value>,
        ) -> AgentResult<String> {
            Err(AgentError::unavailable("call a tool", "connection reset by peer"))
        }
    }

    async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn get_text(router: Router, uri: &str) -> (StatusCode, String) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_index_page() {
        let (status, body) = get_text(test_router().await, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<html"));
    }

    #[tokio::test]
    async fn test_list_tools() {
        let (status, body) = get_text(test_router().await, "/api/tools").await;
        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_str(&body).unwrap();
        let names: Vec<_> = json["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["say_hello", "web_search", "reddit_scrape"]);
        assert_eq!(json["tools"][1]["parameters"][1]["type"], "integer");
    }

    #[tokio::test]
    async fn test_route_proposes_arguments() {
        let (status, json) = post_json(
            test_router().await,
            "/api/route",
            serde_json::json!({ "command": "search for python tutorials" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["tool"], "web_search");
        assert_eq!(json["arguments"]["query"], "python tutorials");
        assert_eq!(json["parameters"][0]["name"], "query");
    }

    #[tokio::test]
    async fn test_route_unmatched() {
        let (status, json) = post_json(
            test_router().await,
            "/api/route",
            serde_json::json!({ "command": "what's the weather" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["tool"].is_null());
        assert_eq!(
            json["message"],
            "I'm not sure which tool to use for that request. Try being more specific!"
        );
    }

    #[tokio::test]
    async fn test_invoke_with_override() {
        let (status, json) = post_json(
            test_router().await,
            "/api/invoke",
            serde_json::json!({
                "command": "say hello world",
                "arguments": { "name": "Ferris" }
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["tool"], "say_hello");
        assert_eq!(json["result"], "Hello, Ferris! Nice to meet you.");
    }

    #[tokio::test]
    async fn test_call_unknown_tool_is_404() {
        let (status, json) = post_json(
            test_router().await,
            "/api/call",
            serde_json::json!({ "tool": "weather", "arguments": {} }),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "Unknown tool: weather");
    }

    #[tokio::test]
    async fn test_call_by_hand() {
        let (status, json) = post_json(
            test_router().await,
            "/api/call",
            serde_json::json!({ "tool": "say_hello", "arguments": { "name": "Ada" } }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["result"], "Hello, Ada! Nice to meet you.");
    }

    #[tokio::test]
    async fn test_invoke_with_registry_down_is_502() {
        let provider: Arc<dyn ToolProvider> = Arc::new(UnreachableProvider);
        let pipeline = InvocationPipeline::connect(provider).await.unwrap();
        let router = AgentUi::router(Arc::new(pipeline));

        let (status, json) = post_json(
            router,
            "/api/invoke",
            serde_json::json!({ "command": "search for rust vs go" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(
            json["error"],
            "Tool registry unavailable while trying to call a tool: connection reset by peer"
        );
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_text(test_router().await, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("healthy"));
    }
}
