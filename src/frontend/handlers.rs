//! Request handlers for the agent UI.

use axum::{
    Json,
    extract::State,
    response::{Html, IntoResponse},
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::error::ApiError;
use super::server::AppState;
use crate::domains::agent::{ArgumentMap, InvocationOutcome, ParameterSpec, ToolDescriptor};

const INDEX_HTML: &str = include_str!("assets/index.html");

/// Body of `POST /api/route`.
#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    pub command: String,
}

/// Body of `POST /api/invoke`.
#[derive(Debug, Deserialize)]
pub struct InvokeRequest {
    pub command: String,
    /// Values typed over the proposals.
    #[serde(default)]
    pub arguments: ArgumentMap,
}

/// Body of `POST /api/call`.
#[derive(Debug, Deserialize)]
pub struct CallRequest {
    pub tool: String,
    #[serde(default)]
    pub arguments: ArgumentMap,
}

#[derive(Debug, Serialize)]
struct RouteResponse<'a> {
    tool: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    arguments: ArgumentMap,
    parameters: &'a [ParameterSpec],
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub(super) struct ToolResponse {
    tool: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    arguments: Option<ArgumentMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

pub(super) async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub(super) async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// The catalog snapshot taken at start-up.
pub(super) async fn list_tools(State(state): State<AppState>) -> impl IntoResponse {
    let tools: &[ToolDescriptor] = state.pipeline.catalog().tools();
    Json(serde_json::json!({ "tools": tools }))
}

/// Route a command and propose arguments; nothing is executed.
#[instrument(skip_all)]
pub(super) async fn route_command(
    State(state): State<AppState>,
    Json(request): Json<RouteRequest>,
) -> impl IntoResponse {
    let pipeline = &state.pipeline;
    let context = pipeline.prepare(&request.command);

    let descriptor = context
        .tool_name
        .as_deref()
        .and_then(|name| pipeline.catalog().get(name));

    let body = match descriptor {
        Some(descriptor) => RouteResponse {
            tool: Some(&descriptor.name),
            description: Some(&descriptor.description),
            arguments: context.arguments,
            parameters: &descriptor.parameters,
            message: None,
        },
        None => RouteResponse {
            tool: None,
            description: None,
            arguments: ArgumentMap::new(),
            parameters: &[],
            message: Some(crate::domains::agent::UNROUTABLE_MESSAGE),
        },
    };

    info!(tool = ?body.tool, "Routed command");
    Json(serde_json::json!(body))
}

/// Route, apply the submitted overrides and call the tool.
#[instrument(skip_all)]
pub(super) async fn invoke_command(
    State(state): State<AppState>,
    Json(request): Json<InvokeRequest>,
) -> Result<Json<ToolResponse>, ApiError> {
    let outcome = state
        .pipeline
        .invoke_with(&request.command, request.arguments)
        .await?;

    let body = match outcome {
        InvocationOutcome::Unroutable { message } => ToolResponse {
            tool: None,
            arguments: None,
            result: None,
            message: Some(message),
        },
        InvocationOutcome::Completed {
            tool_name,
            arguments,
            text,
        } => ToolResponse {
            tool: Some(tool_name),
            arguments: Some(arguments),
            result: Some(text),
            message: None,
        },
    };
    Ok(Json(body))
}

/// Call a tool picked by hand.
#[instrument(skip_all)]
pub(super) async fn call_tool(
    State(state): State<AppState>,
    Json(request): Json<CallRequest>,
) -> Result<Json<ToolResponse>, ApiError> {
    info!("Manual call: {}", request.tool);
    let text = state
        .pipeline
        .call(&request.tool, &request.arguments)
        .await?;

    Ok(Json(ToolResponse {
        tool: Some(request.tool),
        arguments: None,
        result: Some(text),
        message: None,
    }))
}
