//! Web search tool definition.
//!
//! Fetches DuckDuckGo's HTML results page and formats the top organic hits
//! as a numbered list. Any failure is reported as result text.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use reqwest::Url;
use schemars::JsonSchema;
use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info, instrument};

use super::common::{error_result, http_client, parse_arguments, success_result, validate_limit};
use crate::core::config::{Config, ToolsConfig};
use crate::domains::tools::ToolError;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the web search tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct WebSearchParams {
    /// The search query to look up.
    #[schemars(description = "The search query to look up")]
    pub query: String,

    /// Maximum number of results to return.
    #[schemars(description = "Maximum number of results (default: 3)")]
    #[serde(default)]
    pub max_results: Option<usize>,
}

// ============================================================================
// Upstream results page
// ============================================================================

#[derive(Debug, thiserror::Error)]
enum SearchError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("invalid result selector `{0}`")]
    Selector(&'static str),
}

/// A single formatted search hit.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub title: String,
    pub snippet: String,
    pub link: String,
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

fn selector(css: &'static str) -> Result<Selector, SearchError> {
    Selector::parse(css).map_err(|_| SearchError::Selector(css))
}

/// Visible text of an element with whitespace collapsed.
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Unwrap DuckDuckGo's `/l/?uddg=` redirect into the target URL.
fn resolve_link(href: &str) -> String {
    let absolute = if href.starts_with("//") {
        format!("https:{}", href)
    } else {
        href.to_string()
    };

    match Url::parse(&absolute) {
        Ok(url) if url.path() == "/l/" => url
            .query_pairs()
            .find(|(key, _)| key == "uddg")
            .map(|(_, target)| target.into_owned())
            .unwrap_or(absolute),
        _ => absolute,
    }
}

/// Extract organic hits from the HTML results page, skipping ads.
fn parse_results(html: &str, max_results: usize) -> Result<Vec<SearchHit>, SearchError> {
    let result_selector = selector("div.result")?;
    let title_selector = selector("a.result__a")?;
    let snippet_selector = selector(".result__snippet")?;

    let document = Html::parse_document(html);
    let hits = document
        .select(&result_selector)
        .filter(|result| !result.value().classes().any(|class| class == "result--ad"))
        .filter_map(|result| {
            let anchor = result.select(&title_selector).next()?;
            let snippet = result
                .select(&snippet_selector)
                .next()
                .map(element_text)
                .unwrap_or_default();
            let link = anchor
                .value()
                .attr("href")
                .map(resolve_link)
                .unwrap_or_default();

            Some(SearchHit {
                title: or_placeholder(&element_text(anchor), "No title"),
                snippet: or_placeholder(&snippet, "No description"),
                link: or_placeholder(&link, "No link"),
            })
        })
        .take(max_results)
        .collect();

    Ok(hits)
}

/// Render hits the way clients display them.
pub fn format_results(query: &str, hits: &[SearchHit]) -> String {
    if hits.is_empty() {
        return format!("No results found for '{}'", query);
    }

    let formatted: Vec<String> = hits
        .iter()
        .enumerate()
        .map(|(i, hit)| {
            format!(
                "{}. {}\n   {}\n   Link: {}\n",
                i + 1,
                hit.title,
                hit.snippet,
                hit.link
            )
        })
        .collect();

    format!("Search results for '{}':\n\n{}", query, formatted.join("\n"))
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Web search tool.
pub struct WebSearchTool;

impl WebSearchTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "web_search";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Search the web for information";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(query = %params.query))]
    pub async fn execute(params: &WebSearchParams, config: &ToolsConfig) -> CallToolResult {
        let max_results = validate_limit(params.max_results.unwrap_or(config.search_max_results));
        info!("Searching the web (max {} results)", max_results);

        match Self::search(&params.query, max_results, config).await {
            Ok(hits) => success_result(format_results(&params.query, &hits)),
            Err(e) => {
                error!("Web search failed: {:?}", e);
                error_result(&format!("Error performing web search: {}", e))
            }
        }
    }

    /// Parse raw JSON arguments and execute.
    pub async fn call(
        arguments: serde_json::Value,
        config: &ToolsConfig,
    ) -> Result<CallToolResult, ToolError> {
        let params: WebSearchParams = parse_arguments(arguments)?;
        Ok(Self::execute(&params, config).await)
    }

    async fn search(
        query: &str,
        max_results: usize,
        config: &ToolsConfig,
    ) -> Result<Vec<SearchHit>, SearchError> {
        let client = http_client(config)?;
        let page = client
            .get(&config.search_endpoint)
            .query(&[("q", query)])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        parse_results(&page, max_results)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<WebSearchParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let config = config.clone();
            async move {
                Self::call(serde_json::Value::Object(args), &config.tools)
                    .await
                    .map_err(McpError::from)
            }
            .boxed()
        })
    }
}
