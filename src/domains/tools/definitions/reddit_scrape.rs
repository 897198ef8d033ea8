//! Subreddit scraping tool definition.
//!
//! Reads the public "hot" listing of a subreddit through Reddit's JSON
//! endpoint. No credentials are needed, only a descriptive user agent.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info, instrument};

use super::common::{error_result, http_client, parse_arguments, success_result, validate_limit};
use crate::core::config::{Config, ToolsConfig};
use crate::domains::tools::ToolError;

/// Parameters for the subreddit scraping tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RedditScrapeParams {
    /// Subreddit to read, with or without the `r/` prefix.
    #[schemars(description = "The subreddit to read (e.g. 'programming' or 'r/programming')")]
    pub subreddit: String,

    /// Maximum number of posts to return.
    #[schemars(description = "Maximum number of posts (default: 5)")]
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<ListingChild>,
}

#[derive(Debug, Deserialize)]
struct ListingChild {
    data: Post,
}

/// A post from a subreddit listing.
#[derive(Debug, Clone, Deserialize)]
pub struct Post {
    pub title: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub num_comments: u64,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub permalink: String,
}

/// Strip `r/`, `/r/` and surrounding whitespace from a subreddit name.
pub fn normalize_subreddit(raw: &str) -> &str {
    let trimmed = raw.trim().trim_start_matches('/');
    trimmed
        .strip_prefix("r/")
        .or_else(|| trimmed.strip_prefix("R/"))
        .unwrap_or(trimmed)
        .trim_matches('/')
}

/// Render posts the way clients display them.
pub fn format_posts(subreddit: &str, posts: &[Post]) -> String {
    if posts.is_empty() {
        return format!("No posts found in r/{}", subreddit);
    }

    let formatted: Vec<String> = posts
        .iter()
        .enumerate()
        .map(|(i, post)| {
            format!(
                "{}. {}\n   Score: {} | Comments: {} | by u/{}\n   Link: https://www.reddit.com{}\n",
                i + 1,
                post.title,
                post.score,
                post.num_comments,
                post.author,
                post.permalink
            )
        })
        .collect();

    format!("Hot posts in r/{}:\n\n{}", subreddit, formatted.join("\n"))
}

/// Subreddit scraping tool.
pub struct RedditScrapeTool;

impl RedditScrapeTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "reddit_scrape";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Fetch the current hot posts from a subreddit";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(subreddit = %params.subreddit))]
    pub async fn execute(params: &RedditScrapeParams, config: &ToolsConfig) -> CallToolResult {
        let subreddit = normalize_subreddit(&params.subreddit);
        if subreddit.is_empty() {
            return error_result("Error scraping subreddit: no subreddit name given");
        }

        let limit = validate_limit(params.limit.unwrap_or(config.reddit_limit));
        info!("Fetching {} hot posts from r/{}", limit, subreddit);

        match Self::fetch_posts(subreddit, limit, config).await {
            Ok(posts) => success_result(format_posts(subreddit, &posts)),
            Err(e) => {
                error!("Reddit request failed: {:?}", e);
                error_result(&format!("Error scraping r/{}: {}", subreddit, e))
            }
        }
    }

    /// Parse raw JSON arguments and execute.
    pub async fn call(
        arguments: serde_json::Value,
        config: &ToolsConfig,
    ) -> Result<CallToolResult, ToolError> {
        let params: RedditScrapeParams = parse_arguments(arguments)?;
        Ok(Self::execute(&params, config).await)
    }

    async fn fetch_posts(
        subreddit: &str,
        limit: usize,
        config: &ToolsConfig,
    ) -> reqwest::Result<Vec<Post>> {
        let url = format!(
            "{}/r/{}/hot.json",
            config.reddit_endpoint.trim_end_matches('/'),
            subreddit
        );
        let client = http_client(config)?;
        let listing: Listing = client
            .get(url)
            .query(&[("limit", limit.to_string()), ("raw_json", "1".to_string())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(listing
            .data
            .children
            .into_iter()
            .map(|child| child.data)
            .take(limit)
            .collect())
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<RedditScrapeParams>(),
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
