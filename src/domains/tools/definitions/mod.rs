//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod common;
pub mod reddit_scrape;
pub mod say_hello;
pub mod web_search;

pub use reddit_scrape::{RedditScrapeParams, RedditScrapeTool};
pub use say_hello::{SayHelloParams, SayHelloTool};
pub use web_search::{WebSearchParams, WebSearchTool};
