//! Agent domain - the keyword-routed front end's logic.
//!
//! Free text goes through three pieces:
//!
//! - `rules.rs` - ordered keyword table mapping a command to one tool
//! - `extractor.rs` - name-keyed heuristics proposing argument values
//! - `pipeline.rs` - routing, extraction and the registry call composed
//!
//! The registry itself sits behind the [`ToolProvider`] trait (`provider.rs`),
//! and its tool metadata is held in a [`ToolCatalog`] (`catalog.rs`) fetched
//! once per session.

pub mod catalog;
mod error;
pub mod extractor;
pub mod pipeline;
pub mod provider;
pub mod rules;

pub use catalog::{ArgumentMap, DeclaredType, ParameterSpec, ToolCatalog, ToolDescriptor};
pub use error::{AgentError, AgentResult};
pub use extractor::ArgumentExtractor;
pub use pipeline::{CommandContext, InvocationOutcome, InvocationPipeline, UNROUTABLE_MESSAGE};
pub use provider::{LocalToolProvider, ProcessToolProvider, ToolProvider, provider_from_config};
pub use rules::{BUILTIN_RULES, CommandRouter, RouteMatch, RoutingRule, route};
