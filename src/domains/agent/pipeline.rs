//! Invocation pipeline - router, extractor and registry call composed into one
//! user-facing action.
//!
//! A submission goes through two steps:
//!
//! 1. [`InvocationPipeline::prepare`] routes the command and proposes
//!    arguments. Nothing leaves the process.
//! 2. [`InvocationPipeline::execute`] applies the caller's overrides and makes
//!    the single registry call.
//!
//! Whatever text the registry returns is the result, success or not.

use serde::Serialize;
use tracing::{info, instrument};

use super::catalog::{ArgumentMap, ToolCatalog, ToolDescriptor};
use super::error::{AgentError, AgentResult};
use super::extractor::ArgumentExtractor;
use super::provider::ToolProvider;
use super::rules::CommandRouter;

/// Advisory shown when no routing rule matches.
pub const UNROUTABLE_MESSAGE: &str =
    "I'm not sure which tool to use for that request. Try being more specific!";

/// State of one submission between routing and execution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandContext {
    pub raw_input: String,
    pub tool_name: Option<String>,
    pub arguments: ArgumentMap,
}

impl CommandContext {
    pub fn is_routed(&self) -> bool {
        self.tool_name.is_some()
    }
}

/// Terminal state of a submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InvocationOutcome {
    /// No rule matched; the registry was not contacted.
    Unroutable { message: String },
    /// The registry answered with `text`.
    Completed {
        tool_name: String,
        arguments: ArgumentMap,
        text: String,
    },
}

impl InvocationOutcome {
    /// Text to display for this outcome.
    pub fn text(&self) -> &str {
        match self {
            Self::Unroutable { message } => message,
            Self::Completed { text, .. } => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Self::Unroutable { message } => message,
            Self::Completed { text, .. } => text,
        }
    }
}

/// Routes commands against a catalog snapshot and calls tools through a
/// provider.
pub struct InvocationPipeline<P> {
    provider: P,
    catalog: ToolCatalog,
    router: CommandRouter<'static>,
    extractor: ArgumentExtractor<'static>,
}

impl<P: ToolProvider> InvocationPipeline<P> {
    /// Fetch the catalog once and build a pipeline over it.
    ///
    /// A listing failure is returned as is; the session cannot start.
    pub async fn connect(provider: P) -> AgentResult<Self> {
        let tools = provider.list_tools().await?;
        info!("Tool catalog loaded with {} tools", tools.len());
        Ok(Self::with_catalog(provider, ToolCatalog::new(tools)))
    }

    /// Build a pipeline over an already fetched catalog.
    pub fn with_catalog(provider: P, catalog: ToolCatalog) -> Self {
        let router = CommandRouter::default();
        Self {
            provider,
            catalog,
            router,
            extractor: ArgumentExtractor::new(router),
        }
    }

    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    /// Resolve a command to a tool name.
    pub fn route(&self, command: &str) -> Option<&'static str> {
        self.router.route(command, self.catalog.names())
    }

    /// Route a command and propose its arguments.
    pub fn prepare(&self, command: &str) -> CommandContext {
        let routed = self
            .route(command)
            .and_then(|name| self.catalog.get(name));

        match routed {
            Some(descriptor) => CommandContext {
                raw_input: command.to_string(),
                tool_name: Some(descriptor.name.clone()),
                arguments: self.extractor.extract(&descriptor.parameters, command, &descriptor.name),
            },
            None => CommandContext {
                raw_input: command.to_string(),
                tool_name: None,
                arguments: ArgumentMap::new(),
            },
        }
    }

    /// Apply overrides to a prepared context and call its tool.
    ///
    /// Override values replace proposals of the same name; extra names are
    /// passed along.
    #[instrument(skip(self, context, overrides), fields(tool = ?context.tool_name))]
    pub async fn execute(
        &self,
        context: CommandContext,
        overrides: ArgumentMap,
    ) -> AgentResult<InvocationOutcome> {
        let Some(tool_name) = context.tool_name else {
            info!("No tool matched command: {:?}", context.raw_input);
            return Ok(InvocationOutcome::Unroutable {
                message: UNROUTABLE_MESSAGE.to_string(),
            });
        };

        let mut arguments = context.arguments;
        arguments.extend(overrides);

        let text = self.call(&tool_name, &arguments).await?;
        Ok(InvocationOutcome::Completed {
            tool_name,
            arguments,
            text,
        })
    }

    /// Route, extract and call with the proposed arguments unchanged.
    pub async fn invoke(&self, command: &str) -> AgentResult<String> {
        self.invoke_with(command, ArgumentMap::new())
            .await
            .map(InvocationOutcome::into_text)
    }

    /// Route, extract, apply overrides and call.
    pub async fn invoke_with(
        &self,
        command: &str,
        overrides: ArgumentMap,
    ) -> AgentResult<InvocationOutcome> {
        let context = self.prepare(command);
        self.execute(context, overrides).await
    }

    /// Call a tool directly, bypassing the router.
    pub async fn call(&self, tool_name: &str, arguments: &ArgumentMap) -> AgentResult<String> {
        let descriptor = self.descriptor(tool_name)?;
        let json_arguments = descriptor.to_json_arguments(arguments);

        info!("Calling tool {} with {} arguments", tool_name, json_arguments.len());
        self.provider.call_tool(&descriptor.name, json_arguments).await
    }

    fn descriptor(&self, tool_name: &str) -> AgentResult<&ToolDescriptor> {
        self.catalog
            .get(tool_name)
            .ok_or_else(|| AgentError::unknown_tool(tool_name))
    }
}
