//! Domains module containing business logic organized by bounded contexts.
//!
//! - **tools**: the MCP tools served by the tool server
//! - **agent**: routing, argument extraction and invocation for the front end
//!
//! The agent domain only reaches the tools through a provider; it never calls
//! a tool definition directly.

pub mod agent;
pub mod tools;
