//! Browser front end for the tool registry.
//!
//! Serves a single HTML page plus a small JSON API over the
//! [`InvocationPipeline`](crate::domains::agent::InvocationPipeline):
//!
//! | Method | Path          | Purpose                                   |
//! |--------|---------------|-------------------------------------------|
//! | GET    | `/`           | the page                                  |
//! | GET    | `/api/tools`  | catalog snapshot                          |
//! | POST   | `/api/route`  | route a command and propose arguments     |
//! | POST   | `/api/invoke` | route, apply overrides and call           |
//! | POST   | `/api/call`   | call a tool picked by hand                |
//! | GET    | `/health`     | liveness                                  |

mod error;
mod handlers;
mod server;

pub use error::ApiError;
pub use handlers::{CallRequest, InvokeRequest, RouteRequest};
pub use server::{AgentUi, AppState, SharedPipeline};
