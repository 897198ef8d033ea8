//! Mapping of agent errors onto HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::domains::agent::AgentError;

/// An [`AgentError`] on its way to the browser.
///
/// The body is always `{"error": "<message>"}`; the message is shown verbatim.
#[derive(Debug)]
pub struct ApiError(pub AgentError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            AgentError::RegistryUnavailable { .. } => StatusCode::BAD_GATEWAY,
            AgentError::UnknownTool(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl From<AgentError> for ApiError {
    fn from(err: AgentError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!("Request failed ({}): {}", status, self.0);
        (
            status,
            Json(serde_json::json!({ "error": self.0.to_string() })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let unavailable = ApiError(AgentError::unavailable("call a tool", "broken pipe"));
        assert_eq!(unavailable.status(), StatusCode::BAD_GATEWAY);

        let unknown = ApiError::from(AgentError::unknown_tool("weather"));
        assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
    }
}
