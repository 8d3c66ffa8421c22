//! Error types for the server crate.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use keyseal_core::ConfigError;
use keyseal_credentials::IssueError;
use keyseal_store::StoreError;
use thiserror::Error;

/// Errors that can occur while starting or serving.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Issuance failed. Reported to clients as a generic internal error.
    #[error("failed to issue credential: {0}")]
    Issue(#[from] IssueError),

    #[error("failed to start server: {0}")]
    StartupFailed(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");

        let body = match &self {
            ServerError::Issue(_) => "failed to issue credential",
            _ => "internal error",
        };
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_error_is_internal_and_opaque() {
        let err = ServerError::Issue(IssueError::TaskAborted("panicked".to_string()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
