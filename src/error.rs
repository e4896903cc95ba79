use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("could not build upstream request: {0}")]
    InvalidRequest(String),
}

/// Failures that never reach the upstream handling. Bad input is a 400,
/// everything else a 500.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("invalid query string: {0}")]
    InvalidQuery(String),
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            Self::InvalidQuery(_) => {
                tracing::warn!(error = %self, "request rejected");
                (StatusCode::BAD_REQUEST, "invalid_query")
            }
            Self::Fetch(_) => {
                tracing::error!(error = %self, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "server_error")
            }
        };

        let body = json!({ "error": error, "details": self.to_string() });
        (status, Json(body)).into_response()
    }
}
