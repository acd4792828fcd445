// In crates/web-server/src/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Price source error: {0}")]
    Source(#[from] api_client::SourceError),

    #[error("Pipeline error: {0}")]
    Engine(#[from] engine::EngineError),

    #[error("Failed to bind server address: {0}")]
    ServerBindError(std::io::Error),

    #[error("Server terminated: {0}")]
    Serve(std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Converts our custom `Error` into an HTTP response.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Error::Source(err) => {
                tracing::error!(error = %err, "Upstream price fetch failed.");
                (StatusCode::BAD_GATEWAY, "The upstream price source is unavailable".to_string())
            }
            Error::Engine(err) => {
                tracing::error!(error = %err, "Pipeline failed.");
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to compute the strategy series".to_string())
            }
            Error::ServerBindError(_) | Error::Serve(_) => {
                tracing::error!(error = %self, "Server error.");
                (StatusCode::INTERNAL_SERVER_ERROR, "An internal server error occurred".to_string())
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
