use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

pub const UNKNOWN_STATUS: &str = "Unknown status";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider call failed or produced no text. `details` and `status`
    /// carry the provider's own message and status.
    #[error("Generation error: {details} ({status})")]
    Generation { details: String, status: String },

    /// Client-side failure: transport, undecodable body, or non-2xx reply.
    #[error("{0}")]
    Request(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

impl Error {
    pub fn generation(details: impl Into<String>, status: impl Into<String>) -> Self {
        Error::Generation {
            details: details.into(),
            status: status.into(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            Error::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": msg })),
            Error::Generation { details, status } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": "Error during quiz generation",
                    "details": details,
                    "status": status,
                }),
            ),
            Error::Request(details) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Failed to process request", "details": details }),
            ),
            Error::Validation(err) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Failed to process request", "details": err.to_string() }),
            ),
            Error::Reqwest(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": "Failed to process request",
                    "details": err.to_string(),
                    "status": err.status().map(|s| s.to_string()).unwrap_or_else(|| UNKNOWN_STATUS.to_string()),
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
