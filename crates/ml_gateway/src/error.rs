use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GatewayError>;

#[derive(Error, Debug)]
pub enum GatewayError {
    /// Bearer token or a required identifier is absent. No upstream call is made.
    #[error("{0}")]
    MissingCredential(String),

    /// The marketplace answered with a non-2xx status
    #[error("Marketplace returned {status}")]
    Upstream {
        status: reqwest::StatusCode,
        body: Value,
    },

    /// The outbound call itself failed (connect, timeout, decode)
    #[error("Marketplace request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::MissingCredential(_) => StatusCode::UNAUTHORIZED,
            // Upstream statuses are flattened on purpose; callers inspect the body.
            GatewayError::Upstream { .. }
            | GatewayError::Transport(_)
            | GatewayError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error = match self {
            GatewayError::Upstream { body, .. } if !body.is_null() => body,
            other => Value::String(other.to_string()),
        };
        (status, Json(json!({ "error": error }))).into_response()
    }
}
