use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::{error, warn};

use crate::client::CallError;

/// Terminal failure of a gateway request.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Body rejected before any store call was made.
    #[error("{0}")]
    Validation(String),
    #[error("User not found")]
    NotFound,
    #[error(transparent)]
    Transport(#[from] CallError),
}

impl From<JsonRejection> for GatewayError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.to_string();
        match &self {
            Self::Transport(_) => error!(error = %detail, "record store call failed"),
            Self::Validation(_) => warn!(error = %detail, "invalid request body"),
            Self::NotFound => {}
        }
        (status, Json(serde_json::json!({"detail": detail}))).into_response()
    }
}
