use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use vulnera_flow::FlowError;

use crate::analysis::AnalysisFailure;

/// HTTP-boundary error mapping for the intake and assessment operations
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// Operation refused in the session's current phase
    #[error("{0}")]
    Conflict(String),

    /// The single opaque provider failure; its French display text is the
    /// only detail that reaches the client
    #[error(transparent)]
    Analysis(#[from] AnalysisFailure),

    #[error("{0}")]
    Internal(String),
}

impl From<FlowError> for ApiError {
    fn from(err: FlowError) -> Self {
        match err {
            FlowError::SessionNotFound(id) => ApiError::NotFound(format!("Session not found: {id}")),
            FlowError::Storage(msg) => ApiError::Internal(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            ApiError::Analysis(failure) => (StatusCode::BAD_GATEWAY, failure.to_string()),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
