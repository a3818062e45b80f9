use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Failures that stop the process before it starts serving.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("{0}")]
    Configuration(String),

    #[error("failed to connect to the database: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("failed to migrate database: {0}")]
    Schema(#[source] sqlx::Error),

    #[error("failed to bind listener: {0}")]
    Bind(#[source] std::io::Error),

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Per-request failures. The message is the only thing the client sees.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(&'static str),
    NotFound(&'static str),
    Internal(&'static str),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
