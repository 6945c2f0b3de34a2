use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ErrorKind {
    InvalidParameters,
    BadRequest,
    UpstreamUnavailable,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: ErrorKind,
    pub message: String,
}

#[derive(Debug)]
pub enum AppError {
    InvalidParameters(String),
    BadRequest(String),
    UpstreamUnavailable(anyhow::Error),
}

pub const UPSTREAM_UNAVAILABLE_MESSAGE: &str = "Internal or upstream dependency error";

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::InvalidParameters(_) => ErrorKind::InvalidParameters,
            AppError::BadRequest(_) => ErrorKind::BadRequest,
            AppError::UpstreamUnavailable(_) => ErrorKind::UpstreamUnavailable,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidParameters(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = self.kind();
        let message = match self {
            AppError::InvalidParameters(msg) | AppError::BadRequest(msg) => msg,
            AppError::UpstreamUnavailable(err) => {
                tracing::error!("Internal or upstream error: {:?}", err);
                UPSTREAM_UNAVAILABLE_MESSAGE.to_string()
            }
        };

        (status, Json(ErrorResponse { error, message })).into_response()
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<validator::ValidationError> for AppError {
    fn from(error: validator::ValidationError) -> Self {
        let message = error
            .message
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_else(|| error.code.to_string());
        AppError::InvalidParameters(message)
    }
}
