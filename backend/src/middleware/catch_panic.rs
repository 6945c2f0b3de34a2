use std::any::Any;

use axum::response::{IntoResponse, Response};

use crate::error::AppError;

/// Turns a panic inside a handler into the generic 503 error body.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::UpstreamUnavailable(anyhow::anyhow!("handler panicked: {}", detail)).into_response()
}
