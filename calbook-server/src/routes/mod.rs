pub mod events;
pub mod health;
pub mod resources;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use calbook_core::CalbookError;

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Convert errors bubbling out of handlers to HTTP responses.
///
/// Core error variants map onto the request surface's status codes; anything
/// else is an unexpected failure whose detail is logged for operators but
/// not sent to the caller.
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0.downcast_ref::<CalbookError>() {
            Some(CalbookError::Validation(_)) => (StatusCode::BAD_REQUEST, self.0.to_string()),
            Some(CalbookError::Conflict(_)) => (StatusCode::CONFLICT, self.0.to_string()),
            Some(CalbookError::NotFound(_)) => (StatusCode::NOT_FOUND, self.0.to_string()),
            Some(CalbookError::Authorization(_)) => (StatusCode::FORBIDDEN, self.0.to_string()),
            _ => {
                tracing::error!(error = ?self.0, "unexpected failure handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
