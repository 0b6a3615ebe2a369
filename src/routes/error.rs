//! Route-level error type rendered as a JSON `{ "error": ... }` body.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use models::api::ErrorBody;

use crate::backend::BackendError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The caller sent something unusable; the message is shown to the user.
    #[error("{0}")]
    BadRequest(String),

    #[error("não autenticado")]
    Unauthorized,

    /// The managed backend failed or is unreachable.
    #[error("{0}")]
    Upstream(String),
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<BackendError> for ApiError {
    fn from(err: BackendError) -> Self {
        if err.is_unauthorized() {
            Self::Unauthorized
        } else if err.is_client_error() {
            Self::BadRequest(err.user_message())
        } else {
            Self::Upstream(err.user_message())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
