use axum::{
    extract::rejection::FormRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

/// Failures reported by a `UserStore` adapter.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("user {0} not found")]
    NotFound(i64),
    #[error("storage unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),
}

/// Request-level error, rendered as a status code plus a plain message.
/// Server-side failures are logged in full but answered with a fixed message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("user {0} not found")]
    NotFound(i64),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("{0}")]
    Form(#[from] FormRejection),
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("render failed: {0}")]
    Render(#[from] minijinja::Error),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => AppError::NotFound(id),
            StoreError::Unavailable(e) => AppError::StorageUnavailable(e.to_string()),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Form(rejection) => rejection.status(),
            AppError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, %status, "request failed");
        } else {
            warn!(error = %self, %status, "request rejected");
        }
        let body = match self {
            AppError::StorageUnavailable(_) => "storage unavailable".to_string(),
            AppError::Render(_) => "internal server error".to_string(),
            AppError::Form(rejection) => rejection.body_text(),
            other => other.to_string(),
        };
        (status, body).into_response()
    }
}
