use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};
use warren_redirector::RedirectorError;
use warren_shortener::ShortenerError;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("malformed request body: {0}")]
    MalformedBody(String),
    #[error(transparent)]
    Shortener(#[from] ShortenerError),
    #[error(transparent)]
    Redirector(#[from] RedirectorError),
    #[error("stored url cannot be used as a redirect target")]
    UnusableTarget,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            AppError::Shortener(ShortenerError::InvalidArgument(_)) => StatusCode::BAD_REQUEST,
            AppError::Shortener(ShortenerError::CodeAllocationFailed { .. })
            | AppError::Shortener(ShortenerError::StorageWriteFailed(_))
            | AppError::Redirector(RedirectorError::StorageReadFailed(_)) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::Shortener(ShortenerError::Encoding(_))
            | AppError::Redirector(RedirectorError::StorageCorrupted(_))
            | AppError::UnusableTarget => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, status = status.as_u16(), "request failed");
        } else {
            warn!(error = %self, status = status.as_u16(), "request rejected");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
