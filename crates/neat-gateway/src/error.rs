//! Request errors and their plain-text responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use neat_core::{CoreError, FeedError, StoreError};

use crate::render::RenderError;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed or invalid input. The message is shown to the caller.
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("invalid password")]
    Forbidden,

    #[error("not found")]
    NotFound,

    #[error("invalid method")]
    InvalidMethod,

    #[error("render failed: {0}")]
    Render(#[from] RenderError),

    #[error("internal error: {0}")]
    Internal(StoreError),

    /// The store failed to parse. The server is shutting down.
    #[error("corrupt store: {0}")]
    CorruptStore(StoreError),
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        let message = match err {
            CoreError::MissingField(_) => "Please enter stuff in the form",
            CoreError::InvalidReleaseHours(_) => "Release hour isn't a positive number",
            CoreError::ReleaseOutOfRange(_) => "Release hour is too far in the future",
        };
        AppError::BadRequest(message.to_string())
    }
}

impl From<FeedError> for AppError {
    fn from(err: FeedError) -> Self {
        match err {
            FeedError::Invalid(err) => err.into(),
            FeedError::Store(err @ StoreError::Corrupt(_)) => AppError::CorruptStore(err),
            FeedError::Store(err) => AppError::Internal(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            Self::Forbidden => (StatusCode::FORBIDDEN, "Invalid password".to_string()),
            Self::NotFound => (StatusCode::NOT_FOUND, "404 Page Not Found".to_string()),
            Self::InvalidMethod => (StatusCode::BAD_REQUEST, "Invalid Method".to_string()),
            Self::Render(err) => {
                tracing::error!(error = %err, "shorts page render failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Couldn't render template".to_string(),
                )
            }
            Self::Internal(err) => {
                tracing::error!(error = %err, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error".to_string(),
                )
            }
            Self::CorruptStore(err) => {
                tracing::error!(error = %err, "refusing to serve from a corrupt store");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error".to_string(),
                )
            }
        };

        (status, body).into_response()
    }
}
