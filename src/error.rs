//! Request-level error type.
//!
//! Handlers return `Result<T, AppError>`; server-side failures are logged and
//! answered with a generic body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::domain::pagination::PageError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("Password hashing failed")]
    PasswordHash,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<PageError> for AppError {
    fn from(err: PageError) -> Self {
        Self::NotFound(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Database(RepositoryError::Conflict(_)) => StatusCode::CONFLICT,
            Self::Database(_) | Self::Session(_) | Self::PasswordHash => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request error");
        }

        let message = match &self {
            Self::Database(RepositoryError::Conflict(msg)) => msg.clone(),
            Self::Database(_) | Self::Session(_) | Self::PasswordHash => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(status(AppError::NotFound("product".into())), StatusCode::NOT_FOUND);
        assert_eq!(status(AppError::BadRequest("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status(AppError::PasswordHash), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(status(PageError::OutOfRange(9).into()), StatusCode::NOT_FOUND);
        assert_eq!(
            status(AppError::Database(RepositoryError::Conflict("slug already exists".into()))),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(AppError::NotFound("stream 7".into()).to_string(), "Not found: stream 7");
    }
}
