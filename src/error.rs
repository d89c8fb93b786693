//! Error types for the application

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Failures obtaining a pixel buffer for an image source
///
/// Raised before the palette core runs; the core itself never fails.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Nothing to decode: missing file, 404 response, empty body
    #[error("Source image absent: {0}")]
    Absent(String),

    /// Bytes or buffer present but not usable as an image
    #[error("Source image unusable: {0}")]
    Unusable(String),

    /// Network or IO failure while fetching
    #[error("Failed to fetch source image: {0}")]
    Fetch(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(e: reqwest::Error) -> Self {
        SourceError::Fetch(e.to_string())
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Source(SourceError::Absent(_)) => StatusCode::NOT_FOUND,
            AppError::Source(SourceError::Unusable(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Source(SourceError::Fetch(_)) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON error body; `code` mirrors the HTTP status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub code: u16,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::warn!("{}", self);
        }

        let body = ErrorBody {
            code: status.as_u16(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::BadRequest("x".into()), 400),
            (AppError::Forbidden("x".into()), 403),
            (SourceError::Absent("x".into()).into(), 404),
            (SourceError::Unusable("x".into()).into(), 422),
            (SourceError::Fetch("x".into()).into(), 502),
            (AppError::Internal("x".into()), 500),
        ];

        for (error, code) in cases {
            assert_eq!(error.status().as_u16(), code, "{}", error);
        }
    }

    #[test]
    fn test_source_messages() {
        let error = AppError::from(SourceError::Absent("no such file".into()));
        assert_eq!(error.to_string(), "Source image absent: no such file");
    }
}
