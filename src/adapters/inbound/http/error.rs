use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use super::{dto::ErrorResponseDto, router::API_ENDPOINTS};
use crate::domain::errors::ValidationError;

/// Errors the API reports with a non-2xx status.
///
/// Storage backend failures are deliberately absent: they are answered with a
/// fallback envelope instead.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    MalformedBody(String),

    #[error("Endpoint not found")]
    NotFound { path: String },
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::MalformedBody(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let mut body = ErrorResponseDto::new(self.to_string());
        if let ApiError::NotFound { path } = self {
            body.path = Some(path);
            body.available_endpoints =
                Some(API_ENDPOINTS.iter().map(|e| e.to_string()).collect());
        }
        (status, Json(body)).into_response()
    }
}
