use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mokki_surrealdb::repository::{RepositoryError, media_service::MediaError};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::auth::AuthError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Authentication required")]
    Unauthorized,
    #[error("Forbidden")]
    Forbidden,
    #[error("Resource not found")]
    NotFound,
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Request entity too large")]
    TooLarge,
    #[error("Unsupported media type")]
    UnsupportedMedia,
    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    fn to_response_parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            ApiError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "unauthorized", self.to_string())
            },
            ApiError::Forbidden => (StatusCode::FORBIDDEN, "forbidden", self.to_string()),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "not_found", self.to_string()),
            ApiError::BadRequest(_) => {
                (StatusCode::BAD_REQUEST, "bad_request", self.to_string())
            },
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "conflict", self.to_string()),
            ApiError::TooLarge => {
                (StatusCode::PAYLOAD_TOO_LARGE, "too_large", self.to_string())
            },
            ApiError::UnsupportedMedia => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, "unsupported_media", self.to_string())
            },
            ApiError::Internal => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", self.to_string())
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.to_response_parts();
        (status, Json(json!({ "error": code, "message": message }))).into_response()
    }
}

impl From<RepositoryError> for ApiError {
    fn from(repo_error: RepositoryError) -> Self {
        match repo_error {
            RepositoryError::NotFound { .. } => ApiError::NotFound,
            RepositoryError::Forbidden { .. } => ApiError::Forbidden,
            RepositoryError::Validation { field, message } => {
                ApiError::BadRequest(format!("{field}: {message}"))
            },
            RepositoryError::Conflict { message } => ApiError::Conflict(message),
            other => {
                error!("repository error: {other}");
                ApiError::Internal
            },
        }
    }
}

impl From<MediaError> for ApiError {
    fn from(media_error: MediaError) -> Self {
        match media_error {
            MediaError::NotFound => ApiError::NotFound,
            MediaError::TooLarge => ApiError::TooLarge,
            MediaError::UnsupportedFormat => ApiError::UnsupportedMedia,
            MediaError::Validation(message) => ApiError::BadRequest(message),
            MediaError::Database(message) => {
                error!("media error: {message}");
                ApiError::Internal
            },
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(auth_error: AuthError) -> Self {
        match auth_error {
            AuthError::Repository(repo_error) => repo_error.into(),
            AuthError::Jwt(message) => {
                error!("jwt error: {message}");
                ApiError::Unauthorized
            },
            _ => ApiError::Unauthorized,
        }
    }
}
