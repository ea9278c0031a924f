/// Server error types
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use club_core::ClubError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Authorization failed: {0}")]
    Unauthorized(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(ClubError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

impl From<ClubError> for ServerError {
    fn from(err: ClubError) -> Self {
        match err {
            ClubError::InvalidInput(msg) | ClubError::Duplicate(msg) => ServerError::BadRequest(msg),
            ClubError::NotFound { entity, .. } => {
                ServerError::NotFound(format!("{} not found", entity))
            }
            ClubError::PermissionDenied(msg) => ServerError::Unauthorized(msg),
            other => ServerError::Database(other),
        }
    }
}

impl From<club_storage::StorageError> for ServerError {
    fn from(err: club_storage::StorageError) -> Self {
        ServerError::Database(err.into())
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ServerError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg),
            ServerError::Unauthorized(msg) => (StatusCode::FORBIDDEN, msg),
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ServerError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                )
            }
            ServerError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ServerError::Jwt(ref e) => {
                tracing::warn!("JWT error: {:?}", e);
                (StatusCode::UNAUTHORIZED, "Invalid token".to_string())
            }
            ServerError::Bcrypt(ref e) => {
                tracing::error!("Bcrypt error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Password error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: ClubError) -> StatusCode {
        ServerError::from(err).into_response().status()
    }

    #[test]
    fn domain_errors_map_to_status_codes() {
        assert_eq!(
            status_of(ClubError::invalid_input("Score must be between 0.0 and 10.0")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ClubError::duplicate("taken")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ClubError::not_found("Album", "abc")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(ClubError::permission_denied("not yours")),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(ClubError::Database("disk I/O error".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
