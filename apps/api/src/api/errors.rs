use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::auth::jwt::TokenError;
use crate::domain::errors::ValidationError;
use crate::domain::repositories::RepositoryError;
use crate::domain::user::AccountError;

/// Body of every not-found response, whether the row is missing or foreign
pub const NOT_FOUND_MESSAGE: &str = "Not found.";

/// API error type with HTTP status code and message
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    /// Creates a new API error
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Creates a 400 Bad Request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Creates a 401 Unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    /// Creates a 404 Not Found error with the shared message
    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE)
    }

    /// Creates a 500 Internal Server Error
    ///
    /// The detail is logged; clients get a generic message.
    pub fn internal_server_error(detail: impl std::fmt::Display) -> Self {
        tracing::error!(error = %detail, "request failed");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::bad_request(e.to_string())
    }
}

impl From<RepositoryError> for ApiError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound(_) => Self::not_found(),
            RepositoryError::Duplicate(what) => Self::bad_request(format!("{} already exists", what)),
            other => Self::internal_server_error(other),
        }
    }
}

impl From<AccountError> for ApiError {
    fn from(e: AccountError) -> Self {
        match e {
            AccountError::Validation(e) => e.into(),
            AccountError::Repository(e) => e.into(),
            AccountError::Hashing(e) => Self::internal_server_error(e),
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(e: TokenError) -> Self {
        Self::internal_server_error(format!("failed to create token: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_not_found_hides_kind() {
        let error = ApiError::from(RepositoryError::NotFound("recipe"));
        assert_eq!(error.status, StatusCode::NOT_FOUND);
        assert_eq!(error.message, NOT_FOUND_MESSAGE);
    }

    #[test]
    fn duplicate_is_bad_request() {
        let error = ApiError::from(RepositoryError::Duplicate("user with this email"));
        assert_eq!(error.status, StatusCode::BAD_REQUEST);
        assert_eq!(error.message, "user with this email already exists");
    }

    #[test]
    fn validation_is_bad_request() {
        let error = ApiError::from(AccountError::Validation(ValidationError::new(
            "email",
            "Users must have an email address",
        )));
        assert_eq!(error.status, StatusCode::BAD_REQUEST);
        assert_eq!(error.message, "email: Users must have an email address");
    }

    #[test]
    fn internal_errors_are_generic() {
        let error = ApiError::from(RepositoryError::Corrupt("bad row".to_string()));
        assert_eq!(error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!error.message.contains("bad row"));
    }
}
