use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::auth::jwt::verify_token;
use crate::domain::repositories::UserRepository;

/// Bearer token extractor for protected routes
///
/// Resolves the caller to an existing, active user. Every failure is a 401.
///
/// Usage:
/// ```rust,ignore
/// async fn protected_handler(user: AuthUser) -> Result<String, ApiError> {
///     Ok(format!("Hello user {}", user.id))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: Uuid,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("Missing authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                ApiError::unauthorized("Invalid authorization format. Use: Bearer <token>")
            })?;

        let claims = verify_token(token, &state.auth.jwt_secret)
            .map_err(|e| ApiError::unauthorized(format!("Invalid token: {}", e)))?;

        // Tokens outlive accounts; the user must still exist and be active
        let user = state
            .users
            .find_by_id(claims.sub)
            .await
            .map_err(ApiError::internal_server_error)?
            .filter(|user| user.is_active)
            .ok_or_else(|| ApiError::unauthorized("User inactive or deleted"))?;

        Ok(AuthUser { id: user.id })
    }
}
