use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::middleware::AuthUser;
use crate::api::state::AppState;
use crate::auth::jwt::create_token;
use crate::auth::password::hash_password_task;
use crate::domain::repositories::user_repository::{User, UserChanges};
use crate::domain::repositories::UserRepository;
use crate::domain::user::{validate_password_size, validate_user_name, Email, NewUser};

/// Shortest password accepted at registration or change
pub const MIN_PASSWORD_LEN: usize = 8;

/// Request body for user registration
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: String,
}

/// Public view of an account
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.to_string(),
            name: user.name.clone(),
        }
    }
}

/// Request body for token issuing
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub email: String,
    pub password: String,
}

/// Response from successful authentication
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Request body for updating the caller's account
#[derive(Debug, Deserialize)]
pub struct UpdateMeRequest {
    pub name: Option<String>,
    pub password: Option<String>,
}

fn check_password_length(password: &str) -> Result<(), ApiError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::bad_request(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    validate_password_size(password)?;
    Ok(())
}

/// Register a new user
///
/// POST /api/user/create/
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let email = Email::new(&req.email)?;
    if !email.is_well_formed() {
        return Err(ApiError::bad_request("Enter a valid email address"));
    }
    check_password_length(&req.password)?;
    validate_user_name(&req.name)?;

    let user = state
        .user_manager()
        .create_user(email.as_str(), Some(&req.password), NewUser::named(req.name))
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// Exchange credentials for a bearer token
///
/// POST /api/user/token/
pub async fn create_token_for_user(
    State(state): State<AppState>,
    Json(req): Json<TokenRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let user = state
        .user_manager()
        .authenticate(&req.email, &req.password)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Unable to authenticate with provided credentials"))?;

    let token = create_token(user.id, &state.auth.jwt_secret, state.auth.token_ttl_hours)?;
    tracing::info!(user_id = %user.id, "token issued");

    Ok(Json(TokenResponse { token }))
}

/// Current user's account
///
/// GET /api/user/me/
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .users
        .find_by_id(auth.id)
        .await?
        .ok_or_else(ApiError::not_found)?;

    Ok(Json(UserResponse::from(&user)))
}

/// Update the current user's name and/or password
///
/// PATCH /api/user/me/
pub async fn update_me(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateMeRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    if let Some(name) = req.name.as_deref() {
        validate_user_name(name)?;
    }

    let password_hash = match req.password {
        Some(password) => {
            check_password_length(&password)?;
            Some(
                hash_password_task(password)
                    .await
                    .map_err(ApiError::internal_server_error)?,
            )
        }
        None => None,
    };

    let user = state
        .users
        .update(
            auth.id,
            UserChanges {
                name: req.name,
                password_hash,
            },
        )
        .await?;

    Ok(Json(UserResponse::from(&user)))
}

/// Health check endpoint
///
/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}
