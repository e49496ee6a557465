// Bearer token creation and verification
// HS256 JWTs carrying the user id, with a configurable lifetime

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Default token lifetime in hours
pub const DEFAULT_TTL_HOURS: i64 = 8;

/// Longest accepted token lifetime in hours (one year)
pub const MAX_TTL_HOURS: i64 = 24 * 365;

/// JWT claims structure
///
/// # Fields
/// * `sub` - Subject (user_id)
/// * `exp` - Expiry time (seconds since epoch)
/// * `iat` - Issue time (seconds since epoch)
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User ID (subject)
    pub sub: Uuid,
    /// Expiry timestamp (seconds since epoch)
    pub exp: usize,
    /// Issued-at timestamp (seconds since epoch)
    pub iat: usize,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token lifetime must be between 1 and {max} hours, got {0}", max = MAX_TTL_HOURS)]
    InvalidLifetime(i64),

    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

/// Creates a signed token for a user
///
/// # Arguments
/// * `user_id` - The user's ID to include in the token
/// * `secret` - The signing secret
/// * `ttl_hours` - Lifetime of the token, between 1 and `MAX_TTL_HOURS`
///
/// # Example
/// ```
/// use recipe_api::auth::jwt::create_token;
/// use uuid::Uuid;
///
/// let token = create_token(Uuid::new_v4(), "your-secret-key", 8).expect("valid token");
/// assert_eq!(token.split('.').count(), 3);
/// ```
pub fn create_token(user_id: Uuid, secret: &str, ttl_hours: i64) -> Result<String, TokenError> {
    if !(1..=MAX_TTL_HOURS).contains(&ttl_hours) {
        return Err(TokenError::InvalidLifetime(ttl_hours));
    }

    let now = Utc::now();
    let expiry = Duration::try_hours(ttl_hours)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or(TokenError::InvalidLifetime(ttl_hours))?;
    let claims = Claims {
        sub: user_id,
        exp: expiry.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )?)
}

/// Verifies and decodes a token
///
/// Fails for a bad signature, a malformed token or an expired one.
///
/// # Example
/// ```
/// use recipe_api::auth::jwt::{create_token, verify_token};
/// use uuid::Uuid;
///
/// let user_id = Uuid::new_v4();
/// let token = create_token(user_id, "your-secret-key", 8).unwrap();
///
/// let claims = verify_token(&token, "your-secret-key").expect("valid token");
/// assert_eq!(claims.sub, user_id);
/// ```
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, TokenError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )?;

    Ok(data.claims)
}
