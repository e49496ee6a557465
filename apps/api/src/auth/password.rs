// Password hashing utilities
// Uses bcrypt for one-way credential hashes

use bcrypt::{hash, verify, BcryptError, DEFAULT_COST};
use thiserror::Error;
use tokio::task::JoinError;
use uuid::Uuid;

/// Prefix marking a hash that can never verify
const UNUSABLE_PREFIX: char = '!';

/// bcrypt ignores input past this many bytes
pub const MAX_PASSWORD_BYTES: usize = 72;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password exceeds {} bytes", MAX_PASSWORD_BYTES)]
    TooLong,

    #[error(transparent)]
    Bcrypt(#[from] BcryptError),

    #[error("hashing task failed: {0}")]
    Task(#[from] JoinError),
}

/// Hashes a password using bcrypt
///
/// # Arguments
/// * `password` - The plaintext password to hash
///
/// # Returns
/// * `Ok(String)` - The bcrypt hash
/// * `Err(PasswordError::TooLong)` - If bcrypt would truncate the password
/// * `Err(PasswordError::Bcrypt)` - If hashing fails
///
/// # Example
/// ```
/// use recipe_api::auth::password::hash_password;
///
/// let hash = hash_password("my_password").expect("valid hash");
/// assert_ne!(hash, "my_password");
/// ```
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(PasswordError::TooLong);
    }
    Ok(hash(password, DEFAULT_COST)?)
}

/// Runs [`hash_password`] on the blocking thread pool
pub async fn hash_password_task(password: String) -> Result<String, PasswordError> {
    tokio::task::spawn_blocking(move || hash_password(&password)).await?
}

/// Returns a stored credential for accounts created without a password
///
/// The value is random per call and fails every verification.
pub fn unusable_password() -> String {
    format!("{}{}", UNUSABLE_PREFIX, Uuid::new_v4().simple())
}

/// Whether a stored credential was produced by [`unusable_password`]
pub fn is_usable(hash: &str) -> bool {
    !hash.starts_with(UNUSABLE_PREFIX)
}

/// Verifies a password against a stored hash
///
/// # Returns
/// * `Ok(true)` - The password matches
/// * `Ok(false)` - The password does not match, is longer than bcrypt
///   accepts, or the hash is unusable
/// * `Err(PasswordError)` - If the stored hash is malformed
///
/// # Example
/// ```
/// use recipe_api::auth::password::{hash_password, verify_password};
///
/// let hash = hash_password("my_password").unwrap();
/// let valid = verify_password("my_password", &hash).unwrap();
/// assert!(valid);
/// ```
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    if !is_usable(hash) || password.len() > MAX_PASSWORD_BYTES {
        return Ok(false);
    }
    Ok(verify(password, hash)?)
}

/// Runs [`verify_password`] on the blocking thread pool
pub async fn verify_password_task(password: String, hash: String) -> Result<bool, PasswordError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash)).await?
}
