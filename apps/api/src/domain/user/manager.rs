use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use super::value_objects::{validate_password_size, validate_user_name, Email};
use crate::auth::password::{
    hash_password_task, unusable_password, verify_password, verify_password_task, PasswordError,
};
use crate::domain::errors::ValidationError;
use crate::domain::repositories::user_repository::{User, UserRepository};
use crate::domain::repositories::RepositoryError;

#[derive(Debug, Error)]
pub enum AccountError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("credential hashing failed: {0}")]
    Hashing(#[from] PasswordError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Attributes of a new account besides email and password
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl Default for NewUser {
    fn default() -> Self {
        Self {
            name: String::new(),
            is_active: true,
            is_staff: false,
            is_superuser: false,
        }
    }
}

impl NewUser {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Provisions and authenticates accounts
///
/// # Example
/// ```no_run
/// # async fn demo(users: std::sync::Arc<dyn recipe_api::domain::repositories::UserRepository>) {
/// use recipe_api::domain::user::{NewUser, UserManager};
///
/// let manager = UserManager::new(users);
/// let user = manager
///     .create_user("Cook@Example.COM", Some("secret123"), NewUser::named("Cook"))
///     .await
///     .expect("account created");
/// assert_eq!(user.email.as_str(), "Cook@example.com");
/// # }
/// ```
#[derive(Clone)]
pub struct UserManager {
    users: Arc<dyn UserRepository>,
}

impl UserManager {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Creates, saves and returns a new user
    ///
    /// # Business Rules
    /// - Email must be non-empty and at most 255 characters; its domain is
    ///   lowercased
    /// - Name is at most 255 characters
    /// - The password is at most 72 bytes and is stored only as a bcrypt hash
    /// - Without a password the account gets an unusable credential
    /// - A taken email fails with `RepositoryError::Duplicate`
    pub async fn create_user(
        &self,
        email: &str,
        password: Option<&str>,
        extra: NewUser,
    ) -> Result<User, AccountError> {
        let email = Email::new(email)?;
        validate_user_name(&extra.name)?;

        let password_hash = match password {
            Some(password) => {
                validate_password_size(password)?;
                hash_password_task(password.to_string()).await?
            }
            None => unusable_password(),
        };

        let user = User {
            id: Uuid::new_v4(),
            email,
            name: extra.name,
            password_hash,
            is_active: extra.is_active,
            is_staff: extra.is_staff,
            is_superuser: extra.is_superuser,
        };

        self.users.create(user.clone()).await?;
        tracing::info!(user_id = %user.id, staff = user.is_staff, "account created");

        Ok(user)
    }

    /// Creates a user with staff and superuser flags set
    pub async fn create_superuser(
        &self,
        email: &str,
        password: &str,
        extra: NewUser,
    ) -> Result<User, AccountError> {
        let extra = NewUser {
            is_staff: true,
            is_superuser: true,
            ..extra
        };
        self.create_user(email, Some(password), extra).await
    }

    /// Checks credentials and records the login
    ///
    /// Unknown emails, inactive accounts and wrong passwords all yield
    /// `Ok(None)`.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, AccountError> {
        let email = Email::new(email)?;

        let Some(user) = self.users.find_by_email(&email).await? else {
            return Ok(None);
        };

        if !user.is_active {
            return Ok(None);
        }
        let matches =
            verify_password_task(password.to_string(), user.password_hash.clone()).await?;
        if !matches {
            return Ok(None);
        }

        if let Err(e) = self.users.update_last_login(user.id).await {
            tracing::warn!(user_id = %user.id, error = %e, "failed to record last login");
        }

        Ok(Some(user))
    }

    /// Verifies a password against the user's stored hash
    pub fn check_password(user: &User, password: &str) -> Result<bool, AccountError> {
        Ok(verify_password(password, &user.password_hash)?)
    }
}
