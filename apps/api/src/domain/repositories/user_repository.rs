use async_trait::async_trait;
use uuid::Uuid;

use super::RepositoryError;
use crate::domain::user::value_objects::Email;

/// User data for persistence
///
/// Simple struct for user CRUD operations
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: Email,
    pub name: String,
    pub password_hash: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
}

/// Changes a user may make to their own account
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub password_hash: Option<String>,
}

/// Repository trait for users
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user; fails with `Duplicate` when the email is taken
    async fn create(&self, user: User) -> Result<Uuid, RepositoryError>;

    /// Find a user by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError>;

    /// Find a user by normalized email address
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError>;

    /// Apply account changes, returning the updated user
    async fn update(&self, id: Uuid, changes: UserChanges) -> Result<User, RepositoryError>;

    /// Update user's last login timestamp
    async fn update_last_login(&self, user_id: Uuid) -> Result<(), RepositoryError>;
}
