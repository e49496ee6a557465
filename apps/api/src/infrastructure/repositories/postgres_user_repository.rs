use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::map_write_error;
use crate::domain::repositories::user_repository::{User, UserChanges, UserRepository};
use crate::domain::repositories::RepositoryError;
use crate::domain::user::value_objects::Email;

/// PostgreSQL implementation of UserRepository
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a new PostgresUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    name: String,
    password_hash: String,
    is_active: bool,
    is_staff: bool,
    is_superuser: bool,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        User {
            id: r.id,
            email: Email::from_persistence(r.email),
            name: r.name,
            password_hash: r.password_hash,
            is_active: r.is_active,
            is_staff: r.is_staff,
            is_superuser: r.is_superuser,
        }
    }
}

const USER_COLUMNS: &str =
    "id, email, name, password_hash, is_active, is_staff, is_superuser";

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<Uuid, RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id, email, name, password_hash, is_active, is_staff, is_superuser
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.id)
        .bind(user.email.as_str())
        .bind(&user.name)
        .bind(&user.password_hash)
        .bind(user.is_active)
        .bind(user.is_staff)
        .bind(user.is_superuser)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "user with this email"))?;

        Ok(user.id)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                password_hash = COALESCE($3, password_hash),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(changes.name)
        .bind(changes.password_hash)
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::from).ok_or(RepositoryError::NotFound("user"))
    }

    async fn update_last_login(&self, user_id: Uuid) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            UPDATE users
            SET last_login = NOW(), updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
