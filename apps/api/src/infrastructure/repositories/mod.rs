// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod postgres_label_repository;
pub mod postgres_recipe_repository;
pub mod postgres_user_repository;

pub use postgres_label_repository::PostgresLabelRepository;
pub use postgres_recipe_repository::PostgresRecipeRepository;
pub use postgres_user_repository::PostgresUserRepository;

use crate::domain::repositories::RepositoryError;

/// Maps a unique-constraint violation to `Duplicate`, anything else to `Database`
pub(crate) fn map_write_error(e: sqlx::Error, what: &'static str) -> RepositoryError {
    match e.as_database_error() {
        Some(db) if db.is_unique_violation() => RepositoryError::Duplicate(what),
        _ => RepositoryError::Database(e),
    }
}
