// Repository ports
// Every resource query takes the caller's id; there is no unscoped lookup

pub mod label_repository;
pub mod recipe_repository;
pub mod user_repository;

pub use label_repository::LabelRepository;
pub use recipe_repository::RecipeRepository;
pub use user_repository::UserRepository;

use thiserror::Error;

/// Failure of a repository operation
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The row does not exist or is not owned by the caller
    #[error("{0} not found")]
    NotFound(&'static str),

    /// A uniqueness constraint rejected the write
    #[error("{0} already exists")]
    Duplicate(&'static str),

    /// Stored data failed to map back to the domain
    #[error("corrupt row: {0}")]
    Corrupt(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
