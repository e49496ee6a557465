use async_trait::async_trait;
use uuid::Uuid;

use super::RepositoryError;
use crate::domain::recipe::Label;

/// Repository trait for tags and ingredients
///
/// Same ownership rule as recipes: every call is scoped to `owner`.
#[async_trait]
pub trait LabelRepository<L: Label>: Send + Sync {
    /// All of the owner's labels, ordered by name descending
    async fn list(&self, owner: Uuid) -> Result<Vec<L>, RepositoryError>;

    /// Find one of the owner's labels by id
    async fn find(&self, owner: Uuid, id: i64) -> Result<Option<L>, RepositoryError>;

    /// Insert a label owned by `owner`
    async fn create(&self, owner: Uuid, name: String) -> Result<L, RepositoryError>;

    /// Rename one of the owner's labels; `None` keeps the current name
    async fn update(&self, owner: Uuid, id: i64, name: Option<String>) -> Result<L, RepositoryError>;

    /// Delete one of the owner's labels
    async fn delete(&self, owner: Uuid, id: i64) -> Result<(), RepositoryError>;
}
