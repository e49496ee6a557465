use async_trait::async_trait;
use uuid::Uuid;

use super::RepositoryError;
use crate::domain::recipe::{Recipe, RecipeChanges, RecipeDraft};

/// Repository trait for recipes
///
/// `owner` is the caller's user id. A recipe owned by someone else behaves
/// exactly like one that does not exist.
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// All of the owner's recipes, newest (highest id) first
    async fn list(&self, owner: Uuid) -> Result<Vec<Recipe>, RepositoryError>;

    /// Find one of the owner's recipes by id
    async fn find(&self, owner: Uuid, id: i64) -> Result<Option<Recipe>, RepositoryError>;

    /// Insert a recipe owned by `owner`
    async fn create(&self, owner: Uuid, draft: RecipeDraft) -> Result<Recipe, RepositoryError>;

    /// Apply changes to one of the owner's recipes
    async fn update(
        &self,
        owner: Uuid,
        id: i64,
        changes: RecipeChanges,
    ) -> Result<Recipe, RepositoryError>;

    /// Delete one of the owner's recipes
    async fn delete(&self, owner: Uuid, id: i64) -> Result<(), RepositoryError>;
}
