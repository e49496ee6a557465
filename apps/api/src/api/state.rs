use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AuthSettings;
use crate::domain::recipe::{Ingredient, Label, Tag};
use crate::domain::repositories::{LabelRepository, RecipeRepository, UserRepository};
use crate::domain::user::UserManager;
use crate::infrastructure::repositories::{
    PostgresLabelRepository, PostgresRecipeRepository, PostgresUserRepository,
};

/// Dependency bundle for HTTP handlers
///
/// Handlers only see repository traits, so tests can swap in other
/// implementations.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub recipes: Arc<dyn RecipeRepository>,
    pub tags: Arc<dyn LabelRepository<Tag>>,
    pub ingredients: Arc<dyn LabelRepository<Ingredient>>,
    pub auth: Arc<AuthSettings>,
}

impl AppState {
    /// State backed by PostgreSQL repositories sharing one pool
    pub fn postgres(pool: PgPool, auth: AuthSettings) -> Self {
        Self {
            users: Arc::new(PostgresUserRepository::new(pool.clone())),
            recipes: Arc::new(PostgresRecipeRepository::new(pool.clone())),
            tags: Arc::new(PostgresLabelRepository::<Tag>::new(pool.clone())),
            ingredients: Arc::new(PostgresLabelRepository::<Ingredient>::new(pool)),
            auth: Arc::new(auth),
        }
    }

    pub fn user_manager(&self) -> UserManager {
        UserManager::new(self.users.clone())
    }
}

/// Selects the repository for one label kind
pub trait LabelStore<L: Label> {
    fn labels(&self) -> &Arc<dyn LabelRepository<L>>;
}

impl LabelStore<Tag> for AppState {
    fn labels(&self) -> &Arc<dyn LabelRepository<Tag>> {
        &self.tags
    }
}

impl LabelStore<Ingredient> for AppState {
    fn labels(&self) -> &Arc<dyn LabelRepository<Ingredient>> {
        &self.ingredients
    }
}
