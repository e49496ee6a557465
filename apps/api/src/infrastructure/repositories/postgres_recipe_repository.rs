use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::recipe::{Recipe, RecipeChanges, RecipeDraft};
use crate::domain::repositories::{RecipeRepository, RepositoryError};

/// PostgreSQL implementation of RecipeRepository
///
/// Every statement carries `user_id = $owner`, so rows of other users are
/// never read or written.
pub struct PostgresRecipeRepository {
    pool: PgPool,
}

impl PostgresRecipeRepository {
    /// Creates a new PostgresRecipeRepository
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for PostgreSQL
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct RecipeRow {
    id: i64,
    user_id: Uuid,
    title: String,
    time_minutes: i32,
    price: Decimal,
    description: String,
    image: Option<String>,
}

impl From<RecipeRow> for Recipe {
    fn from(r: RecipeRow) -> Self {
        Recipe {
            id: r.id,
            user_id: r.user_id,
            title: r.title,
            time_minutes: r.time_minutes,
            price: r.price,
            description: r.description,
            image: r.image,
        }
    }
}

const RECIPE_COLUMNS: &str = "id, user_id, title, time_minutes, price, description, image";

#[async_trait]
impl RecipeRepository for PostgresRecipeRepository {
    async fn list(&self, owner: Uuid) -> Result<Vec<Recipe>, RepositoryError> {
        let rows = sqlx::query_as::<_, RecipeRow>(&format!(
            r#"
            SELECT {RECIPE_COLUMNS}
            FROM recipes
            WHERE user_id = $1
            ORDER BY id DESC
            "#
        ))
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Recipe::from).collect())
    }

    async fn find(&self, owner: Uuid, id: i64) -> Result<Option<Recipe>, RepositoryError> {
        let row = sqlx::query_as::<_, RecipeRow>(&format!(
            r#"
            SELECT {RECIPE_COLUMNS}
            FROM recipes
            WHERE id = $1 AND user_id = $2
            "#
        ))
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Recipe::from))
    }

    async fn create(&self, owner: Uuid, draft: RecipeDraft) -> Result<Recipe, RepositoryError> {
        let row = sqlx::query_as::<_, RecipeRow>(&format!(
            r#"
            INSERT INTO recipes (user_id, title, time_minutes, price, description)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {RECIPE_COLUMNS}
            "#
        ))
        .bind(owner)
        .bind(draft.title)
        .bind(draft.time_minutes)
        .bind(draft.price)
        .bind(draft.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn update(
        &self,
        owner: Uuid,
        id: i64,
        changes: RecipeChanges,
    ) -> Result<Recipe, RepositoryError> {
        let row = sqlx::query_as::<_, RecipeRow>(&format!(
            r#"
            UPDATE recipes
            SET title = COALESCE($3, title),
                time_minutes = COALESCE($4, time_minutes),
                price = COALESCE($5, price),
                description = COALESCE($6, description)
            WHERE id = $1 AND user_id = $2
            RETURNING {RECIPE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(owner)
        .bind(changes.title)
        .bind(changes.time_minutes)
        .bind(changes.price)
        .bind(changes.description)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Recipe::from).ok_or(RepositoryError::NotFound("recipe"))
    }

    async fn delete(&self, owner: Uuid, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound("recipe"));
        }

        Ok(())
    }
}
