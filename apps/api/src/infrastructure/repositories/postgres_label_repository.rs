use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::recipe::Label;
use crate::domain::repositories::{LabelRepository, RepositoryError};

/// PostgreSQL implementation of LabelRepository
///
/// One type serves both tags and ingredients; the table comes from
/// [`Label::TABLE`].
pub struct PostgresLabelRepository<L> {
    pool: PgPool,
    _kind: PhantomData<fn() -> L>,
}

impl<L: Label> PostgresLabelRepository<L> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _kind: PhantomData,
        }
    }
}

#[derive(FromRow)]
struct LabelRow {
    id: i64,
    user_id: Uuid,
    name: String,
}

impl LabelRow {
    fn into_label<L: Label>(self) -> L {
        L::from_parts(self.id, self.user_id, self.name)
    }
}

#[async_trait]
impl<L: Label> LabelRepository<L> for PostgresLabelRepository<L> {
    async fn list(&self, owner: Uuid) -> Result<Vec<L>, RepositoryError> {
        let rows = sqlx::query_as::<_, LabelRow>(&format!(
            r#"
            SELECT id, user_id, name
            FROM {}
            WHERE user_id = $1
            ORDER BY name DESC, id DESC
            "#,
            L::TABLE
        ))
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(LabelRow::into_label).collect())
    }

    async fn find(&self, owner: Uuid, id: i64) -> Result<Option<L>, RepositoryError> {
        let row = sqlx::query_as::<_, LabelRow>(&format!(
            "SELECT id, user_id, name FROM {} WHERE id = $1 AND user_id = $2",
            L::TABLE
        ))
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(LabelRow::into_label))
    }

    async fn create(&self, owner: Uuid, name: String) -> Result<L, RepositoryError> {
        let row = sqlx::query_as::<_, LabelRow>(&format!(
            "INSERT INTO {} (user_id, name) VALUES ($1, $2) RETURNING id, user_id, name",
            L::TABLE
        ))
        .bind(owner)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_label())
    }

    async fn update(&self, owner: Uuid, id: i64, name: Option<String>) -> Result<L, RepositoryError> {
        let row = sqlx::query_as::<_, LabelRow>(&format!(
            r#"
            UPDATE {}
            SET name = COALESCE($3, name)
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, name
            "#,
            L::TABLE
        ))
        .bind(id)
        .bind(owner)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        row.map(LabelRow::into_label).ok_or(RepositoryError::NotFound(L::KIND))
    }

    async fn delete(&self, owner: Uuid, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query(&format!(
            "DELETE FROM {} WHERE id = $1 AND user_id = $2",
            L::TABLE
        ))
        .bind(id)
        .bind(owner)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(L::KIND));
        }

        Ok(())
    }
}
