//! Category repository

use sqlx::{FromRow, PgPool};

use super::DbError;

/// Category record from database
#[derive(Debug, Clone, FromRow)]
pub struct Category {
    pub slug: String,
    pub description: String,
}

/// Category repository
pub struct CategoryRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All categories. No filtering or pagination.
    pub async fn list(&self) -> Result<Vec<Category>, DbError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT slug, description FROM categories ORDER BY slug",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(categories)
    }

    pub async fn exists(&self, slug: &str) -> Result<bool, DbError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM categories WHERE slug = $1)")
                .bind(slug)
                .fetch_one(self.pool)
                .await?;

        Ok(exists)
    }
}
