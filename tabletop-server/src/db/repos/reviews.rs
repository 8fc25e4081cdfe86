//! Review repository
//!
//! Handles the review listing with:
//! - ORDER BY assembled only from `SortColumn`/`SortOrder` static fragments
//! - category bound as a parameter
//! - comment counts from a LEFT JOIN (no N+1)

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use super::{CategoryRepo, DbError, Resource};
use crate::models::{ReviewId, ReviewQuery};

const SELECT_WITH_COUNT: &str = r#"
    SELECT
        r.review_id,
        r.title,
        r.review_body,
        r.designer,
        r.review_img_url,
        r.votes,
        r.category,
        r.owner,
        r.created_at,
        COUNT(c.comment_id) AS comment_count
    FROM reviews r
    LEFT JOIN comments c ON c.review_id = r.review_id
"#;

/// Review record from database
#[derive(Debug, Clone, FromRow)]
pub struct Review {
    pub review_id: i32,
    pub title: String,
    pub review_body: String,
    pub designer: String,
    pub review_img_url: String,
    pub votes: i32,
    pub category: String,
    pub owner: String,
    pub created_at: DateTime<Utc>,
}

/// Review with its derived comment count
#[derive(Debug, Clone, FromRow)]
pub struct ReviewWithCount {
    #[sqlx(flatten)]
    pub review: Review,
    pub comment_count: i64,
}

/// Review repository
pub struct ReviewRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ReviewRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List reviews, optionally filtered by category, in the requested order.
    ///
    /// An unknown category is `NotFound`; a known one with no reviews is an
    /// empty list. Ties on the sort column fall back to `review_id` in the
    /// same direction so the output is stable.
    pub async fn list(&self, query: &ReviewQuery) -> Result<Vec<ReviewWithCount>, DbError> {
        if let Some(category) = &query.category {
            if !category.is_allow_listed()
                && !CategoryRepo::new(self.pool).exists(category.as_str()).await?
            {
                return Err(DbError::NotFound {
                    resource: Resource::Category,
                    id: category.as_str().to_owned(),
                });
            }
        }

        tracing::debug!(
            sort_by = %query.sort_by,
            order = %query.order,
            category = query.category.as_ref().map(|c| c.as_str()),
            "listing reviews"
        );

        let mut builder = QueryBuilder::<Postgres>::new(SELECT_WITH_COUNT);

        if let Some(category) = &query.category {
            builder.push(" WHERE r.category = ");
            builder.push_bind(category.as_str());
        }

        builder
            .push(" GROUP BY r.review_id ORDER BY ")
            .push(query.sort_by.column())
            .push(" ")
            .push(query.order.as_sql())
            .push(", r.review_id ")
            .push(query.order.as_sql());

        let reviews = builder
            .build_query_as::<ReviewWithCount>()
            .fetch_all(self.pool)
            .await?;

        Ok(reviews)
    }

    /// Get a single review with its comment count.
    pub async fn get(&self, id: ReviewId) -> Result<ReviewWithCount, DbError> {
        let sql = format!("{SELECT_WITH_COUNT} WHERE r.review_id = $1 GROUP BY r.review_id");

        sqlx::query_as::<_, ReviewWithCount>(&sql)
            .bind(id.get())
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Add `delta` to the vote counter in one statement.
    ///
    /// Concurrent adjustments cannot lose updates: the increment happens in
    /// the UPDATE itself. Totals may go negative.
    pub async fn adjust_votes(&self, id: ReviewId, delta: i32) -> Result<Review, DbError> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            UPDATE reviews
            SET votes = votes + $1
            WHERE review_id = $2
            RETURNING review_id, title, review_body, designer, review_img_url,
                      votes, category, owner, created_at
            "#,
        )
        .bind(delta)
        .bind(id.get())
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| not_found(id))?;

        tracing::info!(review_id = review.review_id, delta, votes = review.votes, "votes adjusted");
        Ok(review)
    }

    pub async fn exists(&self, id: ReviewId) -> Result<bool, DbError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM reviews WHERE review_id = $1)")
                .bind(id.get())
                .fetch_one(self.pool)
                .await?;

        Ok(exists)
    }
}

fn not_found(id: ReviewId) -> DbError {
    DbError::NotFound {
        resource: Resource::Review,
        id: id.to_string(),
    }
}
