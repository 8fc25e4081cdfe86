//! Comment repository
//!
//! Handles comment listing and creation:
//! - listing distinguishes "no such review" from "no comments yet"
//! - creation checks review and author inside the insert's transaction

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use super::{DbError, Resource, ReviewRepo};
use crate::models::{NewComment, ReviewId};

/// Comment record from database
#[derive(Debug, Clone, FromRow)]
pub struct Comment {
    pub comment_id: i32,
    pub body: String,
    pub votes: i32,
    pub author: String,
    pub review_id: i32,
    pub created_at: DateTime<Utc>,
}

/// Comment repository
pub struct CommentRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CommentRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Comments on a review, newest first. Empty if the review has none.
    pub async fn list_for_review(&self, review_id: ReviewId) -> Result<Vec<Comment>, DbError> {
        if !ReviewRepo::new(self.pool).exists(review_id).await? {
            return Err(DbError::NotFound {
                resource: Resource::Review,
                id: review_id.to_string(),
            });
        }

        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT comment_id, body, votes, author, review_id, created_at
            FROM comments
            WHERE review_id = $1
            ORDER BY created_at DESC, comment_id DESC
            "#,
        )
        .bind(review_id.get())
        .fetch_all(self.pool)
        .await?;

        Ok(comments)
    }

    /// Insert a comment with zero votes and a server-side timestamp.
    pub async fn create(&self, review_id: ReviewId, comment: NewComment) -> Result<Comment, DbError> {
        let mut tx = self.pool.begin().await?;

        let (review_exists, author_exists): (bool, bool) = sqlx::query_as(
            r#"
            SELECT
                EXISTS(SELECT 1 FROM reviews WHERE review_id = $1),
                EXISTS(SELECT 1 FROM users WHERE username = $2)
            "#,
        )
        .bind(review_id.get())
        .bind(&comment.author)
        .fetch_one(&mut *tx)
        .await?;

        if !review_exists || !author_exists {
            return Err(DbError::NotFound {
                resource: Resource::ReviewOrUser,
                id: format!("{}/{}", review_id, comment.author),
            });
        }

        let created = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (author, review_id, votes, created_at, body)
            VALUES ($1, $2, 0, NOW(), $3)
            RETURNING comment_id, body, votes, author, review_id, created_at
            "#,
        )
        .bind(&comment.author)
        .bind(review_id.get())
        .bind(&comment.body)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            comment_id = created.comment_id,
            review_id = created.review_id,
            author = %created.author,
            "comment created"
        );
        Ok(created)
    }
}
