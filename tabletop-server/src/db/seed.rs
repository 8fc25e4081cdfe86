//! Fixture loading
//!
//! A seed directory holds `categories.json`, `users.json`, `reviews.json` and
//! `comments.json`, each a JSON array. Seeding drops and recreates every table,
//! then bulk-inserts in foreign-key order inside one transaction.
//!
//! Reviews are numbered from 1 in file order, and comments refer to reviews by
//! that number.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::schema::{self, DEFAULT_REVIEW_IMG_URL};

#[derive(Debug, Clone, Deserialize)]
pub struct CategorySeed {
    pub slug: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserSeed {
    pub username: String,
    pub avatar_url: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewSeed {
    pub title: String,
    pub review_body: String,
    pub designer: String,
    pub review_img_url: Option<String>,
    pub votes: Option<i32>,
    pub category: String,
    pub owner: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentSeed {
    pub author: String,
    pub review_id: i32,
    pub votes: Option<i32>,
    pub created_at: Option<DateTime<Utc>>,
    pub body: String,
}

/// Complete fixture set
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub categories: Vec<CategorySeed>,
    pub users: Vec<UserSeed>,
    pub reviews: Vec<ReviewSeed>,
    pub comments: Vec<CommentSeed>,
}

/// Row counts written by [`seed`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SeedSummary {
    pub categories: u64,
    pub users: u64,
    pub reviews: u64,
    pub comments: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid fixture {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl SeedData {
    /// Read the four fixture files from `dir`.
    pub fn load_dir(dir: &Path) -> Result<Self, SeedError> {
        Ok(Self {
            categories: read_fixture(&dir.join("categories.json"))?,
            users: read_fixture(&dir.join("users.json"))?,
            reviews: read_fixture(&dir.join("reviews.json"))?,
            comments: read_fixture(&dir.join("comments.json"))?,
        })
    }
}

fn read_fixture<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, SeedError> {
    let content = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_owned(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| SeedError::Json {
        path: path.to_owned(),
        source,
    })
}

/// Replace all data with `data`.
pub async fn seed(pool: &PgPool, data: &SeedData) -> Result<SeedSummary, SeedError> {
    let mut tx = pool.begin().await?;
    schema::recreate(&mut *tx).await?;

    let mut summary = SeedSummary::default();

    if !data.categories.is_empty() {
        let mut builder =
            QueryBuilder::<Postgres>::new("INSERT INTO categories (slug, description) ");
        builder.push_values(&data.categories, |mut row, category| {
            row.push_bind(&category.slug).push_bind(&category.description);
        });
        summary.categories = builder.build().execute(&mut *tx).await?.rows_affected();
    }

    if !data.users.is_empty() {
        let mut builder =
            QueryBuilder::<Postgres>::new("INSERT INTO users (username, avatar_url, name) ");
        builder.push_values(&data.users, |mut row, user| {
            row.push_bind(&user.username)
                .push_bind(&user.avatar_url)
                .push_bind(&user.name);
        });
        summary.users = builder.build().execute(&mut *tx).await?.rows_affected();
    }

    let now = Utc::now();

    if !data.reviews.is_empty() {
        let mut builder = QueryBuilder::<Postgres>::new(
            "INSERT INTO reviews (title, review_body, designer, review_img_url, votes, category, owner, created_at) ",
        );
        builder.push_values(&data.reviews, |mut row, review| {
            row.push_bind(&review.title)
                .push_bind(&review.review_body)
                .push_bind(&review.designer)
                .push_bind(
                    review
                        .review_img_url
                        .as_deref()
                        .unwrap_or(DEFAULT_REVIEW_IMG_URL),
                )
                .push_bind(review.votes.unwrap_or(0))
                .push_bind(&review.category)
                .push_bind(&review.owner)
                .push_bind(review.created_at.unwrap_or(now));
        });
        summary.reviews = builder.build().execute(&mut *tx).await?.rows_affected();
    }

    if !data.comments.is_empty() {
        let mut builder = QueryBuilder::<Postgres>::new(
            "INSERT INTO comments (author, review_id, votes, created_at, body) ",
        );
        builder.push_values(&data.comments, |mut row, comment| {
            row.push_bind(&comment.author)
                .push_bind(comment.review_id)
                .push_bind(comment.votes.unwrap_or(0))
                .push_bind(comment.created_at.unwrap_or(now))
                .push_bind(&comment.body);
        });
        summary.comments = builder.build().execute(&mut *tx).await?.rows_affected();
    }

    tx.commit().await?;

    tracing::info!(
        categories = summary.categories,
        users = summary.users,
        reviews = summary.reviews,
        comments = summary.comments,
        "database seeded"
    );
    Ok(summary)
}
