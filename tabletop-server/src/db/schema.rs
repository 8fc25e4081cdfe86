//! Table definitions
//!
//! `ensure` is run on server start and only creates what is missing.
//! `recreate` drops everything first and is used by seeding.

use sqlx::{PgConnection, PgPool};

/// Placeholder image for reviews created without one.
pub const DEFAULT_REVIEW_IMG_URL: &str =
    "https://images.pexels.com/photos/163064/play-stone-network-networked-interactive-163064.jpeg";

/// Dependency order: each table only references tables above it.
const CREATE_TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS categories (
        slug VARCHAR(255) PRIMARY KEY,
        description TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS users (
        username VARCHAR(255) PRIMARY KEY,
        avatar_url TEXT NOT NULL,
        name VARCHAR(255) NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS reviews (
        review_id SERIAL PRIMARY KEY,
        title VARCHAR(500) NOT NULL,
        review_body TEXT NOT NULL,
        designer VARCHAR(255) NOT NULL,
        review_img_url VARCHAR(255) NOT NULL
            DEFAULT 'https://images.pexels.com/photos/163064/play-stone-network-networked-interactive-163064.jpeg',
        votes INT NOT NULL DEFAULT 0,
        category VARCHAR(255) NOT NULL REFERENCES categories(slug),
        owner VARCHAR(255) NOT NULL REFERENCES users(username),
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS comments (
        comment_id SERIAL PRIMARY KEY,
        author VARCHAR(255) NOT NULL REFERENCES users(username),
        review_id INT NOT NULL REFERENCES reviews(review_id),
        votes INT NOT NULL DEFAULT 0,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        body TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_reviews_category ON reviews(category)",
    "CREATE INDEX IF NOT EXISTS idx_comments_review ON comments(review_id)",
];

/// Reverse dependency order.
const DROP_TABLES: &[&str] = &[
    "DROP TABLE IF EXISTS comments",
    "DROP TABLE IF EXISTS reviews",
    "DROP TABLE IF EXISTS users",
    "DROP TABLE IF EXISTS categories",
];

/// Create any missing tables and indexes.
pub async fn ensure(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Ensuring database schema...");

    let mut conn = pool.acquire().await?;
    create_all(&mut conn).await?;

    tracing::info!("Database schema ready");
    Ok(())
}

/// Drop and recreate every table. All data is lost.
///
/// Takes a connection so callers can run it inside a transaction.
pub async fn recreate(conn: &mut PgConnection) -> Result<(), sqlx::Error> {
    for statement in DROP_TABLES {
        sqlx::query(statement).execute(&mut *conn).await?;
    }
    tracing::debug!("Tables dropped");

    create_all(conn).await
}

async fn create_all(conn: &mut PgConnection) -> Result<(), sqlx::Error> {
    for statement in CREATE_TABLES {
        sqlx::query(statement).execute(&mut *conn).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_image_matches_column_default() {
        let reviews = CREATE_TABLES
            .iter()
            .find(|s| s.contains("CREATE TABLE IF NOT EXISTS reviews"))
            .unwrap();
        assert!(reviews.contains(DEFAULT_REVIEW_IMG_URL));
    }

    #[test]
    fn drops_children_before_parents() {
        let position = |table: &str| {
            DROP_TABLES
                .iter()
                .position(|s| s.ends_with(table))
                .unwrap()
        };
        assert!(position("comments") < position("reviews"));
        assert!(position("reviews") < position("users"));
        assert!(position("reviews") < position("categories"));
    }
}
