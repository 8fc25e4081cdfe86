//! Repository implementations for database access
//!
//! Each repository borrows the pool and follows these patterns:
//! - JOIN + GROUP BY for derived counts
//! - Existence checks and the write share one transaction
//! - Missing rows surface as `DbError::NotFound`, never as `Option`

pub mod categories;
pub mod comments;
pub mod reviews;

use std::fmt;

pub use categories::{Category, CategoryRepo};
pub use comments::{Comment, CommentRepo};
pub use reviews::{Review, ReviewRepo, ReviewWithCount};

/// SQLSTATE 22P02: text could not be converted to the column type.
pub const INVALID_TEXT_REPRESENTATION: &str = "22P02";

/// SQLSTATE 22003: arithmetic result outside the column type.
pub const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";

/// What a failed lookup was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Review,
    Category,
    /// Comment creation checks both and does not say which one failed.
    ReviewOrUser,
}

impl Resource {
    /// Fixed client-facing message for a miss on this resource.
    pub fn not_found_message(&self) -> &'static str {
        match self {
            Self::Review => "No review with that ID currently",
            Self::Category => "Cannot filter by that category",
            Self::ReviewOrUser => "Unable to locate Review or Username",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Review => "review",
            Self::Category => "category",
            Self::ReviewOrUser => "review or user",
        })
    }
}

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: Resource, id: String },
}

impl DbError {
    /// SQLSTATE reported by the server, if this came from the database.
    pub fn sqlstate(&self) -> Option<String> {
        match self {
            Self::Sqlx(sqlx::Error::Database(e)) => e.code().map(|code| code.into_owned()),
            _ => None,
        }
    }

    /// True when the store rejected a value as malformed rather than failing.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self.sqlstate().as_deref(),
            Some(INVALID_TEXT_REPRESENTATION | NUMERIC_VALUE_OUT_OF_RANGE)
        )
    }
}
