//! Request models with validation at construction
//!
//! All client input is turned into these types before any store access.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod review_query;
pub mod review_id;
pub mod comment;

pub use validation::ValidationError;
pub use review_query::{CategoryFilter, ReviewQuery, SortColumn, SortOrder, KNOWN_CATEGORIES};
pub use review_id::ReviewId;
pub use comment::{CommentRequest, NewComment, VoteUpdate};
