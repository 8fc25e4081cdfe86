//! Comment creation input

use serde::Deserialize;

use super::ValidationError;

/// Raw `POST /api/reviews/{id}/comments` body.
///
/// Unknown fields are ignored by serde, so they can never reach the store.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentRequest {
    pub username: Option<String>,
    pub body: Option<String>,
}

/// Comment with both required fields present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub author: String,
    pub body: String,
}

impl TryFrom<CommentRequest> for NewComment {
    type Error = ValidationError;

    fn try_from(req: CommentRequest) -> Result<Self, Self::Error> {
        let author = req
            .username
            .ok_or(ValidationError::MissingField { field: "username" })?;
        let body = req
            .body
            .ok_or(ValidationError::MissingField { field: "body" })?;

        Ok(Self { author, body })
    }
}

/// `PATCH /api/reviews/{id}` body
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct VoteUpdate {
    /// Signed, unbounded within `i32`; totals may go negative.
    pub inc_votes: i32,
}
