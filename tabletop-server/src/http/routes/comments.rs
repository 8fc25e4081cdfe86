//! Comment endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::SecondsFormat;
use serde::Serialize;

use crate::db::repos::{Comment, CommentRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{ValidJson, ValidReviewId};
use crate::http::server::AppState;
use crate::models::{CommentRequest, NewComment};

/// Comment response
#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub comment_id: i32,
    pub body: String,
    pub votes: i32,
    pub author: String,
    pub review_id: i32,
    pub created_at: String,
}

impl From<Comment> for CommentResponse {
    fn from(c: Comment) -> Self {
        Self {
            comment_id: c.comment_id,
            body: c.body,
            votes: c.votes,
            author: c.author,
            review_id: c.review_id,
            created_at: c.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

#[derive(Serialize)]
pub struct CommentsEnvelope {
    pub comments: Vec<CommentResponse>,
}

#[derive(Serialize)]
pub struct CommentEnvelope {
    pub comment: CommentResponse,
}

/// GET /api/reviews/{review_id}/comments - list comments on a review
async fn list_comments(
    State(state): State<Arc<AppState>>,
    ValidReviewId(id): ValidReviewId,
) -> Result<Json<CommentsEnvelope>, ApiError> {
    let comments = CommentRepo::new(&state.pool).list_for_review(id).await?;

    Ok(Json(CommentsEnvelope {
        comments: comments.into_iter().map(CommentResponse::from).collect(),
    }))
}

/// POST /api/reviews/{review_id}/comments - add a comment
async fn create_comment(
    State(state): State<Arc<AppState>>,
    ValidReviewId(id): ValidReviewId,
    ValidJson(req): ValidJson<CommentRequest>,
) -> Result<(StatusCode, Json<CommentEnvelope>), ApiError> {
    let comment = NewComment::try_from(req)?;
    let created = CommentRepo::new(&state.pool).create(id, comment).await?;

    Ok((
        StatusCode::CREATED,
        Json(CommentEnvelope {
            comment: CommentResponse::from(created),
        }),
    ))
}

/// Comment routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/reviews/{review_id}/comments",
        get(list_comments).post(create_comment),
    )
}
