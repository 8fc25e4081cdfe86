//! Review endpoints

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use chrono::SecondsFormat;
use serde::Serialize;

use crate::db::repos::{Review, ReviewRepo, ReviewWithCount};
use crate::http::error::ApiError;
use crate::http::extractors::{ValidJson, ValidReviewId, ValidReviewQuery};
use crate::http::server::AppState;
use crate::models::VoteUpdate;

/// Review response
#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub review_id: i32,
    pub title: String,
    pub review_body: String,
    pub designer: String,
    pub review_img_url: String,
    pub votes: i32,
    pub category: String,
    pub owner: String,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_count: Option<i64>,
}

impl From<Review> for ReviewResponse {
    fn from(r: Review) -> Self {
        Self {
            review_id: r.review_id,
            title: r.title,
            review_body: r.review_body,
            designer: r.designer,
            review_img_url: r.review_img_url,
            votes: r.votes,
            category: r.category,
            owner: r.owner,
            created_at: r.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            comment_count: None,
        }
    }
}

impl From<ReviewWithCount> for ReviewResponse {
    fn from(r: ReviewWithCount) -> Self {
        Self {
            comment_count: Some(r.comment_count),
            ..Self::from(r.review)
        }
    }
}

#[derive(Serialize)]
pub struct ReviewsEnvelope {
    pub reviews: Vec<ReviewResponse>,
}

#[derive(Serialize)]
pub struct ReviewEnvelope {
    pub review: ReviewResponse,
}

/// GET /api/reviews - list reviews, filtered and sorted
async fn list_reviews(
    State(state): State<Arc<AppState>>,
    ValidReviewQuery(query): ValidReviewQuery,
) -> Result<Json<ReviewsEnvelope>, ApiError> {
    let reviews = ReviewRepo::new(&state.pool).list(&query).await?;

    Ok(Json(ReviewsEnvelope {
        reviews: reviews.into_iter().map(ReviewResponse::from).collect(),
    }))
}

/// GET /api/reviews/{review_id} - get a single review
async fn get_review(
    State(state): State<Arc<AppState>>,
    ValidReviewId(id): ValidReviewId,
) -> Result<Json<ReviewEnvelope>, ApiError> {
    let review = ReviewRepo::new(&state.pool).get(id).await?;

    Ok(Json(ReviewEnvelope {
        review: ReviewResponse::from(review),
    }))
}

/// PATCH /api/reviews/{review_id} - adjust votes by `inc_votes`
async fn patch_review(
    State(state): State<Arc<AppState>>,
    ValidReviewId(id): ValidReviewId,
    ValidJson(update): ValidJson<VoteUpdate>,
) -> Result<Json<ReviewEnvelope>, ApiError> {
    let review = ReviewRepo::new(&state.pool)
        .adjust_votes(id, update.inc_votes)
        .await?;

    Ok(Json(ReviewEnvelope {
        review: ReviewResponse::from(review),
    }))
}

/// Review routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/reviews", get(list_reviews))
        .route("/reviews/{review_id}", get(get_review).patch(patch_review))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn jenga() -> Review {
        Review {
            review_id: 2,
            title: "Jenga".into(),
            review_body: "Fiddly fun for all the family".into(),
            designer: "Leslie Scott".into(),
            review_img_url: "https://example.com/jenga.png".into(),
            votes: 5,
            category: "dexterity".into(),
            owner: "philippaclaire9".into(),
            created_at: Utc.timestamp_millis_opt(1610964101251).unwrap(),
        }
    }

    #[test]
    fn timestamps_use_millisecond_utc() {
        let response = ReviewResponse::from(jenga());
        assert_eq!(response.created_at, "2021-01-18T10:01:41.251Z");
    }

    #[test]
    fn comment_count_only_when_counted() {
        let plain = serde_json::to_value(ReviewResponse::from(jenga())).unwrap();
        assert!(plain.get("comment_count").is_none());

        let counted = serde_json::to_value(ReviewResponse::from(ReviewWithCount {
            review: jenga(),
            comment_count: 3,
        }))
        .unwrap();
        assert_eq!(counted["comment_count"], 3);
        assert_eq!(counted["review_id"], 2);
    }
}
