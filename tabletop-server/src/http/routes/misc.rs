//! Hello, endpoint directory and the unmatched-path fallback

use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use serde_json::{json, Value};

/// Simple message body
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// GET /api/hello
async fn hello() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello there",
    })
}

/// GET /api - directory of endpoint groups
pub async fn endpoints() -> Json<Value> {
    Json(json!({
        "endpoints": {
            "GET /api": {
                "description": "this directory of available endpoints"
            },
            "GET /api/hello": {
                "description": "sanity check greeting"
            },
            "GET /api/categories": {
                "description": "all review categories",
                "exampleResponse": {
                    "categories": [{ "slug": "dexterity", "description": "Games involving physical skill" }]
                }
            },
            "GET /api/reviews": {
                "description": "all reviews with comment counts",
                "queries": ["sort_by", "order", "cat"],
                "sort_by": crate::models::SortColumn::ALL.map(|c| c.as_str()),
                "order": ["ASC", "DESC"]
            },
            "GET /api/reviews/:review_id": {
                "description": "a single review with its comment count"
            },
            "PATCH /api/reviews/:review_id": {
                "description": "adjust a review's votes",
                "exampleRequest": { "inc_votes": 1 }
            },
            "GET /api/reviews/:review_id/comments": {
                "description": "comments on a review, newest first"
            },
            "POST /api/reviews/:review_id/comments": {
                "description": "add a comment to a review",
                "exampleRequest": { "username": "dav3rid", "body": "Great game" }
            }
        }
    }))
}

/// Fallback for every unmatched path
pub async fn no_such_path() -> (StatusCode, Json<MessageResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(MessageResponse {
            message: "No Results for this Path",
        }),
    )
}

/// Misc routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(endpoints))
        .route("/hello", get(hello))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hello_says_hello() {
        let Json(body) = hello().await;
        assert_eq!(body.message, "Hello there");
    }

    #[tokio::test]
    async fn directory_lists_every_group() {
        let Json(body) = endpoints().await;
        let endpoints = body["endpoints"].as_object().unwrap();
        assert!(endpoints.contains_key("GET /api/categories"));
        assert!(endpoints.contains_key("POST /api/reviews/:review_id/comments"));
        assert_eq!(endpoints["GET /api/reviews"]["sort_by"].as_array().unwrap().len(), 9);
    }

    #[tokio::test]
    async fn fallback_is_404() {
        let (status, Json(body)) = no_such_path().await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.message, "No Results for this Path");
    }
}
