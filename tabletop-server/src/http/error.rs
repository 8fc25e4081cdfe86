//! API error types with IntoResponse
//!
//! Three response shapes:
//! - typed rejections carry their own status and `{"msg": ...}`
//! - malformed input is always 400 `{"message": "Bad Request"}`
//! - anything else is logged and becomes 500 `{"message": "Internal Server Error"}`

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::repos::{DbError, Resource};
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Request failed validation (400)
    Validation(ValidationError),

    /// Lookup miss (404)
    NotFound { resource: Resource, id: String },

    /// Unparseable id, body or query string (400)
    BadRequest,

    /// Database error (500, logged)
    Database(DbError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(ValidationError::Malformed { .. }) | Self::BadRequest => {
                (StatusCode::BAD_REQUEST, json!({ "message": "Bad Request" }))
            }
            Self::Validation(e) => {
                tracing::debug!("Rejected request: {}", e);
                (StatusCode::BAD_REQUEST, json!({ "msg": e.public_message() }))
            }
            Self::NotFound { resource, id } => {
                tracing::debug!("{} '{}' not found", resource, id);
                (
                    StatusCode::NOT_FOUND,
                    json!({ "msg": resource.not_found_message() }),
                )
            }
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "Internal Server Error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            e if e.is_malformed_input() => {
                tracing::debug!("Store rejected input: {}", e);
                Self::BadRequest
            }
            e => Self::Database(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn sort_column_is_400_with_msg() {
        let err = ApiError::Validation(ValidationError::SortColumn {
            value: "nope".into(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "msg": "Cannot sort by that column" })
        );
    }

    #[tokio::test]
    async fn malformed_is_plain_bad_request() {
        let err = ApiError::Validation(ValidationError::Malformed {
            field: "review_id",
            reason: "must be an integer",
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({ "message": "Bad Request" }));
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let err = ApiError::from(DbError::NotFound {
            resource: Resource::Review,
            id: "2000".into(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            json!({ "msg": "No review with that ID currently" })
        );
    }

    #[tokio::test]
    async fn unclassified_database_error_is_500() {
        let err = ApiError::from(DbError::Sqlx(sqlx::Error::PoolTimedOut));
        assert!(matches!(err, ApiError::Database(_)));

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "message": "Internal Server Error" })
        );
    }
}
