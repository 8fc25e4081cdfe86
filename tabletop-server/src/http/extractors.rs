//! Custom Axum extractors
//!
//! Every rejection becomes an `ApiError`, so clients never see axum's
//! plain-text rejection bodies.

use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::error::ApiError;
use crate::models::{ReviewId, ReviewQuery};

/// Extract and validate a review id from path
pub struct ValidReviewId(pub ReviewId);

impl<S> FromRequestParts<S> for ValidReviewId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::BadRequest)?;

        let id = raw.parse::<ReviewId>()?;
        Ok(Self(id))
    }
}

/// Raw `GET /api/reviews` query string. `category` is accepted for `cat`.
#[derive(Debug, Default, Deserialize)]
struct ReviewListParams {
    sort_by: Option<String>,
    order: Option<String>,
    #[serde(alias = "category")]
    cat: Option<String>,
}

/// Extract and validate the review listing parameters
pub struct ValidReviewQuery(pub ReviewQuery);

impl<S> FromRequestParts<S> for ValidReviewQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params): Query<ReviewListParams> = Query::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(%rejection, "rejected query string");
                ApiError::BadRequest
            })?;

        let query = ReviewQuery::parse(
            params.sort_by.as_deref(),
            params.order.as_deref(),
            params.cat.as_deref(),
        )?;
        Ok(Self(query))
    }
}

/// JSON body whose rejections are reported as 400 Bad Request
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(%rejection, "rejected request body");
                ApiError::BadRequest
            })?;

        Ok(Self(value))
    }
}
