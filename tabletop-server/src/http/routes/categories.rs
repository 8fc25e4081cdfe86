//! Category endpoints

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::db::repos::{Category, CategoryRepo};
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Category response
#[derive(Serialize)]
pub struct CategoryResponse {
    pub slug: String,
    pub description: String,
}

impl From<Category> for CategoryResponse {
    fn from(c: Category) -> Self {
        Self {
            slug: c.slug,
            description: c.description,
        }
    }
}

#[derive(Serialize)]
pub struct CategoriesEnvelope {
    pub categories: Vec<CategoryResponse>,
}

/// GET /api/categories - list all categories
async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CategoriesEnvelope>, ApiError> {
    let categories = CategoryRepo::new(&state.pool).list().await?;

    Ok(Json(CategoriesEnvelope {
        categories: categories.into_iter().map(CategoryResponse::from).collect(),
    }))
}

/// Category routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/categories", get(list_categories))
}
