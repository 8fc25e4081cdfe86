//! Axum server setup
//!
//! Server skeleton with:
//! - Localhost-only CORS by default
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::routing::get;
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::routes;
use crate::config::ServerSection;
use crate::db::schema;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:9090)
    pub bind_addr: SocketAddr,

    /// Allow permissive CORS (default: false = localhost only)
    ///
    /// WARNING: Setting this to true allows any origin.
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerSection::default().into()
    }
}

impl From<ServerSection> for ServerConfig {
    fn from(section: ServerSection) -> Self {
        Self {
            bind_addr: section.bind,
            cors_permissive: section.cors_permissive,
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
}

/// Build the `/api` router with the unmatched-path fallback.
///
/// Unknown paths and unsupported methods on known paths both answer with the
/// JSON 404. No CORS or listener here, so tests can drive it with `oneshot`.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::misc::router())
        .merge(routes::categories::router())
        .merge(routes::reviews::router())
        .merge(routes::comments::router());

    Router::new()
        .nest("/api", api)
        .route("/api/", get(routes::misc::endpoints))
        .fallback(routes::misc::no_such_path)
        .method_not_allowed_fallback(routes::misc::no_such_path)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

fn cors_layer(permissive: bool) -> CorsLayer {
    if permissive {
        tracing::warn!("CORS: Permissive mode enabled - all origins allowed");
        CorsLayer::permissive()
    } else {
        // Localhost only
        CorsLayer::new()
            .allow_origin([
                HeaderValue::from_static("http://localhost:3000"),
                HeaderValue::from_static("http://localhost:9090"),
                HeaderValue::from_static("http://127.0.0.1:3000"),
                HeaderValue::from_static("http://127.0.0.1:9090"),
            ])
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Run the HTTP server.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&database_url).await?;
/// let config = ServerConfig::default();
/// run_server(pool, config).await?;
/// ```
pub async fn run_server(pool: PgPool, config: ServerConfig) -> Result<(), ServerError> {
    schema::ensure(&pool).await?;

    let app = build_router(AppState { pool }).layer(cors_layer(config.cors_permissive));

    // Bind listener
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    // Run with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{json, Value};
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    /// Router over a pool that never connects: only paths that fail before
    /// touching the store can be exercised here.
    fn offline_router() -> Router {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/tabletop_offline")
            .unwrap();
        build_router(AppState { pool })
    }

    async fn send(method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = offline_router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 9090);
        assert!(!config.cors_permissive);
    }

    #[tokio::test]
    async fn hello() {
        let (status, body) = send(Method::GET, "/api/hello", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "Hello there" }));
    }

    #[tokio::test]
    async fn api_directory() {
        let (status, body) = send(Method::GET, "/api", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["endpoints"].is_object());
    }

    #[tokio::test]
    async fn unknown_paths_fall_back() {
        for uri in ["/api/randomPathName", "/randomPathName", "/api/categeries", "/apo/categories", "/apo"] {
            let (status, body) = send(Method::GET, uri, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(body, json!({ "message": "No Results for this Path" }), "{uri}");
        }
    }

    #[tokio::test]
    async fn unsupported_methods_fall_back() {
        for (method, uri) in [
            (Method::DELETE, "/api/reviews/2"),
            (Method::POST, "/api/categories"),
            (Method::PUT, "/api/hello"),
            (Method::DELETE, "/api/reviews/2/comments"),
            (Method::POST, "/api"),
        ] {
            let (status, body) = send(method.clone(), uri, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{method} {uri}");
            assert_eq!(body, json!({ "message": "No Results for this Path" }), "{method} {uri}");
        }
    }

    #[tokio::test]
    async fn api_directory_with_trailing_slash() {
        let (status, body) = send(Method::GET, "/api/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["endpoints"].is_object());
    }

    #[tokio::test]
    async fn bad_sort_by_is_400() {
        let (status, body) = send(Method::GET, "/api/reviews?sort_by=whatamIevendoing", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "msg": "Cannot sort by that column" }));
    }

    #[tokio::test]
    async fn bad_order_is_400() {
        let (status, body) = send(Method::GET, "/api/reviews?order=whateverorderIsay", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "msg": "Cannot sort in that order" }));

        let (status, body) =
            send(Method::GET, "/api/reviews?sort_by=WhoKnows%3F&order=cantUseThisASC", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "msg": "Cannot sort in that order" }));
    }

    #[tokio::test]
    async fn malformed_review_id_is_400() {
        for uri in [
            "/api/reviews/TestString1",
            "/api/reviews/noReviewHere/comments",
            "/api/reviews/no%20Review%20Here/comments",
        ] {
            let (status, body) = send(Method::GET, uri, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body, json!({ "message": "Bad Request" }), "{uri}");
        }

        let (status, body) = send(
            Method::PATCH,
            "/api/reviews/teststring",
            Some(json!({ "inc_votes": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "message": "Bad Request" }));
    }

    #[tokio::test]
    async fn non_numeric_inc_votes_is_400() {
        for inc in [json!("this isn't right"), json!(true), json!("teststring1"), json!(1.5)] {
            let (status, body) = send(
                Method::PATCH,
                "/api/reviews/2",
                Some(json!({ "inc_votes": inc })),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, json!({ "message": "Bad Request" }));
        }
    }

    #[tokio::test]
    async fn comment_missing_fields_is_400() {
        for body in [
            json!({ "body": "no author" }),
            json!({ "username": "dav3rid" }),
            json!({ "username": "dav3rid", "extra": "x" }),
            json!({}),
        ] {
            let (status, response) =
                send(Method::POST, "/api/reviews/2/comments", Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(
                response,
                json!({ "msg": "Missing an essential element of comment" })
            );
        }
    }
}
