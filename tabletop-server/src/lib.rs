//! tabletop-server: HTTP API for board-game reviews
//!
//! Serves categories, reviews and comments from PostgreSQL. The review
//! listing accepts an allow-listed sort column, direction and category, and
//! every review read carries a derived `comment_count`.

pub mod config;
pub mod db;
pub mod http;
pub mod models;

pub use config::{ConfigError, TabletopConfig};
pub use http::{build_router, run_server, AppState, ServerConfig};
