//! Database layer - connection pool, schema, fixtures and repositories
//!
//! - Connection pool shared through `AppState`, no Arc<Mutex<Connection>>
//! - Comment counts come from a LEFT JOIN, never one query per review
//! - Caller-supplied values are always bound, never spliced into SQL text
//! - Transactions for multi-step writes

pub mod pool;
pub mod repos;
pub mod schema;
pub mod seed;

pub use pool::{create_pool, create_pool_with_options};
pub use repos::*;
