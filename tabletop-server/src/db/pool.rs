//! Postgres pool for the reviews store
//!
//! Handlers borrow the pool through `AppState`; the CLI builds it once from
//! the merged config (`[database] max_connections`, default 5).

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Pool size when the config file does not set `max_connections`.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// How long a request waits for a free connection before failing with a 500.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Connect with the default pool size. Used by tests and the seed fixtures.
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Connect with an explicit pool size, failing fast if the server is unreachable.
pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    tracing::debug!(max_connections, "opening reviews database pool");
    PgPoolOptions::new()
        .max_connections(max_connections.max(1))
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await
}
