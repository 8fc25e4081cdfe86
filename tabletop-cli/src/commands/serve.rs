//! HTTP server command
//!
//! Runs the reviews API until Ctrl+C or SIGTERM.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use tabletop_server::db::create_pool_with_options;
use tabletop_server::{run_server, ServerConfig, TabletopConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:9090)
    #[arg(long, short = 'b', env = "TABLETOP_BIND")]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides config file)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, config: TabletopConfig) -> Result<()> {
    let config = config.with_overrides(args.database_url, args.bind, args.cors_permissive);
    let database_url = config.database_url()?;

    tracing::info!("Starting tabletop server on {}", config.server.bind);

    let pool = create_pool_with_options(database_url, config.database.max_connections)
        .await
        .context("Failed to create database pool")?;

    // Run server (blocks until shutdown)
    run_server(pool, ServerConfig::from(config.server))
        .await
        .context("Server error")?;

    Ok(())
}
