//! Seed command: drop, recreate and fill the tables from a fixture directory

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use tabletop_server::db::create_pool_with_options;
use tabletop_server::db::seed::{seed, SeedData};
use tabletop_server::TabletopConfig;

/// Arguments for the seed command
#[derive(Parser, Debug)]
pub struct SeedArgs {
    /// Directory holding categories.json, users.json, reviews.json and comments.json
    #[arg(long, short = 'd', default_value = "data/development")]
    pub dir: PathBuf,

    /// Database URL (overrides config file)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Print the row counts as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run_seed(args: SeedArgs, config: TabletopConfig) -> Result<()> {
    let data = SeedData::load_dir(&args.dir)
        .with_context(|| format!("Failed to load fixtures from {}", args.dir.display()))?;

    let config = config.with_overrides(args.database_url, None, false);
    let pool = create_pool_with_options(config.database_url()?, config.database.max_connections)
        .await
        .context("Failed to create database pool")?;

    let summary = seed(&pool, &data).await.context("Seeding failed")?;
    pool.close().await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "Seeded {} categories, {} users, {} reviews, {} comments from {}",
            summary.categories,
            summary.users,
            summary.reviews,
            summary.comments,
            args.dir.display()
        );
    }

    Ok(())
}
