//! tabletop CLI - board-game reviews API
//!
//! - `serve`: run the HTTP API
//! - `seed`: reset the database from a fixture directory
//! - `config`: inspect the config file

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "tabletop",
    author,
    version,
    about = "REST API for board-game categories, reviews and comments"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    /// Config file (default: ~/.tabletop/config.toml)
    #[arg(long, global = true, env = "TABLETOP_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Drop, recreate and seed the database tables
    Seed(commands::seed::SeedArgs),
    /// Inspect tabletop configuration (show, path)
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Serve(args) => commands::run_serve(args, config::load(config_path)?).await?,
        Commands::Seed(args) => commands::run_seed(args, config::load(config_path)?).await?,
        Commands::Config(args) => config::run_config(args, config_path)?,
    }

    Ok(())
}
