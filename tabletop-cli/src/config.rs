use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tabletop_server::TabletopConfig;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective config file contents as TOML
    Show,
    /// Show config file path
    Path,
}

/// Config file in use: `--config` if given, else `~/.tabletop/config.toml`.
pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(TabletopConfig::config_path)
}

pub fn load(explicit: Option<&Path>) -> Result<TabletopConfig> {
    let path = resolve_path(explicit);
    TabletopConfig::load_from(&path).with_context(|| format!("Failed to load {}", path.display()))
}

pub fn run_config(args: ConfigArgs, explicit: Option<&Path>) -> Result<()> {
    match args.command {
        ConfigCommands::Show => run_show(explicit),
        ConfigCommands::Path => run_path(explicit),
    }
}

fn run_show(explicit: Option<&Path>) -> Result<()> {
    let config = load(explicit)?;

    let toml_str =
        toml::to_string_pretty(&config).context("Failed to serialize config to TOML")?;
    println!("{}", toml_str);

    Ok(())
}

fn run_path(explicit: Option<&Path>) -> Result<()> {
    println!("{}", resolve_path(explicit).display());
    Ok(())
}
