//! weft - a static site builder for plain HTML templates.
//!
//! Discovers `.html` templates, fills their `@@_*` placeholders from the
//! `[site]` metadata in `weft.toml`, and copies `libs`/`font` asset
//! directories alongside the pages.

mod build;
mod cli;
mod compiler;
mod config;
mod init;
mod logger;
mod utils;
mod watch;

use anyhow::{Result, bail};
use build::build_site;
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;
use init::new_site;
use std::path::PathBuf;
use watch::watch_for_changes_blocking;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match &cli.command {
        Commands::Init { name } => new_site(&config, name.is_some()),
        Commands::Build { .. } => build_site(&config).map(|_| ()),
        Commands::Watch { .. } => {
            if let Err(e) = build_site(&config) {
                crate::log!("error"; "{e:#}");
            }
            watch_for_changes_blocking(config, &cli)
        }
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let root = cli
        .root
        .as_deref()
        .map(config::expand_tilde)
        .unwrap_or_else(|| PathBuf::from("./"));
    let config_path = root.join(&cli.config);

    if cli.is_init() {
        let mut config = SiteConfig::default();
        config.update_with_cli(cli);
        return Ok(config);
    }

    if !config_path.exists() {
        bail!(
            "Config file `{}` not found. Run `weft init` to create a site.",
            config_path.display()
        );
    }

    let mut config = SiteConfig::from_path(&config_path)?;
    config.update_with_cli(cli);
    config.validate()?;

    Ok(config)
}
