//! Site initialization module.
//!
//! Creates a new site with a default `weft.toml`, a starter page that uses
//! every placeholder, and an example partial.

use crate::{config::SiteConfig, log};
use anyhow::{Context, Result, bail};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Files to write ignore patterns to
const IGNORE_FILES: &[&str] = &[".gitignore", ".ignore"];

/// Starter page
const INDEX_TEMPLATE: &str = include_str!("embed/init/index.html");

/// Starter partial
const HEADER_PARTIAL: &str = include_str!("embed/init/header.html");

/// Written above the serialized default config
const CONFIG_HEADER: &str = "\
# weft site configuration
#
# `build.partials` (relative to `build.source`) holds fragments such as
# include/header.html. weft has no include directive: files there are only
# skipped by page discovery and are never emitted.

";

/// Create a new site with default structure
pub fn new_site(config: &SiteConfig, has_name: bool) -> Result<()> {
    let root = config.get_root();

    // init in the current dir requires it to be empty
    if !has_name && !is_dir_empty(root)? {
        bail!(
            "Current directory is not empty. Use `weft init <SITE_NAME>` to create in a subdirectory."
        );
    }
    if config.config_path.exists() {
        bail!(
            "Config file already exists. Remove it manually or init in a different path."
        );
    }

    init_site_structure(config)?;
    init_default_config(config)?;
    init_ignored_files(root, &[&relative_to_root(&config.build.output, root)])?;

    log!("init"; "created site at {}", root.display());
    Ok(())
}

/// Check if a directory is completely empty
fn is_dir_empty(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    Ok(fs::read_dir(path)?.next().is_none())
}

/// Write default configuration file with paths relative to the root.
fn init_default_config(config: &SiteConfig) -> Result<()> {
    let root = config.get_root();
    let mut default = SiteConfig::default();
    default.build.source = relative_to_root(&config.build.source, root);
    default.build.output = relative_to_root(&config.build.output, root);

    let content = format!("{CONFIG_HEADER}{}", toml::to_string_pretty(&default)?);
    fs::write(&config.config_path, content)
        .with_context(|| format!("Failed to write {}", config.config_path.display()))?;
    Ok(())
}

/// Create the source tree with a starter page and partial.
fn init_site_structure(config: &SiteConfig) -> Result<()> {
    let source = &config.build.source;
    let partials = config.partials_dir();

    if source.exists() {
        bail!(
            "Path `{}` already exists. Try `weft init <SITE_NAME>` instead.",
            source.display()
        );
    }
    fs::create_dir_all(&partials)
        .with_context(|| format!("Failed to create {}", partials.display()))?;

    fs::write(source.join("index.html"), INDEX_TEMPLATE)?;
    fs::write(partials.join("header.html"), HEADER_PARTIAL)?;
    Ok(())
}

/// Initialize .gitignore and .ignore files with specified paths
fn init_ignored_files(root: &Path, paths: &[&Path]) -> Result<()> {
    let content = paths
        .iter()
        .filter_map(|p| p.to_str())
        .map(|p| format!("/{p}\n"))
        .collect::<String>();

    for filename in IGNORE_FILES {
        let path = root.join(filename);
        if !path.exists() {
            fs::write(&path, &content)?;
        }
    }

    Ok(())
}

fn relative_to_root(path: &Path, root: &Path) -> PathBuf {
    path.strip_prefix(root).unwrap_or(path).to_path_buf()
}
