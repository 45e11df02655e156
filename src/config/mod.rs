//! Site configuration management for `weft.toml`.
//!
//! # Sections
//!
//! | Section          | Purpose                                        |
//! |------------------|------------------------------------------------|
//! | `[site]`         | Page metadata feeding the `@@_*` placeholders  |
//! | `[build]`        | Paths, build mode, minify, path normalization  |
//! | `[build.assets]` | `libs` / `font` directory copying              |
//! | `[watch]`        | Debounce timing for `weft watch`               |
//!
//! # Example
//!
//! ```toml
//! [site]
//! author = "Alice"
//! title = "My Site"
//! description = "A small static site"
//! keywords = "html,static"
//!
//! [site.og]
//! locale = "en_US"
//! url = "https://example.com/index.html"
//! type = "website"
//!
//! [site.og.img]
//! url = "https://example.com/og.jpg"
//! type = "image/jpeg"
//! width = "1280"
//! height = "720"
//! alt = "alternate text"
//!
//! [build]
//! source = "src"
//! output = "dist"
//! mode = "production"
//! ```

mod build;
pub mod defaults;
mod error;
mod site;
mod watch;

pub use build::{AssetsConfig, BuildConfig, BuildMode};
pub use error::ConfigError;
pub use site::SiteMetadata;
pub use watch::WatchConfig;

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing weft.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Page metadata (required)
    pub site: SiteMetadata,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Watch mode settings
    #[serde(default)]
    pub watch: WatchConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Absolute path of the partials directory.
    pub fn partials_dir(&self) -> PathBuf {
        self.build.source.join(&self.build.partials)
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let base = cli
            .root
            .as_deref()
            .map(expand_tilde)
            .unwrap_or_else(|| self.get_root().to_owned());

        let root = match &cli.command {
            Commands::Init { name: Some(name) } => base.join(name),
            _ => base,
        };

        Self::update_option(&mut self.build.source, cli.source.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());
        self.update_path_with_root(&root, &cli.config);

        if let Some(args) = cli.build_args() {
            Self::update_option(&mut self.build.mode, args.mode.as_ref());
            Self::update_option(&mut self.build.minify, args.minify.as_ref());
            self.build.clean |= args.clean;
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Update all paths relative to root directory and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path, config_name: &Path) {
        let root = normalize_path(root);
        self.set_root(&root);

        self.config_path = normalize_path(&root.join(config_name));
        self.build.source = normalize_path(&root.join(&self.build.source));
        self.build.output = normalize_path(&root.join(&self.build.output));
    }

    /// Validate configuration before any file is written.
    pub fn validate(&self) -> Result<()> {
        self.site.validate()?;

        if self.build.partials.as_os_str().is_empty() || self.partials_dir() == self.build.source {
            bail!(ConfigError::Validation(
                "[build.partials] must name a subdirectory of [build.source]".into()
            ));
        }

        if self.build.output == self.build.source {
            bail!(ConfigError::Validation(
                "[build.output] must differ from [build.source]".into()
            ));
        }

        if self.build.source.starts_with(&self.build.output)
            || self.build.output.starts_with(&self.build.source)
        {
            bail!(ConfigError::Validation(
                "[build.source] and [build.output] must not contain each other".into()
            ));
        }

        Ok(())
    }
}

/// Expand a leading `~` in a user supplied path.
pub fn expand_tilde(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(s) => PathBuf::from(shellexpand::tilde(s).into_owned()),
        None => path.to_path_buf(),
    }
}

/// Normalize a path to absolute, using canonicalize if the path exists
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        // For non-existent paths, manually make them absolute
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(path))
                .unwrap_or_else(|_| path.to_path_buf())
        }
    })
}

// ============================================================================
// Tests
// ============================================================================
