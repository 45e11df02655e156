//! `[build]` section configuration.
//!
//! Contains build settings including paths, build mode, and asset copying.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{fmt, path::PathBuf};

// ============================================================================
// Enums
// ============================================================================

/// Target environment of a build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    /// Readable output, existing output directory is kept (default).
    #[default]
    #[value(alias = "dev")]
    Development,
    /// Minified output, output directory is cleared first.
    #[value(alias = "prod")]
    Production,
}

impl BuildMode {
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => f.write_str("development"),
            Self::Production => f.write_str("production"),
        }
    }
}

// ============================================================================
// Main BuildConfig
// ============================================================================

/// `[build]` section in weft.toml - build pipeline configuration.
///
/// # Example
/// ```toml
/// [build]
/// source = "src"          # Template directory
/// output = "dist"         # Output directory
/// partials = "include"    # Excluded from page discovery
/// mode = "production"
///
/// [build.assets]
/// copy_font = false
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Template source directory.
    #[serde(default = "defaults::build::source")]
    #[educe(Default = defaults::build::source())]
    pub source: PathBuf,

    /// Build output directory.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Partials directory, relative to `source`. Never emitted as a page.
    #[serde(default = "defaults::build::partials")]
    #[educe(Default = defaults::build::partials())]
    pub partials: PathBuf,

    /// Target environment.
    #[serde(default = "defaults::build::mode")]
    #[educe(Default = defaults::build::mode())]
    pub mode: BuildMode,

    /// Minify HTML output in production mode.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub minify: bool,

    /// Clear output directory before each build (always on in production).
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub clean: bool,

    /// Rewrite `="/./"` to `="/"` after metadata substitution.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub normalize_paths: bool,

    /// Auxiliary asset directories copied verbatim.
    #[serde(default)]
    pub assets: AssetsConfig,
}

impl BuildConfig {
    /// Whether the output directory is wiped before building.
    pub const fn should_clean(&self) -> bool {
        self.clean || self.mode.is_production()
    }

    /// Whether emitted pages are minified.
    pub const fn should_minify(&self) -> bool {
        self.minify && self.mode.is_production()
    }
}

// ============================================================================
// Sub-configurations
// ============================================================================

/// `[build.assets]` section
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct AssetsConfig {
    /// Library bundle directory, relative to `source`.
    #[serde(default = "defaults::build::assets::libs")]
    #[educe(Default = defaults::build::assets::libs())]
    pub libs: PathBuf,

    /// Font directory, relative to `source`.
    #[serde(default = "defaults::build::assets::font")]
    #[educe(Default = defaults::build::assets::font())]
    pub font: PathBuf,

    /// Copy `libs` when it exists.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub copy_libs: bool,

    /// Copy `font` when it exists.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub copy_font: bool,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use super::*;
    use std::path::Path;

    const SITE: &str = r#"
        [site]
        author = "A"
        title = "T"
        description = "D"
        keywords = "K"
        [site.og]
        locale = "en_US"
        url = "https://example.com"
        type = "website"
        [site.og.img]
        url = "https://example.com/og.jpg"
        type = "image/jpeg"
        width = "1280"
        height = "720"
        alt = "alt"
    "#;

    fn parse(build: &str) -> SiteConfig {
        SiteConfig::from_str(&format!("{SITE}\n{build}")).unwrap()
    }

    #[test]
    fn test_build_config_defaults() {
        let config = parse("");

        assert_eq!(config.build.source, Path::new("src"));
        assert_eq!(config.build.output, Path::new("dist"));
        assert_eq!(config.build.partials, Path::new("include"));
        assert_eq!(config.build.mode, BuildMode::Development);
        assert!(config.build.minify);
        assert!(!config.build.clean);
        assert!(config.build.normalize_paths);
        assert_eq!(config.build.assets.libs, Path::new("libs"));
        assert_eq!(config.build.assets.font, Path::new("font"));
        assert!(config.build.assets.copy_libs);
        assert!(config.build.assets.copy_font);
    }

    #[test]
    fn test_build_config_full() {
        let config = parse(
            r#"
            [build]
            source = "public/src"
            output = "public/dist"
            partials = "partials"
            mode = "production"
            minify = false
            clean = true
            normalize_paths = false

            [build.assets]
            libs = "vendor"
            copy_font = false
        "#,
        );

        assert_eq!(config.build.source, Path::new("public/src"));
        assert_eq!(config.build.output, Path::new("public/dist"));
        assert_eq!(config.build.partials, Path::new("partials"));
        assert_eq!(config.build.mode, BuildMode::Production);
        assert!(!config.build.minify);
        assert!(config.build.clean);
        assert!(!config.build.normalize_paths);
        assert_eq!(config.build.assets.libs, Path::new("vendor"));
        assert!(!config.build.assets.copy_font);
        assert!(config.build.assets.copy_libs);
    }

    #[test]
    fn test_invalid_mode_rejected() {
        let result = SiteConfig::from_str(&format!("{SITE}\n[build]\nmode = \"staging\""));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_field_rejection() {
        let result = SiteConfig::from_str(&format!("{SITE}\n[build]\nminfy = true"));
        assert!(result.is_err());
    }

    #[test]
    fn test_production_implies_clean_and_minify() {
        let mut build = BuildConfig::default();
        assert!(!build.should_clean());
        assert!(!build.should_minify());

        build.mode = BuildMode::Production;
        assert!(build.should_clean());
        assert!(build.should_minify());

        build.minify = false;
        assert!(!build.should_minify());
    }

    #[test]
    fn test_build_mode_display() {
        assert_eq!(BuildMode::Development.to_string(), "development");
        assert_eq!(BuildMode::Production.to_string(), "production");
    }
}
