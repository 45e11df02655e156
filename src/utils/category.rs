//! File category classification for watch mode.
//!
//! | Category  | Effect                  | Example Files              |
//! |-----------|-------------------------|----------------------------|
//! | Config    | Reload config + rebuild | `weft.toml`                |
//! | Template  | Rebuild                 | `src/**/*.html`            |
//! | Asset     | Rebuild                 | `src/libs/*`, `src/font/*` |
//! | Unknown   | Ignored                 | `dist/*`, editor temp files|

use crate::config::{SiteConfig, normalize_path};
use std::path::Path;

/// Category of a changed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCategory {
    /// Site configuration (weft.toml)
    Config,
    /// `.html` file under the source directory, partials included
    Template,
    /// Any other file under the source directory
    Asset,
    /// Output files, temp files, anything outside watched paths
    Unknown,
}

impl FileCategory {
    pub const fn triggers_rebuild(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

/// Check if path is a temp/backup file (editor artifacts).
pub fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}

/// Categorize a file path to determine how a change is handled.
pub fn categorize_path(path: &Path, config: &SiteConfig) -> FileCategory {
    if is_temp_file(path) {
        return FileCategory::Unknown;
    }
    let path = normalize_path(path);

    if path == config.config_path {
        FileCategory::Config
    } else if path.starts_with(&config.build.source) {
        if path.extension().is_some_and(|ext| ext == "html") {
            FileCategory::Template
        } else {
            FileCategory::Asset
        }
    } else {
        FileCategory::Unknown
    }
}
