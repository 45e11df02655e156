//! Template processing for static site generation.
//!
//! This module holds the build pipeline stages:
//!
//! - **discover**: Find `.html` templates, skipping partials
//! - **pages**: Emit templates into the output tree
//! - **substitute**: Replace `@@_*` placeholders with site metadata
//! - **assets**: Decide and perform `libs` / `font` directory copies
//!
//! # Build Flow
//!
//! ```text
//! discover_templates() ──► emit_pages() ──► substitute_pages() ──► copy_dir()
//!         │                     │                  │                  │
//!         ▼                     ▼                  ▼                  ▼
//! TemplateDescriptor[]    raw HTML files     finished pages      asset dirs
//! ```

pub mod assets;
pub mod discover;
pub mod pages;
pub mod substitute;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// ============================================================================
// Public API
// ============================================================================

pub use assets::{AssetCopyDecision, copy_dir};
pub use discover::{TemplateDescriptor, discover_templates};
pub use pages::{emit_pages, substitute_pages};
pub use substitute::{SubstitutionRule, substitute};

// ============================================================================
// Shared utilities
// ============================================================================

/// Files to ignore during directory traversal
const IGNORED_FILES: &[&str] = &[".DS_Store", "Thumbs.db"];

/// Check if a file name is an OS artifact or editor temp file.
pub fn is_ignored(name: &str) -> bool {
    IGNORED_FILES.contains(&name)
        || name.ends_with('~')
        || name.ends_with(".swp")
        || name.ends_with(".swo")
}

/// Collect all files from a directory recursively, sorted by path.
///
/// Symlinks are followed. Any walk error (missing or unreadable directory,
/// symlink loop) is returned.
pub fn collect_all_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", dir.display()))?;
        if entry.file_type().is_file()
            && !is_ignored(entry.file_name().to_str().unwrap_or_default())
        {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
