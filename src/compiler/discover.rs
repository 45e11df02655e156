//! Template discovery.
//!
//! Every `.html` file below the source directory is a page, except those
//! under the partials directory, which hold fragments included elsewhere.

use super::is_ignored;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// A page found during discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDescriptor {
    /// Path relative to the source root with `/` separators. Unique per build.
    pub relative_path: String,
    /// Path relative to the output root. Mirrors `relative_path`.
    pub output_path: PathBuf,
}

impl TemplateDescriptor {
    /// Build a descriptor from a path relative to the source root.
    pub fn new(relative: &Path) -> Self {
        let relative_path = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/");

        let output_path = relative_path.split('/').collect::<PathBuf>();

        Self {
            relative_path,
            output_path,
        }
    }

    /// Absolute location of the template.
    pub fn source_in(&self, source: &Path) -> PathBuf {
        source.join(&self.output_path)
    }

    /// Absolute location of the emitted page.
    pub fn output_in(&self, output: &Path) -> PathBuf {
        output.join(&self.output_path)
    }
}

/// Find every page template under `source`.
///
/// Anything below an `excluded` directory (partials, asset directories) is
/// skipped. Each entry may be relative to `source` or absolute. Symlinks are
/// followed. A missing or unreadable `source` yields an empty list. The
/// result is sorted by `relative_path`.
pub fn discover_templates(source: &Path, excluded: &[&Path]) -> Vec<TemplateDescriptor> {
    let excluded: Vec<&Path> = excluded
        .iter()
        .map(|&dir| dir.strip_prefix(source).unwrap_or(dir))
        .filter(|dir| !dir.as_os_str().is_empty())
        .collect();
    let is_excluded = |rel: &Path| excluded.iter().any(|dir| rel.starts_with(dir));

    let mut templates: Vec<_> = WalkDir::new(source)
        .follow_links(true)
        .into_iter()
        .filter_entry(|entry| {
            entry
                .path()
                .strip_prefix(source)
                .map_or(true, |rel| !is_excluded(rel))
        })
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "html"))
        .filter(|e| !is_ignored(e.file_name().to_str().unwrap_or_default()))
        .filter_map(|e| {
            e.path()
                .strip_prefix(source)
                .ok()
                .map(TemplateDescriptor::new)
        })
        .collect();

    templates.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    templates.dedup_by(|a, b| a.relative_path == b.relative_path);
    templates
}
