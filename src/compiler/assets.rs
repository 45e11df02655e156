//! Auxiliary asset directories.
//!
//! `libs` (third-party bundles) and `font` are copied verbatim to the output
//! root when present. Presence is checked once, before the output directory
//! is touched, and the resulting schedule is fixed for the rest of the build.

use super::collect_all_files;
use crate::config::AssetsConfig;
use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Which asset directories a build copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AssetCopyDecision {
    pub has_libs: bool,
    pub has_font: bool,
}

/// A scheduled recursive copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyTask {
    /// Directory name used in logs.
    pub name: String,
    pub from: PathBuf,
    pub to: PathBuf,
}

impl AssetCopyDecision {
    /// Inspect `source` for the configured asset directories.
    ///
    /// A directory counts only when it exists and its copy toggle is on.
    pub fn evaluate(source: &Path, assets: &AssetsConfig) -> Self {
        Self {
            has_libs: assets.copy_libs && source.join(&assets.libs).is_dir(),
            has_font: assets.copy_font && source.join(&assets.font).is_dir(),
        }
    }

    /// Copy tasks for this decision, `libs` first.
    pub fn tasks(&self, source: &Path, output: &Path, assets: &AssetsConfig) -> Vec<CopyTask> {
        [
            (self.has_libs, &assets.libs),
            (self.has_font, &assets.font),
        ]
        .into_iter()
        .filter(|(present, _)| *present)
        .map(|(_, dir)| CopyTask {
            name: dir.display().to_string(),
            from: source.join(dir),
            to: output.join(dir),
        })
        .collect()
    }
}

/// Recursively copy the contents of `task.from` into `task.to`.
///
/// Returns the number of files copied. Symlinked entries are copied as
/// regular files. Any walk or I/O error aborts the copy.
pub fn copy_dir(task: &CopyTask) -> Result<usize> {
    fs::create_dir_all(&task.to)
        .with_context(|| format!("Failed to create {}", task.to.display()))?;

    let files = collect_all_files(&task.from)?;
    for file in &files {
        let rel = file.strip_prefix(&task.from)?;
        let dest = task.to.join(rel);

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::copy(file, &dest).with_context(|| {
            format!("Failed to copy {} to {}", file.display(), dest.display())
        })?;
    }

    Ok(files.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn schedule(source: &Path, assets: &AssetsConfig) -> Vec<CopyTask> {
        AssetCopyDecision::evaluate(source, assets).tasks(source, Path::new("/out"), assets)
    }

    #[test]
    fn test_neither_present() {
        let dir = tempdir().unwrap();
        let assets = AssetsConfig::default();

        let decision = AssetCopyDecision::evaluate(dir.path(), &assets);
        assert_eq!(decision, AssetCopyDecision::default());
        assert!(schedule(dir.path(), &assets).is_empty());
    }

    #[test]
    fn test_only_libs_present() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("libs")).unwrap();

        let tasks = schedule(dir.path(), &AssetsConfig::default());
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].name, "libs");
        assert_eq!(tasks[0].from, dir.path().join("libs"));
        assert_eq!(tasks[0].to, Path::new("/out/libs"));
    }

    #[test]
    fn test_both_present() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("libs")).unwrap();
        fs::create_dir(dir.path().join("font")).unwrap();

        let tasks = schedule(dir.path(), &AssetsConfig::default());
        let names: Vec<_> = tasks.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["libs", "font"]);
    }

    #[test]
    fn test_file_named_like_dir_ignored() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("font"), "not a directory").unwrap();

        let decision = AssetCopyDecision::evaluate(dir.path(), &AssetsConfig::default());
        assert!(!decision.has_font);
    }

    #[test]
    fn test_toggle_disables_copy() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("libs")).unwrap();
        fs::create_dir(dir.path().join("font")).unwrap();

        let assets = AssetsConfig {
            copy_libs: false,
            ..AssetsConfig::default()
        };
        let tasks = schedule(dir.path(), &assets);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].name, "font");
    }

    #[test]
    fn test_custom_dir_names() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("vendor")).unwrap();

        let assets = AssetsConfig {
            libs: "vendor".into(),
            ..AssetsConfig::default()
        };
        let tasks = schedule(dir.path(), &assets);
        assert_eq!(tasks[0].to, Path::new("/out/vendor"));
    }

    #[test]
    fn test_decision_is_a_snapshot() {
        let dir = tempdir().unwrap();
        let assets = AssetsConfig::default();
        let decision = AssetCopyDecision::evaluate(dir.path(), &assets);

        fs::create_dir(dir.path().join("libs")).unwrap();
        assert!(decision.tasks(dir.path(), Path::new("/out"), &assets).is_empty());
    }

    #[test]
    fn test_copy_dir_recursive() {
        let dir = tempdir().unwrap();
        let from = dir.path().join("src/libs");
        write(&from, "jquery/jquery.min.js", "js");
        write(&from, "swiper/css/swiper.css", "css");
        write(&from, "readme.html", "@@_title");

        let task = CopyTask {
            name: "libs".into(),
            from,
            to: dir.path().join("dist/libs"),
        };
        assert_eq!(copy_dir(&task).unwrap(), 3);

        let to = &task.to;
        assert_eq!(fs::read_to_string(to.join("jquery/jquery.min.js")).unwrap(), "js");
        assert_eq!(fs::read_to_string(to.join("swiper/css/swiper.css")).unwrap(), "css");
        // copied verbatim, no substitution
        assert_eq!(fs::read_to_string(to.join("readme.html")).unwrap(), "@@_title");
    }

    #[test]
    fn test_copy_dir_empty_source() {
        let dir = tempdir().unwrap();
        let from = dir.path().join("font");
        fs::create_dir(&from).unwrap();

        let task = CopyTask {
            name: "font".into(),
            from,
            to: dir.path().join("out/font"),
        };
        assert_eq!(copy_dir(&task).unwrap(), 0);
        assert!(task.to.is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_dir_symlinked_file() {
        let dir = tempdir().unwrap();
        let from = dir.path().join("src/libs");
        fs::create_dir_all(&from).unwrap();
        write(dir.path(), "vendor/app.js", "app");
        std::os::unix::fs::symlink(dir.path().join("vendor/app.js"), from.join("app.js")).unwrap();

        let task = CopyTask {
            name: "libs".into(),
            from,
            to: dir.path().join("dist/libs"),
        };
        assert_eq!(copy_dir(&task).unwrap(), 1);
        assert_eq!(fs::read_to_string(task.to.join("app.js")).unwrap(), "app");
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_dir_walk_error_fails() {
        let dir = tempdir().unwrap();
        let from = dir.path().join("libs");
        write(&from, "a.js", "a");
        std::os::unix::fs::symlink(&from, from.join("loop")).unwrap();

        let task = CopyTask {
            name: "libs".into(),
            from,
            to: dir.path().join("dist/libs"),
        };
        assert!(copy_dir(&task).is_err());
    }

    #[test]
    fn test_copy_dir_blocked_destination_fails() {
        let dir = tempdir().unwrap();
        let from = dir.path().join("font");
        write(&from, "a.woff2", "font");
        // a file where the destination directory should go
        fs::write(dir.path().join("blocked"), "").unwrap();

        let task = CopyTask {
            name: "font".into(),
            from,
            to: dir.path().join("blocked"),
        };
        assert!(copy_dir(&task).is_err());
    }
}
