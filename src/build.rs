//! Site building orchestration.
//!
//! One synchronous pass per build. Each stage logs a checkpoint.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── AssetCopyDecision::evaluate()  ──► [start]
//!     │       (fixed before any output exists)
//!     │
//!     ├── discover_templates()           ──► [discover]
//!     │       (partials and scheduled asset dirs pruned)
//!     │
//!     ├── prepare_output()
//!     │       (cleared in production or with --clean)
//!     │
//!     ├── emit_pages()
//!     │
//!     ├── substitute_pages()
//!     │       (all pages exist before any is rewritten)
//!     │
//!     └── copy_dir() per scheduled task  ──► [assets], [build]
//! ```

use crate::{
    compiler::{
        AssetCopyDecision, SubstitutionRule, copy_dir, discover_templates, emit_pages,
        substitute_pages,
    },
    config::SiteConfig,
    log,
};
use anyhow::{Context, Result};
use std::{fs, path::Path};

/// Summary of a finished build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Pages emitted.
    pub pages: usize,
    /// Pages whose content changed during substitution.
    pub substituted: usize,
    /// Asset directories copied.
    pub asset_dirs: usize,
    /// Files copied across all asset directories.
    pub asset_files: usize,
}

/// Build the entire site.
///
/// `config` must already be validated: the substitution rules are derived
/// from it before any file is written.
pub fn build_site(config: &SiteConfig) -> Result<BuildReport> {
    let build = &config.build;
    let source = &build.source;
    let output = &build.output;

    let decision = AssetCopyDecision::evaluate(source, &build.assets);
    let rules = SubstitutionRule::from_metadata(&config.site, build.normalize_paths);

    log!(
        "start";
        "{} build, libs: {}, font: {}",
        build.mode,
        yes_no(decision.has_libs),
        yes_no(decision.has_font)
    );

    if !source.is_dir() {
        log!("warn"; "source directory {} not found", source.display());
    }
    // asset directories are copied verbatim, never discovered as pages
    let tasks = decision.tasks(source, output, &build.assets);
    let partials = config.partials_dir();
    let excluded: Vec<&Path> = std::iter::once(partials.as_path())
        .chain(tasks.iter().map(|task| task.from.as_path()))
        .collect();

    let templates = discover_templates(source, &excluded);
    log!(
        "discover";
        "{} templates in {}",
        templates.len(),
        display_rel(source, config.get_root())
    );

    for task in &tasks {
        log!("assets"; "scheduled {}/", task.name);
    }

    prepare_output(output, build.should_clean())?;

    emit_pages(&templates, source, output)?;
    let substituted = substitute_pages(&templates, output, &rules, build.should_minify())?;

    let mut asset_files = 0;
    for task in &tasks {
        let copied = copy_dir(task).with_context(|| format!("Failed to copy {}/", task.name))?;
        log!("assets"; "copied {}/ ({} files)", task.name, copied);
        asset_files += copied;
    }

    let report = BuildReport {
        pages: templates.len(),
        substituted,
        asset_dirs: tasks.len(),
        asset_files,
    };

    if report.pages == 0 {
        log!("warn"; "no pages emitted, check that the source has .html files");
    }
    log!(
        "build";
        "done: {} pages ({} substituted), {} asset dirs ({} files)",
        report.pages,
        report.substituted,
        report.asset_dirs,
        report.asset_files
    );

    Ok(report)
}

/// Ensure output directory exists, removing all existing content first when `clean` is set.
fn prepare_output(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clear output directory: {}", output.display()))?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))
}

const fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

/// `root/src` → `src/`
fn display_rel(path: &Path, root: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    format!("{}/", rel.display())
}
