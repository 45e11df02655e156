//! Page emission and post-processing.
//!
//! Emission copies each template byte-for-byte into the output tree. Once
//! every page exists, [`substitute_pages`] rewrites them in place. Keeping
//! the two passes separate means a page is never half-written when a later
//! template fails to emit.

use super::{SubstitutionRule, TemplateDescriptor, substitute};
use crate::utils::minify::minify_html;
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::{borrow::Cow, fs, path::Path};

/// Write every template into `output`, preserving its relative path.
pub fn emit_pages(templates: &[TemplateDescriptor], source: &Path, output: &Path) -> Result<()> {
    templates.par_iter().try_for_each(|template| {
        let from = template.source_in(source);
        let to = template.output_in(output);

        if let Some(parent) = to.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::copy(&from, &to).with_context(|| {
            format!("Failed to emit {} to {}", template.relative_path, to.display())
        })?;
        Ok(())
    })
}

/// Apply `rules` to every emitted page, optionally minifying the result.
///
/// Returns the number of pages whose content changed.
pub fn substitute_pages(
    templates: &[TemplateDescriptor],
    output: &Path,
    rules: &[SubstitutionRule],
    minify: bool,
) -> Result<usize> {
    let changed = templates
        .par_iter()
        .map(|template| -> Result<bool> {
            let path = template.output_in(output);
            let html = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;

            let mut page = substitute(&html, rules);
            if minify {
                page = Cow::Owned(minify_html(page.as_bytes()));
            }

            if page == html {
                return Ok(false);
            }
            fs::write(&path, page.as_bytes())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            Ok(true)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(changed.into_iter().filter(|&c| c).count())
}
