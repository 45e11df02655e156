//! HTML minification for production builds.

use std::sync::LazyLock;

/// Shared `minify_html` settings.
///
/// Closing tags and the `<html>`/`<head>` openers are kept so pages stay
/// valid for tools that do not implement the HTML5 omission rules.
static CFG: LazyLock<minify_html::Cfg> = LazyLock::new(|| {
    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.keep_comments = false;
    cfg.minify_css = true;
    cfg.minify_js = true;
    cfg.remove_bangs = true;
    cfg.remove_processing_instructions = true;
    cfg
});

/// Minify an HTML document.
pub fn minify_html(html: &[u8]) -> String {
    let minified = minify_html::minify(html, &CFG);
    String::from_utf8(minified)
        .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned())
}
