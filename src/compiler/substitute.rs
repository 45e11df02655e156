//! Placeholder substitution.
//!
//! Templates carry literal `@@_<field>` tokens that are replaced with site
//! metadata after every page has been emitted. Tokens are plain strings, not
//! patterns. The rule list is built once per build and applied in order;
//! the path rule `="/./"` → `="/"` always runs last.
//!
//! | Token              | Field                  |
//! |--------------------|------------------------|
//! | `@@_author`        | `site.author`          |
//! | `@@_title`         | `site.title`           |
//! | `@@_description`   | `site.description`     |
//! | `@@_keywords`      | `site.keywords`        |
//! | `@@_og_locale`     | `site.og.locale`       |
//! | `@@_og_url`        | `site.og.url`          |
//! | `@@_og_type`       | `site.og.type`         |
//! | `@@_og_img_url`    | `site.og.img.url`      |
//! | `@@_og_img_type`   | `site.og.img.type`     |
//! | `@@_og_img_width`  | `site.og.img.width`    |
//! | `@@_og_img_height` | `site.og.img.height`   |
//! | `@@_og_img_alt`    | `site.og.img.alt`      |

use crate::config::SiteMetadata;
use std::borrow::Cow;

/// Token rewritten by the path normalization rule.
pub const DOT_SEGMENT_TOKEN: &str = r#"="/./"#;
/// Replacement for [`DOT_SEGMENT_TOKEN`].
pub const DOT_SEGMENT_REPLACEMENT: &str = r#"="/"#;

/// A literal find-and-replace pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionRule {
    pub token: Cow<'static, str>,
    pub replacement: String,
}

impl SubstitutionRule {
    pub fn new(token: impl Into<Cow<'static, str>>, replacement: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            replacement: replacement.into(),
        }
    }

    /// The structural rule collapsing `="/./` at the start of an attribute value.
    pub fn dot_segment() -> Self {
        Self::new(DOT_SEGMENT_TOKEN, DOT_SEGMENT_REPLACEMENT)
    }

    /// Build the ordered rule list for a site.
    ///
    /// Metadata rules come first in table order; the dot-segment rule is
    /// appended when `normalize_paths` is set.
    pub fn from_metadata(site: &SiteMetadata, normalize_paths: bool) -> Vec<Self> {
        let og = &site.og;
        let img = &og.img;

        let mut rules: Vec<Self> = [
            ("@@_author", &site.author),
            ("@@_title", &site.title),
            ("@@_description", &site.description),
            ("@@_keywords", &site.keywords),
            ("@@_og_locale", &og.locale),
            ("@@_og_url", &og.url),
            ("@@_og_type", &og.kind),
            ("@@_og_img_url", &img.url),
            ("@@_og_img_type", &img.mime_type),
            ("@@_og_img_width", &img.width),
            ("@@_og_img_height", &img.height),
            ("@@_og_img_alt", &img.alt),
        ]
        .into_iter()
        .map(|(token, value)| Self::new(token, value.as_str()))
        .collect();

        if normalize_paths {
            rules.push(Self::dot_segment());
        }
        rules
    }

    /// Replace every non-overlapping occurrence of the token.
    pub fn apply<'a>(&self, text: Cow<'a, str>) -> Cow<'a, str> {
        if self.token.is_empty() || !text.contains(self.token.as_ref()) {
            return text;
        }
        Cow::Owned(text.replace(self.token.as_ref(), &self.replacement))
    }
}

/// Apply `rules` to `text` in order.
///
/// Returns the input borrowed when no token occurs.
pub fn substitute<'a>(text: &'a str, rules: &[SubstitutionRule]) -> Cow<'a, str> {
    rules
        .iter()
        .fold(Cow::Borrowed(text), |acc, rule| rule.apply(acc))
}
