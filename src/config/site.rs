//! `[site]` section configuration.
//!
//! Holds the metadata record that fills the `@@_*` placeholders of every page.
//! Every field is required: a missing key fails deserialization, so a broken
//! record is rejected before the build touches the filesystem.

use super::error::ConfigError;
use serde::{Deserialize, Serialize};

/// `[site]` section in weft.toml - page metadata.
///
/// # Example
/// ```toml
/// [site]
/// author = "Alice"
/// title = "My Site"
/// description = "A small static site"
/// keywords = "html,static"
///
/// [site.og]
/// locale = "en_US"
/// url = "https://example.com/index.html"
/// type = "website"
///
/// [site.og.img]
/// url = "https://example.com/og.jpg"
/// type = "image/jpeg"
/// width = "1280"
/// height = "720"
/// alt = "alternate text"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteMetadata {
    /// Author name for `<meta name="author">`.
    pub author: String,

    /// Page title.
    pub title: String,

    /// Description for `<meta name="description">`.
    pub description: String,

    /// Comma separated keyword list.
    pub keywords: String,

    /// Open Graph record.
    pub og: OpenGraph,
}

/// `[site.og]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpenGraph {
    pub locale: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub img: OgImage,
}

/// `[site.og.img]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OgImage {
    pub url: String,
    /// MIME type, e.g. `image/jpeg`.
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Pixel width, kept as text since it is pasted into markup verbatim.
    pub width: String,
    pub height: String,
    pub alt: String,
}

impl Default for SiteMetadata {
    fn default() -> Self {
        Self {
            author: "<YOUR_NAME>".into(),
            title: "My Site".into(),
            description: "A site built with weft".into(),
            keywords: "html,static".into(),
            og: OpenGraph {
                locale: "en_US".into(),
                url: "https://example.com/index.html".into(),
                kind: "website".into(),
                img: OgImage {
                    url: "https://example.com/og.jpg".into(),
                    mime_type: "image/jpeg".into(),
                    width: "1280".into(),
                    height: "720".into(),
                    alt: "alternate text".into(),
                },
            },
        }
    }
}

impl SiteMetadata {
    /// Reject records that would render broken markup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::Validation(
                "[site.title] must not be empty".into(),
            ));
        }

        for (field, value) in [
            ("[site.og.img.width]", &self.og.img.width),
            ("[site.og.img.height]", &self.og.img.height),
        ] {
            if !value.is_empty() && !is_positive_integer(value) {
                return Err(ConfigError::Validation(format!(
                    "{field} must be a positive integer, got `{value}`"
                )));
            }
        }

        Ok(())
    }
}

/// Plain decimal digits, no sign, greater than zero.
fn is_positive_integer(value: &str) -> bool {
    value.bytes().all(|b| b.is_ascii_digit()) && value.parse::<u32>().is_ok_and(|n| n > 0)
}
