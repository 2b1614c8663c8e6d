//! Result types for extraction output.

use serde::Serialize;

/// The extracted article.
///
/// Created once at the end of a successful extraction and never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    /// Absolute URL of the page the article was extracted from.
    pub url: String,

    /// Article title. Never empty: falls back to the URL host.
    pub title: String,

    /// Author line, if one was found.
    pub byline: Option<String>,

    /// Short summary: the page description, or the start of the text.
    pub excerpt: Option<String>,

    /// Cleaned content markup (outer HTML of the content root).
    pub content_html: String,

    /// Plain text of the content root, one block per line.
    pub text_content: String,

    /// Representative image, resolved to an absolute URL.
    pub lead_image_url: Option<String>,

    /// Absolute URL of the next page when the article is paginated.
    pub next_page_url: Option<String>,
}

/// Metadata collected from the page head and DOM fallbacks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    /// Page title.
    pub title: Option<String>,

    /// Author line.
    pub byline: Option<String>,

    /// Page description.
    pub excerpt: Option<String>,
}
