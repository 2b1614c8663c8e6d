//! # rs-readability
//!
//! Heuristic main-content extraction for web pages.
//!
//! Given the HTML of an article page and its URL, this library finds the
//! main article content, strips navigation, ads and other boilerplate, and
//! returns cleaned markup and plain text together with the title, byline,
//! excerpt, lead image and (for paginated articles) the next page URL.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_readability::extract;
//! use url::Url;
//!
//! let html = r#"<html><head><title>Harbour dredging approved</title></head>
//! <body><nav><a href="/">Home</a></nav><div class="story">
//! <p>The harbour board met on Monday, heard from fishermen, and agreed to dredge the channel.</p>
//! <p>Work starts in September, before the winter storms, and should take six weeks.</p>
//! </div></body></html>"#;
//!
//! let url = Url::parse("https://example.com/news/harbour")?;
//! let article = extract(html, &url)?;
//! println!("Title: {}", article.title);
//! println!("Content: {}", article.text_content);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Features
//!
//! - **Content Scoring**: Paragraph scores propagate to ancestors, adjusted
//!   by class/id weight, link density and fixed-position chrome
//! - **Clustering**: Several compatible high-scoring regions merge into one
//!   content root
//! - **Cleaning**: Layout tables, lazy-loaded media, empty wrappers and
//!   headings that repeat the title are handled
//! - **Domain Rules**: Per-site selectors and score adjustments loaded from JSON
//! - **Loaders**: Plug in any HTML source; `HttpLoader` behind the `fetch`
//!   feature

mod error;
mod extract;
mod loader;
mod options;
mod patterns;
mod result;
mod rules;

/// DOM helpers over `dom_query`: attributes, text, structural paths, deep copies.
pub mod dom;

/// Element tree utilities.
pub mod etree;

/// Candidate collection and score propagation.
pub mod candidates;

/// Candidate clustering and content root synthesis.
pub mod cluster;

/// Document-level and content-level cleaning passes.
pub mod cleaning;

/// Paragraph, class/id and chrome scoring heuristics.
pub mod scoring;

/// Link density testing for boilerplate detection.
pub mod link_density;

/// Title, byline and excerpt extraction (meta tags and DOM fallbacks).
pub mod metadata;

/// Lead image selection.
pub mod lead_image;

/// Next-page link detection.
pub mod pagination;

/// URL utilities for validation, resolution, and normalization.
pub mod url_utils;

/// Character encoding detection and transcoding.
pub mod encoding;

// Public API - re-exports
pub use candidates::ScoreAdjustment;
pub use error::{Error, Result};
#[cfg(feature = "fetch")]
pub use loader::HttpLoader;
pub use loader::HtmlLoader;
pub use options::ExtractionOptions;
pub use result::{Article, Metadata};
pub use rules::{DomainRules, MetadataOverride, RuleRegistry, SelectorAdjustment, SiteRule};

use url::Url;

/// Extracts the article from an HTML document using default options.
///
/// # Arguments
///
/// * `html` - The HTML document as a string slice
/// * `url` - The page URL; relative links and images resolve against it
///
/// # Returns
///
/// Returns `Ok(Article)` on success. Returns `Error::EmptyHtml` for blank
/// input and `Error::NoReadableContent` when no region qualifies.
///
/// # Example
///
/// ```rust
/// use rs_readability::{extract, Error};
/// use url::Url;
///
/// let url = Url::parse("https://example.com/").unwrap();
/// let result = extract("<html><body><p>Too short.</p></body></html>", &url);
/// assert!(matches!(result, Err(Error::NoReadableContent)));
/// ```
pub fn extract(html: &str, url: &Url) -> Result<Article> {
    extract_with_options(html, url, &ExtractionOptions::default())
}

/// Extracts the article from an HTML document with custom options.
///
/// # Example
///
/// ```rust
/// use rs_readability::{extract_with_options, Error, ExtractionOptions};
/// use url::Url;
///
/// let options = ExtractionOptions {
///     use_clustering: false,
///     detect_next_page: false,
///     ..ExtractionOptions::default()
/// };
/// let url = Url::parse("https://example.com/").unwrap();
/// let result = extract_with_options("<html><body></body></html>", &url, &options);
/// assert!(matches!(result, Err(Error::NoReadableContent)));
/// ```
pub fn extract_with_options(html: &str, url: &Url, options: &ExtractionOptions) -> Result<Article> {
    extract::extract_document(html, url, options, None)
}

/// Extracts the article, consulting `rules` for site-specific overrides.
///
/// Rules are only used when [`DomainRules::matches`] accepts `url`.
///
/// # Example
///
/// ```rust
/// use rs_readability::{extract_with_rules, ExtractionOptions, RuleRegistry};
/// use url::Url;
///
/// let rules = RuleRegistry::from_json(r#"[{"domains": ["example.com"], "content_selectors": [".story"]}]"#)?;
/// let html = r#"<html><body><div class="story"><p>A paragraph long enough to stand on its own as the article, with commas, clauses, and detail.</p></div></body></html>"#;
/// let url = Url::parse("https://example.com/story")?;
/// let article = extract_with_rules(html, &url, &ExtractionOptions::default(), &rules)?;
/// assert!(article.text_content.contains("stand on its own"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn extract_with_rules(
    html: &str,
    url: &Url,
    options: &ExtractionOptions,
    rules: &dyn DomainRules,
) -> Result<Article> {
    extract::extract_document(html, url, options, Some(rules))
}

/// Extracts the article from HTML bytes with automatic encoding detection.
///
/// The encoding is detected from a byte order mark or a `<meta charset>`
/// declaration, defaulting to UTF-8. Invalid sequences are replaced with
/// U+FFFD rather than causing errors.
///
/// # Example
///
/// ```rust
/// use rs_readability::{extract_bytes, ExtractionOptions};
/// use url::Url;
///
/// let html = b"<html><head><meta charset=\"ISO-8859-1\"></head><body><p>Caf\xE9 owners on the quay say trade has doubled since the ferry, the market, and the festival returned.</p></body></html>";
/// let url = Url::parse("https://example.com/")?;
/// let article = extract_bytes(html, &url, &ExtractionOptions::default())?;
/// assert!(article.text_content.contains("Café"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn extract_bytes(html: &[u8], url: &Url, options: &ExtractionOptions) -> Result<Article> {
    let html_str = encoding::transcode_to_utf8(html);
    extract_with_options(&html_str, url, options)
}

/// Fetches `url` with `loader` and extracts its article.
///
/// Loader errors are returned unchanged; extraction only starts once the
/// whole page has been loaded.
pub async fn extract_url<L: HtmlLoader>(
    loader: &L,
    url: &Url,
    options: &ExtractionOptions,
    rules: Option<&dyn DomainRules>,
) -> Result<Article> {
    let html = loader.fetch_html(url).await?;
    extract::extract_document(&html, url, options, rules)
}
