//! Metadata extraction module.
//!
//! Title, byline and excerpt each come from a priority-ordered fallback
//! chain over the head metadata and the body.

pub mod dom_extraction;
pub mod meta_tags;

use dom_query::Document;
use url::Url;

use crate::result::Metadata;
use crate::url_utils;

pub use dom_extraction::{byline_element, examine_title_element, first_heading, rel_author};
pub use meta_tags::{meta_content, validate_metadata_name};

/// Extract title, byline and excerpt from a document.
///
/// Chains:
/// 1. title: `og:title`, `<title>`, first `<h1>`
/// 2. byline: author meta, `rel=author` text, byline-like element
/// 3. excerpt: `description`, `og:description`
///
/// The URL host, the last title fallback, is applied by [`resolve_title`].
#[must_use]
pub fn extract_metadata(doc: &Document) -> Metadata {
    let title = meta_content(doc, meta_tags::TITLE_KEYS)
        .or_else(|| examine_title_element(doc))
        .or_else(|| first_heading(doc));

    let byline = meta_content(doc, meta_tags::AUTHOR_KEYS)
        .filter(|author| validate_metadata_name(author))
        .or_else(|| rel_author(doc))
        .or_else(|| byline_element(doc));

    let excerpt = meta_content(doc, meta_tags::DESCRIPTION_KEYS);

    post_process_metadata(Metadata { title, byline, excerpt })
}

/// Trim every field and drop the ones left empty.
fn post_process_metadata(metadata: Metadata) -> Metadata {
    let clean = |field: Option<String>| {
        field
            .map(|value| value.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|value| !value.is_empty())
    };
    Metadata {
        title: clean(metadata.title),
        byline: clean(metadata.byline),
        excerpt: clean(metadata.excerpt),
    }
}

/// Final title: the extracted one, else the URL host, else the URL itself.
#[must_use]
pub fn resolve_title(title: Option<String>, url: &Url) -> String {
    title
        .filter(|t| !t.trim().is_empty())
        .or_else(|| url_utils::host(url))
        .unwrap_or_else(|| url.to_string())
}
