//! DOM Metadata Extraction
//!
//! Fallbacks read from the page body when the head carries no metadata.

use dom_query::{Document, Selection};

use super::meta_tags::validate_metadata_name;
use crate::dom;
use crate::patterns::BYLINE_SELECTOR;

/// Longest text accepted as a byline.
const MAX_BYLINE_CHARS: usize = 100;

/// Text of the `<title>` element, whitespace collapsed.
#[must_use]
pub fn examine_title_element(doc: &Document) -> Option<String> {
    let title = doc.select("head title");
    let title = if title.exists() { title } else { doc.select("title") };
    let text = dom::normalized_text(&title.first());
    (!text.is_empty()).then_some(text)
}

/// Text of the first non-empty `<h1>`.
#[must_use]
pub fn first_heading(doc: &Document) -> Option<String> {
    doc.select("h1")
        .iter()
        .map(|h1| dom::normalized_text(&h1))
        .find(|text| !text.is_empty())
}

/// Strip a leading "By" from a byline.
fn clean_byline(text: &str) -> String {
    let text = text.trim();
    let lower = text.to_ascii_lowercase();
    let stripped = ["written by ", "posted by ", "by "]
        .iter()
        .find(|prefix| lower.starts_with(*prefix))
        .map_or(text, |prefix| &text[prefix.len()..]);
    stripped.trim().to_string()
}

fn byline_from(sel: &Selection) -> Option<String> {
    let text = clean_byline(&dom::normalized_text(sel));
    let accepted = !text.is_empty() && text.chars().count() <= MAX_BYLINE_CHARS && validate_metadata_name(&text);
    accepted.then_some(text)
}

/// Text of the first `rel=author` link.
#[must_use]
pub fn rel_author(doc: &Document) -> Option<String> {
    doc.select("a[rel~='author'], link[rel~='author'][title]")
        .iter()
        .find_map(|sel| {
            if dom::tag_name(&sel).as_deref() == Some("link") {
                dom::non_empty_attribute(&sel, "title")
            } else {
                byline_from(&sel)
            }
        })
}

/// Text of the first byline-looking element in the body.
#[must_use]
pub fn byline_element(doc: &Document) -> Option<String> {
    doc.select("body").select(BYLINE_SELECTOR).iter().find_map(|sel| byline_from(&sel))
}
