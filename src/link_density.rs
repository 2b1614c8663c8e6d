//! Link Density
//!
//! Ratio of anchor text to total text. Navigation blocks, tag clouds and
//! "related" lists are link-heavy; article prose is not.

use dom_query::Selection;

/// Collect the character count of all non-empty link texts in `element`.
fn link_text_length(element: &Selection) -> usize {
    let mut link_length = 0;
    for link in element.select("a").iter() {
        let text = link.text();
        link_length += text.trim().chars().count();
    }
    link_length
}

/// Anchor text length divided by total text length, in `[0, 1]`.
///
/// Returns `0.0` for elements without text.
#[must_use]
pub fn link_density(element: &Selection) -> f64 {
    let text = element.text();
    let text_length = text.trim().chars().count();
    if text_length == 0 {
        return 0.0;
    }

    let ratio = link_text_length(element) as f64 / text_length as f64;
    ratio.clamp(0.0, 1.0)
}
