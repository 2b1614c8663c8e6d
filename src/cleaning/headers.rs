//! Heading deduplication.
//!
//! Article bodies often repeat the page title as an `<h1>` and start with
//! byline or timestamp headings. Both are noise once the title and byline
//! are reported separately.

use std::collections::BTreeSet;

use dom_query::{NodeRef, Selection};

use crate::dom::{self, StructuralPath};
use crate::options::ExtractionOptions;
use crate::patterns::{PREAMBLE_NOISE, PREAMBLE_NOISE_TOKENS};

/// Containment counts as a duplicate once either side is this long.
const CONTAINMENT_MIN_CHARS: usize = 24;
/// Token Jaccard at or above which a heading duplicates the title.
const TITLE_JACCARD: f64 = 0.85;

/// Lowercase, punctuation to spaces, whitespace collapsed.
fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn word_set(normalized: &str) -> BTreeSet<&str> {
    normalized.split(' ').filter(|w| !w.is_empty()).collect()
}

/// Whether a heading repeats the article title.
#[must_use]
pub fn duplicates_title(heading: &str, title: &str) -> bool {
    let heading = normalize(heading);
    let title = normalize(title);
    if heading.is_empty() || title.is_empty() {
        return false;
    }
    if heading == title {
        return true;
    }

    let long_enough =
        heading.chars().count() >= CONTAINMENT_MIN_CHARS || title.chars().count() >= CONTAINMENT_MIN_CHARS;
    if long_enough && (heading.contains(&title) || title.contains(&heading)) {
        return true;
    }

    let a = word_set(&heading);
    let b = word_set(&title);
    let union = a.union(&b).count();
    union > 0 && a.intersection(&b).count() as f64 / union as f64 >= TITLE_JACCARD
}

/// Whether a heading reads like a byline or timestamp.
///
/// Numbers count as noise tokens alongside the byline vocabulary.
#[must_use]
pub fn is_preamble_noise(heading: &str) -> bool {
    let trimmed = heading.trim();
    if trimmed.chars().count() <= 2 {
        return true;
    }
    if PREAMBLE_NOISE.is_match(trimmed) {
        return true;
    }

    let normalized = normalize(trimmed);
    let tokens: Vec<&str> = normalized.split(' ').filter(|w| !w.is_empty()).collect();
    if tokens.is_empty() {
        return true;
    }
    let noisy = tokens
        .iter()
        .filter(|t| PREAMBLE_NOISE_TOKENS.contains(t) || t.chars().all(|c| c.is_ascii_digit()))
        .count();
    noisy * 2 >= tokens.len()
}

fn is_empty_heading(sel: &Selection) -> bool {
    sel.text().trim().is_empty() && sel.select("img, picture, svg").is_empty()
}

/// Remove empty, title-duplicating and preamble headings (h1-h3).
///
/// Every decision is made against the tree as it was on entry; removals
/// happen afterwards.
pub fn dedupe_headers(root: &Selection, title: Option<&str>, options: &ExtractionOptions) {
    if !options.remove_title_headers && !options.remove_preamble_headers {
        return;
    }

    let first_paragraph = root.select("p").nodes().first().map(StructuralPath::of);
    let mut doomed: Vec<NodeRef> = Vec::new();

    for node in root.select("h1, h2, h3").nodes() {
        let heading = Selection::from(*node);
        if is_empty_heading(&heading) {
            doomed.push(*node);
            continue;
        }

        let text = dom::normalized_text(&heading);
        if options.remove_title_headers && title.is_some_and(|t| duplicates_title(&text, t)) {
            doomed.push(*node);
            continue;
        }

        if options.remove_preamble_headers {
            let precedes = first_paragraph.as_ref().is_some_and(|p| {
                let path = StructuralPath::of(node);
                path < *p && !path.is_ancestor_of(p)
            });
            if precedes && is_preamble_noise(&text) {
                doomed.push(*node);
            }
        }
    }

    tracing::trace!(removed = doomed.len(), "deduplicated headings");
    for node in doomed {
        Selection::from(node).remove();
    }
}
