//! Document-level cleaning, run on the parsed page before candidate
//! selection.

use std::cmp::Reverse;

use dom_query::{Document, NodeRef, Selection};

use crate::dom;
use crate::options::ExtractionOptions;
use crate::patterns::{DOCUMENT_NEGATIVE_SUBSTRINGS, DOCUMENT_POSITIVE_SUBSTRINGS, DOUBLE_BR};
use crate::scoring::is_visible;

/// Tags removed from every document regardless of options.
const ALWAYS_REMOVED: &str = "script, style, noscript, template, link[rel='stylesheet']";

/// Run the four document passes in order.
pub fn clean_document(doc: &Document, options: &ExtractionOptions) {
    remove_non_content_tags(doc, options);
    collapse_double_breaks(doc);
    remove_negative_elements(doc);
    remove_hidden_elements(doc);
}

fn removal_selector(options: &ExtractionOptions) -> String {
    let mut selector = String::from(ALWAYS_REMOVED);
    if !options.keep_iframes {
        selector.push_str(", iframe");
    }
    if !options.keep_videos {
        selector.push_str(", video");
    }
    if !options.keep_audio {
        selector.push_str(", audio");
    }
    selector
}

/// Pass 1: scripts, styles and the media the options exclude.
///
/// `<source>` children go with their `<video>` / `<audio>` parent.
pub fn remove_non_content_tags(doc: &Document, options: &ExtractionOptions) {
    let removed = doc.select(&removal_selector(options));
    tracing::trace!(count = removed.length(), "removed non-content tags");
    removed.remove();
}

/// Next sibling that is not whitespace-only text, if it is an element.
fn next_significant_sibling<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    let mut current = node.next_sibling();
    while let Some(sibling) = current {
        if sibling.is_text() && sibling.text().trim().is_empty() {
            current = sibling.next_sibling();
            continue;
        }
        return sibling.is_element().then_some(sibling);
    }
    None
}

/// Pass 2: runs of two or more `<br>` become paragraph breaks.
///
/// Everything after a run is wrapped in its own `<p>`. A `<p>` parent is
/// split into sibling paragraphs instead of nesting them.
pub fn collapse_double_breaks(doc: &Document) {
    let mut parents: Vec<NodeRef> = Vec::new();
    for br in doc.select("br").nodes() {
        let run = next_significant_sibling(br).is_some_and(|next| dom::node_is(&next, &["br"]));
        if !run {
            continue;
        }
        if let Some(parent) = dom::element_parent(br) {
            if !parents.iter().any(|p| p.id == parent.id) {
                parents.push(parent);
            }
        }
    }

    // Innermost parents first, so rewriting an outer parent never
    // invalidates one still waiting.
    parents.sort_by_key(|p| Reverse(dom::depth(p)));

    for parent in &parents {
        let sel = Selection::from(*parent);
        let html = sel.inner_html().to_string();
        let segments: Vec<&str> = DOUBLE_BR.split(&html).collect();
        if segments.len() < 2 {
            continue;
        }

        if dom::node_is(parent, &["p"]) {
            let replacement: String = segments
                .iter()
                .filter(|segment| !segment.trim().is_empty())
                .map(|segment| format!("<p>{segment}</p>"))
                .collect();
            sel.replace_with_html(replacement);
        } else {
            let mut rewritten = segments[0].to_string();
            for segment in &segments[1..] {
                if !segment.trim().is_empty() {
                    rewritten.push_str(&format!("<p>{segment}</p>"));
                }
            }
            sel.set_html(rewritten);
        }
    }
    tracing::trace!(parents = parents.len(), "collapsed <br> runs");
}

/// Negative id/class substring without a positive one.
fn is_negative_block(class_and_id: &str) -> bool {
    let lower = class_and_id.to_ascii_lowercase();
    DOCUMENT_NEGATIVE_SUBSTRINGS.iter().any(|neg| lower.contains(neg))
        && !DOCUMENT_POSITIVE_SUBSTRINGS.iter().any(|pos| lower.contains(pos))
}

/// Pass 3: comment threads, share bars, promos and the like.
pub fn remove_negative_elements(doc: &Document) {
    let mut removed = 0;
    for node in doc.select("[class], [id]").nodes() {
        if dom::node_is(node, &["html", "body"]) {
            continue;
        }
        let sel = Selection::from(*node);
        if is_negative_block(&dom::class_and_id(&sel)) {
            sel.remove();
            removed += 1;
        }
    }
    tracing::trace!(removed, "removed negative class/id elements");
}

/// Pass 4: elements that fail the visibility predicate.
pub fn remove_hidden_elements(doc: &Document) {
    let hidden: Vec<NodeRef> = doc
        .select("body *")
        .nodes()
        .iter()
        .filter(|node| !is_visible(node))
        .copied()
        .collect();

    for node in &hidden {
        Selection::from(*node).remove();
    }
    tracing::trace!(removed = hidden.len(), "removed hidden elements");
}
