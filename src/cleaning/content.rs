//! Content-root cleaning, run on the synthesized root after selection.

use dom_query::{NodeRef, Selection};

use super::{headers, lazy_media, tables};
use crate::dom;
use crate::options::ExtractionOptions;
use crate::patterns::{BLOCK_TAGS, CONTENT_JUNK_SUBSTRINGS, CONTENT_JUNK_TAGS, MEDIA_SELECTOR};

/// Run the seven content passes in their fixed order.
///
/// `title` is the resolved article title used for heading deduplication.
pub fn clean_content_root(root: &Selection, title: Option<&str>, options: &ExtractionOptions) {
    remove_junk_tags(root);
    remove_junk_classes(root);
    lazy_media::repair_lazy_media(root);
    tables::unwrap_layout_tables(root);
    remove_empty_paragraphs(root);
    unwrap_plain_wrappers(root);
    headers::dedupe_headers(root, title, options);
}

/// Forms, controls and page chrome tags.
pub fn remove_junk_tags(root: &Selection) {
    root.select(CONTENT_JUNK_TAGS).remove();
}

/// Whether `node` is one of the copied members of `root`, reached only
/// through the bare table scaffolding added around copied table parts.
fn is_member(node: &NodeRef, root: &NodeRef) -> bool {
    let mut parent = node.parent();
    while let Some(p) = parent {
        if p.id == root.id {
            return true;
        }
        if !dom::node_is(&p, &["table", "tbody", "tr"]) || !dom::has_no_attributes(&Selection::from(p)) {
            return false;
        }
        parent = p.parent();
    }
    false
}

/// Share bars, newsletter boxes, related links.
///
/// Members themselves are kept whatever their class; only elements inside
/// them are filtered.
pub fn remove_junk_classes(root: &Selection) {
    let Some(root_node) = root.nodes().first().copied() else {
        return;
    };
    for node in root.select("[class], [id]").nodes() {
        if is_member(node, &root_node) {
            continue;
        }
        let sel = Selection::from(*node);
        let class_and_id = dom::class_and_id(&sel).to_ascii_lowercase();
        if CONTENT_JUNK_SUBSTRINGS.iter().any(|junk| class_and_id.contains(junk)) {
            sel.remove();
        }
    }
}

/// Paragraphs with no text and nothing to show.
pub fn remove_empty_paragraphs(root: &Selection) {
    for node in root.select("p").nodes() {
        let p = Selection::from(*node);
        if p.text().trim().is_empty() && p.select(MEDIA_SELECTOR).is_empty() {
            p.remove();
        }
    }
}

fn block_selector() -> String {
    BLOCK_TAGS.join(", ")
}

/// Attribute-less `div`/`span` wrappers around inline content.
///
/// Walks in reverse document order so inner wrappers go first and an
/// outer wrapper is judged on what is left.
pub fn unwrap_plain_wrappers(root: &Selection) {
    let blocks = block_selector();
    let wrappers: Vec<NodeRef> = root.select("div, span").nodes().to_vec();

    for node in wrappers.iter().rev() {
        let sel = Selection::from(*node);
        if dom::has_no_attributes(&sel) && sel.select(&blocks).is_empty() {
            dom::unwrap(&sel);
        }
    }
}
