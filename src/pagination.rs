//! Next-Page Detection
//!
//! Scores `<link rel=next>` and every anchor on the page as a possible
//! "next page" of a paginated article. Scores for links that normalize to
//! the same path and query add up, so a pager repeated at the top and
//! bottom of the article counts twice.

use std::collections::HashMap;

use dom_query::{Document, NodeRef, Selection};
use url::Url;

use crate::dom::{self, StructuralPath};
use crate::link_density::link_density;
use crate::options::ExtractionOptions;
use crate::patterns::{NEXT_LABEL, PAGINATION_HREF, PAGINATION_NEGATIVE_CONTAINER, STORY_SWITCH_LABEL};
use crate::url_utils;

const REL_NEXT: f64 = 0.9;
const NEXT_LABEL_BONUS: f64 = 0.45;
const STORY_SWITCH_PENALTY: f64 = -0.7;
const PAGINATION_HREF_BONUS: f64 = 0.35;
const CROSS_HOST_PENALTY: f64 = -0.8;
const SAME_PAGE_PENALTY: f64 = -1.2;
const NEGATIVE_CONTAINER_PENALTY: f64 = -0.45;
const LINK_HEAVY_PENALTY: f64 = -0.35;
const DISTANCE_PENALTY: f64 = -0.35;

/// Link density of the parent above which an anchor is penalized.
const LINK_HEAVY_DENSITY: f64 = 0.8;

/// Accumulated score for one normalized target.
struct Target {
    url: Url,
    score: f64,
}

fn has_rel_next(sel: &Selection) -> bool {
    dom::get_attribute(sel, "rel")
        .is_some_and(|rel| rel.split_whitespace().any(|token| token.eq_ignore_ascii_case("next")))
}

/// Tree hops from `anchor` to the nearest content element, through their
/// lowest common ancestor.
fn distance_to_content(anchor: &StructuralPath, content: &[StructuralPath]) -> Option<usize> {
    content
        .iter()
        .map(|root| {
            let common = anchor.common_prefix_len(root);
            (anchor.len() - common) + (root.len() - common)
        })
        .min()
}

/// Signals that only make sense for anchors in the body.
fn anchor_signals(node: &NodeRef, content: &[StructuralPath], options: &ExtractionOptions) -> f64 {
    let anchor = Selection::from(*node);
    let label = dom::normalized_text(&anchor);
    let mut score = 0.0;

    if NEXT_LABEL.is_match(&label) {
        score += NEXT_LABEL_BONUS;
    }
    if STORY_SWITCH_LABEL.is_match(&label) {
        score += STORY_SWITCH_PENALTY;
    }

    if let Some(parent) = dom::element_parent(node) {
        let parent = Selection::from(parent);
        if PAGINATION_NEGATIVE_CONTAINER.is_match(&dom::class_and_id(&parent)) {
            score += NEGATIVE_CONTAINER_PENALTY;
        }
        if link_density(&parent) > LINK_HEAVY_DENSITY {
            score += LINK_HEAVY_PENALTY;
        }
    }

    let path = StructuralPath::of(node);
    if distance_to_content(&path, content).is_some_and(|d| d > options.max_pagination_distance_from_root) {
        score += DISTANCE_PENALTY;
    }
    score
}

/// Find the URL of the next page, if any scores high enough.
///
/// `content` holds the structural paths of the selected content elements
/// in `doc`; anchors far from all of them are penalized.
#[must_use]
pub fn detect_next_page(
    doc: &Document,
    page_url: &Url,
    content: &[StructuralPath],
    options: &ExtractionOptions,
) -> Option<String> {
    let page_key = url_utils::pagination_key(page_url);
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut targets: Vec<Target> = Vec::new();

    for node in doc.select("link[rel][href], a[href]").nodes() {
        let sel = Selection::from(*node);
        let Some(href) = dom::get_attribute(&sel, "href") else {
            continue;
        };
        let Some(url) = url_utils::resolve(&href, page_url) else {
            continue;
        };

        let is_link = dom::node_is(node, &["link"]);
        let rel_next = has_rel_next(&sel);
        if is_link && !rel_next {
            continue;
        }

        let key = url_utils::pagination_key(&url);
        let mut score = 0.0;
        if rel_next {
            score += REL_NEXT;
        }
        if PAGINATION_HREF.is_match(&href) {
            score += PAGINATION_HREF_BONUS;
        }
        if !url_utils::same_host(&url, page_url) {
            score += CROSS_HOST_PENALTY;
        }
        if key == page_key {
            score += SAME_PAGE_PENALTY;
        }
        if !is_link {
            score += anchor_signals(node, content, options);
        }

        match index.get(&key) {
            Some(&i) => targets[i].score += score,
            None => {
                index.insert(key, targets.len());
                targets.push(Target { url, score });
            }
        }
    }

    let mut best: Option<&Target> = None;
    for target in &targets {
        if best.is_none_or(|b| target.score > b.score) {
            best = Some(target);
        }
    }

    let best = best.filter(|t| t.score >= options.min_next_page_confidence)?;
    tracing::debug!(url = %best.url, score = best.score, candidates = targets.len(), "next page detected");
    Some(best.url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Url {
        Url::parse("https://example.com/news/story").expect("valid url")
    }

    fn content_paths(doc: &Document, css: &str) -> Vec<StructuralPath> {
        doc.select(css).nodes().iter().map(StructuralPath::of).collect()
    }

    #[test]
    fn link_rel_next_is_resolved() {
        let doc = Document::from(
            r#"<html><head><link rel="next" href="/page/2"></head><body><div id="c"><p>text</p></div></body></html>"#,
        );
        let next = detect_next_page(&doc, &page(), &content_paths(&doc, "#c"), &ExtractionOptions::default());
        assert_eq!(next, Some("https://example.com/page/2".to_string()));
    }

    #[test]
    fn labelled_pagination_anchor_is_found() {
        let doc = Document::from(
            r#"<html><body><div id="c"><p>Long article text that is mostly prose and not links at all.</p><p>More prose <a href="/news/story?page=2">Next page</a></p></div></body></html>"#,
        );
        let next = detect_next_page(&doc, &page(), &content_paths(&doc, "#c"), &ExtractionOptions::default());
        assert_eq!(next, Some("https://example.com/news/story?page=2".to_string()));
    }

    #[test]
    fn story_switch_and_cross_host_rejected() {
        let doc = Document::from(
            r#"<html><body><div id="c"><p>Some prose here for context. <a href="/other-story">Next story</a> and <a href="https://elsewhere.com/page/2">more</a></p></div></body></html>"#,
        );
        let next = detect_next_page(&doc, &page(), &content_paths(&doc, "#c"), &ExtractionOptions::default());
        assert_eq!(next, None);
    }

    #[test]
    fn same_page_link_is_never_next() {
        let doc = Document::from(
            r#"<html><head><link rel="next" href="/news/story#more"></head><body><div id="c"><p>x</p></div></body></html>"#,
        );
        let next = detect_next_page(&doc, &page(), &content_paths(&doc, "#c"), &ExtractionOptions::default());
        assert_eq!(next, None);
    }

    #[test]
    fn scores_accumulate_per_target() {
        let doc = Document::from(
            r#"<html><body><div id="c"><p>Prose before the pager, long enough to dilute links. <a href="/news/story/2">Continue</a></p><p>Prose after the pager, long enough to dilute links. <a href="/news/story/2#top">Continue reading</a></p></div></body></html>"#,
        );
        // each anchor alone scores 0.45, together 0.9
        let next = detect_next_page(&doc, &page(), &content_paths(&doc, "#c"), &ExtractionOptions::default());
        assert_eq!(next, Some("https://example.com/news/story/2".to_string()));

        let strict = ExtractionOptions { min_next_page_confidence: 1.0, ..ExtractionOptions::default() };
        assert_eq!(detect_next_page(&doc, &page(), &content_paths(&doc, "#c"), &strict), None);
    }

    #[test]
    fn comment_container_sinks_next_anchor() {
        let in_container = |class: &str| {
            format!(
                r#"<html><body><div id="c"><p>Article prose.</p></div><div class="{class}">A long reader reply, mostly words and very few links. <a href="/news/story?page=2">Next page</a></div></body></html>"#
            )
        };
        let options = ExtractionOptions::default();

        // 0.35 href + 0.45 label - 0.45 container
        let doc = Document::from(in_container("comments"));
        assert_eq!(detect_next_page(&doc, &page(), &content_paths(&doc, "#c"), &options), None);

        let doc = Document::from(in_container("thread"));
        assert_eq!(
            detect_next_page(&doc, &page(), &content_paths(&doc, "#c"), &options),
            Some("https://example.com/news/story?page=2".to_string())
        );
    }

    #[test]
    fn link_only_pager_is_penalized() {
        let doc = Document::from(
            r#"<html><body><div id="c"><p>Article prose.</p></div><div class="pager"><a href="/news/story?page=2">Next page</a> <a href="/news/story?page=3">3</a></div></body></html>"#,
        );
        let paths = content_paths(&doc, "#c");

        // 0.35 href + 0.45 label - 0.35 link-heavy parent
        assert_eq!(detect_next_page(&doc, &page(), &paths, &ExtractionOptions::default()), None);

        let lenient = ExtractionOptions { min_next_page_confidence: 0.4, ..ExtractionOptions::default() };
        assert_eq!(
            detect_next_page(&doc, &page(), &paths, &lenient),
            Some("https://example.com/news/story?page=2".to_string())
        );
    }

    #[test]
    fn distant_anchor_loses_distance_penalty() {
        let doc = Document::from(
            r#"<html><body><div id="c"><p>Article prose.</p></div><div><div><div><div><p>Prose that keeps the link share low. <a href="/news/story?page=2">Next page</a></p></div></div></div></div></body></html>"#,
        );
        let paths = content_paths(&doc, "#c");
        let anchor = StructuralPath::of(doc.select("a").nodes().first().expect("a"));
        assert_eq!(distance_to_content(&anchor, &paths), Some(7));

        // 0.35 href + 0.45 label - 0.35 distance
        assert_eq!(detect_next_page(&doc, &page(), &paths, &ExtractionOptions::default()), None);

        let wide = ExtractionOptions { max_pagination_distance_from_root: 7, ..ExtractionOptions::default() };
        assert_eq!(
            detect_next_page(&doc, &page(), &paths, &wide),
            Some("https://example.com/news/story?page=2".to_string())
        );
    }

    #[test]
    fn distance_counts_hops_through_common_ancestor() {
        let doc = Document::from("<html><body><div><p>x</p></div><footer><ul><li><div><span><a href=\"/x\">y</a></span></div></li></ul></footer></body></html>");
        let anchor = StructuralPath::of(doc.select("a").nodes().first().expect("a"));
        let content = content_paths(&doc, "p");
        // a: html/body/footer/ul/li/div/span/a, p: html/body/div/p; common prefix 2
        assert_eq!(distance_to_content(&anchor, &content), Some(6 + 2));
    }
}
