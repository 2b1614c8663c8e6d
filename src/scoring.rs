//! Element Scorers
//!
//! Independent numeric signals computed per element. None of them mutate the
//! tree; the candidate collector combines them.

use dom_query::{NodeRef, Selection};

use crate::dom;
use crate::link_density::link_density;
use crate::patterns::{
    CHROME_TOKENS, CONTENT_LIKE, EDGE_ANCHOR_STYLE, FIXED_POSITION_STYLE, NAV_ARIA_LABEL,
    NEGATIVE_WORDS, OK_MAYBE_CANDIDATE, PIXEL_HEIGHT_STYLE, POSITIVE_WORDS, UNLIKELY_CANDIDATE,
};

/// Minimum trimmed text length for a paragraph to score at all.
const MIN_PARAGRAPH_LENGTH: usize = 25;

/// Minimum normalized text length for a positive density score.
const MIN_DENSITY_TEXT: usize = 80;

/// Bounds of the class/id weight.
const CLASS_WEIGHT_LIMIT: f64 = 75.0;

/// Lower bound of the fixed-chrome penalty.
const CHROME_PENALTY_FLOOR: f64 = -120.0;

/// Score a paragraph-like node by its text.
///
/// Zero below 25 characters; otherwise one point, one per comma, up to
/// three for length, damped by link density, with a bonus for real
/// paragraph tags.
#[must_use]
pub fn paragraph_score(sel: &Selection) -> f64 {
    let text = sel.text();
    let text = text.trim();
    let length = text.chars().count();
    if length < MIN_PARAGRAPH_LENGTH {
        return 0.0;
    }

    let commas = text.matches(',').count() as f64;
    let mut score = 1.0 + commas + (length as f64 / 100.0).min(3.0);
    score *= 1.0 - link_density(sel).min(0.8);

    if matches!(dom::tag_name(sel).as_deref(), Some("p" | "blockquote" | "pre" | "td")) {
        score += 2.0;
    }
    score
}

/// Weight an element by its class and id.
///
/// Positive vocabulary adds 25 for the id and 20 for the class, negative
/// vocabulary subtracts the same. An unlikely-candidate match costs 30
/// unless an ok-maybe word also matches. Clamped to `[-75, 75]`.
#[must_use]
pub fn class_weight(sel: &Selection) -> f64 {
    let mut weight: f64 = 0.0;

    if let Some(class) = dom::non_empty_attribute(sel, "class") {
        if POSITIVE_WORDS.is_match(&class) {
            weight += 20.0;
        }
        if NEGATIVE_WORDS.is_match(&class) {
            weight -= 20.0;
        }
    }

    if let Some(id) = dom::non_empty_attribute(sel, "id") {
        if POSITIVE_WORDS.is_match(&id) {
            weight += 25.0;
        }
        if NEGATIVE_WORDS.is_match(&id) {
            weight -= 25.0;
        }
    }

    let class_and_id = dom::class_and_id(sel);
    if UNLIKELY_CANDIDATE.is_match(&class_and_id) && !OK_MAYBE_CANDIDATE.is_match(&class_and_id) {
        weight -= 30.0;
    }

    weight.clamp(-CLASS_WEIGHT_LIMIT, CLASS_WEIGHT_LIMIT)
}

fn tag_penalty(tag: &str) -> f64 {
    match tag {
        "article" | "main" | "section" => 1.0,
        "div" => 1.2,
        "td" => 1.5,
        "nav" | "aside" | "footer" | "header" => 3.0,
        _ => 1.4,
    }
}

/// Text-to-structure density of an element.
///
/// Zero below 80 characters of normalized text. Deep, link-heavy and
/// chrome-tagged elements are penalized.
#[must_use]
pub fn density_score(sel: &Selection) -> f64 {
    let Some(node) = sel.nodes().first() else {
        return 0.0;
    };
    let text_length = dom::text_length(sel);
    if text_length < MIN_DENSITY_TEXT {
        return 0.0;
    }

    let depth = dom::depth(node).max(1) as f64;
    let link_penalty = 1.0 + link_density(sel) * 2.5;
    let tag = dom::tag_name(sel).unwrap_or_default();

    text_length as f64 / (depth * link_penalty * tag_penalty(&tag))
}

/// Penalty for sticky headers, rails and other fixed page chrome.
///
/// Always in `[-120, 0]`. Content-like containers holding at least three
/// paragraphs are never penalized below -20.
#[must_use]
pub fn fixed_chrome_penalty(sel: &Selection) -> f64 {
    let mut penalty: f64 = 0.0;

    if let Some(style) = dom::non_empty_attribute(sel, "style") {
        if FIXED_POSITION_STYLE.is_match(&style) {
            penalty -= 35.0;
        }
        if EDGE_ANCHOR_STYLE.is_match(&style) {
            penalty -= 20.0;
        }
        let small_height = PIXEL_HEIGHT_STYLE
            .captures_iter(&style)
            .filter_map(|caps| caps.get(1)?.as_str().parse::<f64>().ok())
            .any(|height| height <= 140.0);
        if small_height {
            penalty -= 15.0;
        }
    }

    let class_and_id = dom::class_and_id(sel);
    if CHROME_TOKENS.is_match(&class_and_id) {
        penalty -= 20.0;
    }

    let nav_role = dom::get_attribute(sel, "role").is_some_and(|r| r.eq_ignore_ascii_case("navigation"));
    let nav_label = dom::get_attribute(sel, "aria-label").is_some_and(|l| NAV_ARIA_LABEL.is_match(&l));
    if nav_role || nav_label {
        penalty -= 20.0;
    }

    if link_density(sel) > 0.65 && dom::text_length(sel) < 280 {
        penalty -= 20.0;
    }

    let mut penalty: f64 = penalty.max(CHROME_PENALTY_FLOOR);

    if penalty < -20.0 && CONTENT_LIKE.is_match(&class_and_id) && sel.select("p").length() >= 3 {
        penalty = -20.0;
    }
    penalty
}

/// Check whether an element hides itself (ignoring ancestors).
#[must_use]
pub fn is_self_hidden(node: &NodeRef) -> bool {
    if !node.is_element() {
        return false;
    }
    let sel = Selection::from(*node);

    if sel.has_attr("hidden") {
        return true;
    }
    if dom::get_attribute(&sel, "aria-hidden").is_some_and(|v| v.trim().eq_ignore_ascii_case("true")) {
        return true;
    }
    if let Some(style) = dom::get_attribute(&sel, "style") {
        let compact: String = style
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        if compact.contains("display:none") || compact.contains("visibility:hidden") {
            return true;
        }
    }
    dom::node_tag(node).as_deref() == Some("input")
        && dom::get_attribute(&sel, "type").is_some_and(|t| t.eq_ignore_ascii_case("hidden"))
}

/// Visibility predicate: false if the element or any ancestor is hidden.
#[must_use]
pub fn is_visible(node: &NodeRef) -> bool {
    let mut current = Some(*node);
    while let Some(n) = current {
        if is_self_hidden(&n) {
            return false;
        }
        current = dom::element_parent(&n);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom_query::Document;

    const LONG_PROSE: &str = "The river rose again overnight, flooding the lower town, and the ferry stayed moored until noon.";

    #[test]
    fn paragraph_below_threshold_scores_zero() {
        let doc = Document::from("<p>Too short to count.</p>");
        assert_eq!(paragraph_score(&doc.select("p")), 0.0);
    }

    #[test]
    fn paragraph_score_counts_commas_and_length() {
        let doc = Document::from(format!("<p>{LONG_PROSE}</p>"));
        let len = LONG_PROSE.chars().count() as f64;
        // 1 + 2 commas + len/100, no links, +2 for <p>
        let expected = 1.0 + 2.0 + len / 100.0 + 2.0;
        assert!((paragraph_score(&doc.select("p")) - expected).abs() < 1e-9);
    }

    #[test]
    fn paragraph_score_damped_by_links() {
        let doc = Document::from(format!(r#"<div><a href="/x">{LONG_PROSE}</a></div>"#));
        let len = LONG_PROSE.chars().count() as f64;
        // link density 1.0 is capped at 0.8; div gets no tag bonus
        let expected = (1.0 + 2.0 + len / 100.0) * 0.2;
        assert!((paragraph_score(&doc.select("div")) - expected).abs() < 1e-9);
    }

    #[test]
    fn class_weight_positive_and_negative() {
        let doc = Document::from(r#"<div id="main-article" class="post-body">x</div>"#);
        assert_eq!(class_weight(&doc.select("div")), 45.0);

        let doc = Document::from(r#"<div class="share-tools">x</div>"#);
        assert_eq!(class_weight(&doc.select("div")), -20.0);
    }

    #[test]
    fn class_weight_unlikely_and_ok_maybe() {
        let doc = Document::from(r#"<div class="site-menu">x</div>"#);
        assert_eq!(class_weight(&doc.select("div")), -30.0);

        let doc = Document::from(r#"<div class="menu-column">x</div>"#);
        assert_eq!(class_weight(&doc.select("div")), 0.0);
    }

    #[test]
    fn class_weight_is_clamped() {
        let doc = Document::from(r#"<div id="sidebar-nav" class="sidebar comments">x</div>"#);
        assert_eq!(class_weight(&doc.select("div")), -75.0);
    }

    #[test]
    fn density_zero_for_short_text() {
        let doc = Document::from("<div>short</div>");
        assert_eq!(density_score(&doc.select("div")), 0.0);
    }

    #[test]
    fn density_prefers_shallow_article() {
        let html = format!(
            "<html><body><article>{LONG_PROSE}</article><nav>{LONG_PROSE}</nav></body></html>"
        );
        let doc = Document::from(html);
        let article = density_score(&doc.select("article"));
        let nav = density_score(&doc.select("nav"));
        assert!(article > 0.0);
        assert!((article / nav - 3.0).abs() < 1e-9);
    }

    #[test]
    fn fixed_chrome_penalizes_sticky_header() {
        let doc = Document::from(
            r#"<div class="navbar" style="position: fixed; top: 0; height: 60px"><a href="/">Home</a></div>"#,
        );
        // -35 fixed, -20 edge, -15 height, -20 token, -20 short link-heavy
        assert_eq!(fixed_chrome_penalty(&doc.select("div")), -110.0);
    }

    #[test]
    fn fixed_chrome_spares_content_with_paragraphs() {
        let doc = Document::from(format!(
            r#"<div class="article-content sticky" style="position:sticky;top:0"><p>{LONG_PROSE}</p><p>{LONG_PROSE}</p><p>{LONG_PROSE}</p></div>"#
        ));
        assert_eq!(fixed_chrome_penalty(&doc.select("div")), -20.0);
    }

    #[test]
    fn plain_content_has_no_chrome_penalty() {
        let doc = Document::from(format!("<div><p>{LONG_PROSE}</p></div>"));
        assert_eq!(fixed_chrome_penalty(&doc.select("div")), 0.0);
    }

    #[test]
    fn visibility_checks_ancestors() {
        let doc = Document::from(
            r#"<div style="display: none"><p id="a">x</p></div><div aria-hidden="true"><p id="b">y</p></div><p id="c">z</p><input type="hidden" id="d">"#,
        );
        let node = |id: &str| *doc.select(id).nodes().first().expect("node");
        assert!(!is_visible(&node("#a")));
        assert!(!is_visible(&node("#b")));
        assert!(is_visible(&node("#c")));
        assert!(!is_visible(&node("#d")));
    }
}
