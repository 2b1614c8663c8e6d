//! DOM Operations Adapter
//!
//! Thin helpers over the `dom_query` crate: attribute and text access,
//! tree navigation on `NodeRef`, the structural-path identity used by the
//! candidate collector, and the deep copy that moves selected content into
//! a disjoint document.

use std::fmt;

// Re-export core types for external use
pub use dom_query::{Document, NodeRef, Selection};

// Re-export StrTendril for external use
pub use tendril::StrTendril;

use crate::etree;
use crate::patterns::WHITESPACE_NORMALIZE;

/// Id given to the synthesized content root.
pub const CONTENT_ROOT_ID: &str = "readability-content";

// === Attribute Operations ===

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Get a non-blank attribute value, trimmed.
#[must_use]
pub fn non_empty_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// `class` and `id` joined by a space, as matched by the class/id vocabularies.
#[must_use]
pub fn class_and_id(sel: &Selection) -> String {
    let class = sel.attr("class").map(|s| s.to_string()).unwrap_or_default();
    let id = sel.attr("id").map(|s| s.to_string()).unwrap_or_default();
    if id.is_empty() {
        class
    } else if class.is_empty() {
        id
    } else {
        format!("{class} {id}")
    }
}

/// Numeric value of a dimension attribute such as `width="640"` or
/// `height="1px"`. Leading digits only; anything else is `None`.
#[must_use]
pub fn numeric_attribute(sel: &Selection, name: &str) -> Option<f64> {
    let raw = non_empty_attribute(sel, name)?;
    let digits: String = raw
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    digits.parse().ok()
}

/// Check whether an element carries no attributes at all.
#[must_use]
pub fn has_no_attributes(sel: &Selection) -> bool {
    sel.nodes().first().is_some_and(|node| node.attrs().is_empty())
}

// === Tag/Node Information ===

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes().first().and_then(node_tag)
}

/// Lowercase tag name of an element node, `None` for text/document nodes.
#[must_use]
pub fn node_tag(node: &NodeRef) -> Option<String> {
    if !node.is_element() {
        return None;
    }
    node.node_name().map(|t| t.to_ascii_lowercase())
}

/// Check a node's tag against a list of lowercase names.
#[must_use]
pub fn node_is(node: &NodeRef, tags: &[&str]) -> bool {
    node_tag(node).is_some_and(|t| tags.contains(&t.as_str()))
}

// === Text Content ===

/// Text content with whitespace runs collapsed and ends trimmed.
#[must_use]
pub fn normalized_text(sel: &Selection) -> String {
    let text = sel.text();
    WHITESPACE_NORMALIZE.replace_all(text.trim(), " ").into_owned()
}

/// Character count of the normalized text.
#[must_use]
pub fn text_length(sel: &Selection) -> usize {
    normalized_text(sel).chars().count()
}

/// Get inner HTML content
#[inline]
#[must_use]
pub fn inner_html(sel: &Selection) -> StrTendril {
    sel.inner_html()
}

/// Get outer HTML content
#[inline]
#[must_use]
pub fn outer_html(sel: &Selection) -> StrTendril {
    sel.html()
}

// === Tree Navigation ===

/// Parent node if it is an element (the document node is not).
#[must_use]
pub fn element_parent<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    node.parent().filter(NodeRef::is_element)
}

/// Element children of a node, in document order.
#[must_use]
pub fn element_children<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    node.children().into_iter().filter(NodeRef::is_element).collect()
}

/// Number of element ancestors. The root `<html>` element has depth 0.
#[must_use]
pub fn depth(node: &NodeRef) -> usize {
    let mut depth = 0;
    let mut current = element_parent(node);
    while let Some(parent) = current {
        depth += 1;
        current = element_parent(&parent);
    }
    depth
}

/// Find the closest ancestor (excluding the node itself) with the given tag.
#[must_use]
pub fn closest_ancestor<'a>(node: &NodeRef<'a>, tag: &str) -> Option<NodeRef<'a>> {
    let mut current = element_parent(node);
    while let Some(parent) = current {
        if node_tag(&parent).as_deref() == Some(tag) {
            return Some(parent);
        }
        current = element_parent(&parent);
    }
    None
}

// === Structural Path ===

/// One `tag[siblingIndex]` step of a [`StructuralPath`].
///
/// Field order matters: steps compare by sibling index first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PathStep {
    /// Position among the parent's element children.
    pub index: usize,
    /// Lowercase tag name.
    pub tag: String,
}

/// Identity of a tree position, derived by walking to the root.
///
/// Paths order like the document: an ancestor sorts before its
/// descendants and earlier siblings before later ones. A path is only
/// valid for the tree state it was computed from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StructuralPath(Vec<PathStep>);

impl StructuralPath {
    /// Compute the path of an element node.
    #[must_use]
    pub fn of(node: &NodeRef) -> Self {
        let mut steps = Vec::new();
        let mut current = Some(*node);
        while let Some(n) = current {
            if !n.is_element() {
                break;
            }
            let index = n
                .parent()
                .map(|parent| {
                    element_children(&parent)
                        .iter()
                        .position(|sibling| sibling.id == n.id)
                        .unwrap_or(0)
                })
                .unwrap_or(0);
            steps.push(PathStep {
                index,
                tag: node_tag(&n).unwrap_or_default(),
            });
            current = n.parent();
        }
        steps.reverse();
        Self(steps)
    }

    /// Path of the first node of a selection.
    #[must_use]
    pub fn of_selection(sel: &Selection) -> Option<Self> {
        sel.nodes().first().map(Self::of)
    }

    /// Number of steps (root element counts as one).
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the path of a detached or non-element node.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Strict prefix test: `self` is a proper ancestor of `other`.
    #[must_use]
    pub fn is_ancestor_of(&self, other: &StructuralPath) -> bool {
        other.0.len() > self.0.len() && other.0.starts_with(&self.0)
    }

    /// Length of the common prefix of two paths.
    #[must_use]
    pub fn common_prefix_len(&self, other: &StructuralPath) -> usize {
        self.0
            .iter()
            .zip(other.0.iter())
            .take_while(|(a, b)| a == b)
            .count()
    }
}

impl fmt::Display for StructuralPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{}[{}]", step.tag, step.index)?;
        }
        Ok(())
    }
}

// === Tree Manipulation ===

/// Remove an element but keep its children in place.
#[inline]
pub fn unwrap(sel: &Selection) {
    etree::strip(sel);
}

/// Markup copied for one member of a synthesized root.
///
/// `<html>` and `<body>` cannot be re-parsed inside a container, so their
/// body children are copied inside a plain `<div>` instead. Table parts
/// are only parsed as such inside a table, so they get the missing
/// `<table>`/`<tbody>`/`<tr>` ancestors back.
fn copy_markup(sel: &Selection) -> String {
    let tag = tag_name(sel);
    let outer = outer_html(sel).to_string();
    match tag.as_deref() {
        Some("html") => format!("<div>{}</div>", inner_html(&sel.select("body"))),
        Some("body") => format!("<div>{}</div>", inner_html(sel)),
        Some("td" | "th") => format!("<table><tbody><tr>{outer}</tr></tbody></table>"),
        Some("tr") => format!("<table><tbody>{outer}</tbody></table>"),
        Some("thead" | "tbody" | "tfoot" | "caption" | "colgroup") => format!("<table>{outer}</table>"),
        _ => outer,
    }
}

/// Deep-copy elements into a new document under a single wrapper element.
///
/// The returned document shares nothing with the source tree, so cleaning
/// the copy can never disturb candidates still held on the original. Use
/// [`content_root`] to select the wrapper.
#[must_use]
pub fn copy_into_wrapper(members: &[Selection], wrapper_tag: &str) -> Document {
    let mut html = format!("<{wrapper_tag} id=\"{CONTENT_ROOT_ID}\">");
    for member in members {
        html.push_str(&copy_markup(member));
    }
    html.push_str(&format!("</{wrapper_tag}>"));
    Document::from(html)
}

/// Select the synthesized content root of a document built by
/// [`copy_into_wrapper`].
#[must_use]
pub fn content_root(doc: &Document) -> Selection<'_> {
    doc.select(&format!("body > #{CONTENT_ROOT_ID}"))
}

// === Text Flattening ===

/// Tags whose boundaries become line breaks in flattened text.
const LINE_BREAK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "ol",
    "p", "pre", "section", "table", "tr", "ul",
];

fn push_text(node: &NodeRef, out: &mut String) {
    for child in node.children() {
        if child.is_text() {
            out.push_str(&child.text());
            continue;
        }
        let Some(tag) = node_tag(&child) else {
            continue;
        };
        match tag.as_str() {
            "script" | "style" | "noscript" | "template" => {}
            "td" | "th" => {
                out.push(' ');
                push_text(&child, out);
                out.push(' ');
            }
            t if LINE_BREAK_TAGS.contains(&t) => {
                out.push('\n');
                push_text(&child, out);
                out.push('\n');
            }
            _ => push_text(&child, out),
        }
    }
}

/// Plain text of a subtree: one line per block, whitespace collapsed,
/// blank lines dropped.
#[must_use]
pub fn flatten_text(sel: &Selection) -> String {
    let Some(root) = sel.nodes().first() else {
        return String::new();
    };
    let mut raw = String::new();
    push_text(root, &mut raw);

    raw.lines()
        .map(|line| WHITESPACE_NORMALIZE.replace_all(line.trim(), " ").into_owned())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

// === Parsing ===

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first<'a>(doc: &'a Document, css: &str) -> NodeRef<'a> {
        *doc.select(css).nodes().first().expect("node present")
    }

    #[test]
    fn test_class_and_id() {
        let doc = parse(r#"<div id="main" class="container wide">content</div>"#);
        assert_eq!(class_and_id(&doc.select("div")), "container wide main");

        let doc = parse(r#"<div>content</div>"#);
        assert_eq!(class_and_id(&doc.select("div")), "");
    }

    #[test]
    fn test_structural_path_display() {
        let doc = parse("<html><head></head><body><p>a</p><div><span>b</span></div></body></html>");
        let span = first(&doc, "span");
        assert_eq!(StructuralPath::of(&span).to_string(), "html[0]/body[1]/div[1]/span[0]");
    }

    #[test]
    fn test_structural_path_orders_like_document() {
        let doc = parse("<body><div><p>1</p><p>2</p></div><section><p>3</p></section></body>");
        let div = StructuralPath::of(&first(&doc, "div"));
        let second_p = StructuralPath::of(&first(&doc, "div > p:nth-child(2)"));
        let section_p = StructuralPath::of(&first(&doc, "section > p"));

        assert!(div < second_p);
        assert!(second_p < section_p);
        assert!(div.is_ancestor_of(&second_p));
        assert!(!div.is_ancestor_of(&section_p));
        assert!(!div.is_ancestor_of(&div));
    }

    #[test]
    fn test_depth_counts_element_ancestors() {
        let doc = parse("<html><body><div><p>x</p></div></body></html>");
        assert_eq!(depth(&first(&doc, "html")), 0);
        assert_eq!(depth(&first(&doc, "body")), 1);
        assert_eq!(depth(&first(&doc, "p")), 3);
    }

    #[test]
    fn test_copy_into_wrapper_is_disjoint() {
        let doc = parse(r#"<body><div id="a"><p>one</p></div></body>"#);
        let copy = copy_into_wrapper(&[doc.select("#a")], "div");

        let root = content_root(&copy);
        assert!(root.exists());
        root.select("p").remove();

        assert!(doc.select("#a p").exists());
        assert!(!content_root(&copy).select("p").exists());
    }

    #[test]
    fn test_copy_into_wrapper_handles_body() {
        let doc = parse(r#"<html><body class="x"><p>one</p><p>two</p></body></html>"#);
        let copy = copy_into_wrapper(&[doc.select("body")], "article");

        let root = content_root(&copy);
        assert_eq!(tag_name(&root), Some("article".to_string()));
        assert_eq!(root.select("p").length(), 2);
    }

    #[test]
    fn test_copy_into_wrapper_keeps_table_parts() {
        let doc = parse(
            "<body><table><tr id=\"row\"><td>Alpha</td><td>Beta</td></tr></table><table><tr><td id=\"cell\">Gamma</td></tr></table></body>",
        );

        let copy = copy_into_wrapper(&[doc.select("tbody").first()], "div");
        let root = content_root(&copy);
        assert_eq!(root.select("table > tbody > tr > td").length(), 2);
        assert_eq!(flatten_text(&root), "Alpha Beta");

        let copy = copy_into_wrapper(&[doc.select("#row"), doc.select("#cell")], "div");
        let root = content_root(&copy);
        assert_eq!(root.select("table").length(), 2);
        assert!(root.select("tr#row > td").exists());
        assert!(root.select("table td#cell").exists());
    }

    #[test]
    fn test_flatten_text_breaks_blocks() {
        let doc = parse("<div><h2>Title</h2><p>First   line</p>text<p>Second</p></div>");
        assert_eq!(flatten_text(&doc.select("div")), "Title\nFirst line\ntext\nSecond");
    }

    #[test]
    fn test_unwrap_keeps_children() {
        let doc = parse(r#"<div id="outer"><span>before <b>bold</b> after</span></div>"#);
        unwrap(&doc.select("span"));

        assert!(doc.select("span").is_empty());
        assert_eq!(normalized_text(&doc.select("#outer")), "before bold after");
    }

    #[test]
    fn test_numeric_attribute() {
        let doc = parse(r#"<img width="640" height="1px" alt="auto">"#);
        let img = doc.select("img");
        assert_eq!(numeric_attribute(&img, "width"), Some(640.0));
        assert_eq!(numeric_attribute(&img, "height"), Some(1.0));
        assert_eq!(numeric_attribute(&img, "alt"), None);
        assert_eq!(numeric_attribute(&img, "missing"), None);
    }

    #[test]
    fn test_has_no_attributes() {
        let doc = parse(r#"<div><span>a</span><span class="x">b</span></div>"#);
        assert!(has_no_attributes(&doc.select("div")));
        assert!(!has_no_attributes(&doc.select("span.x")));
    }
}
