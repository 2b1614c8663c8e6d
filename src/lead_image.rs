//! Lead Image Extraction
//!
//! Picks the image that best represents the article. Page metadata
//! (Open Graph, Twitter cards, `image_src`) is trusted first; otherwise
//! the images in the cleaned content root are scored.

use dom_query::{Document, NodeRef, Selection};
use url::Url;

use crate::dom;
use crate::metadata::meta_content;
use crate::patterns::{BLOCKED_IMAGE, HIDDEN_CLASS, POSITIVE_IMAGE};
use crate::url_utils;

/// Metadata keys for the lead image, in priority order.
const META_IMAGE_KEYS: &[&str] = &["og:image:secure_url", "og:image", "twitter:image", "twitter:image:src"];

/// Smallest side accepted by the size gate.
const MIN_SIDE: f64 = 200.0;
/// Smallest area accepted by the size gate.
const MIN_AREA: f64 = 40_000.0;
/// Accepted width/height ratio.
const ASPECT_RANGE: (f64, f64) = (0.5, 2.5);
/// Area that earns the large-image bonus.
const LARGE_AREA: f64 = 150_000.0;
/// Content images scoring below this are ignored.
const MIN_IMAGE_SCORE: i32 = 40;

/// Size gate shared by both phases.
#[must_use]
pub fn passes_size_gate(width: f64, height: f64) -> bool {
    if width < MIN_SIDE || height < MIN_SIDE || width * height < MIN_AREA {
        return false;
    }
    let ratio = width / height;
    (ASPECT_RANGE.0..=ASPECT_RANGE.1).contains(&ratio)
}

/// URL schemes and shapes that are never a lead image.
fn is_rejected_url(url: &Url) -> bool {
    if matches!(url.scheme(), "data" | "about" | "javascript") {
        return true;
    }
    if url.path().to_ascii_lowercase().ends_with(".svg") {
        return true;
    }
    url.host_str().is_some_and(|host| host.to_ascii_lowercase().contains("gravatar"))
}

fn resolve_image(raw: &str, base: &Url) -> Option<Url> {
    let raw = raw.trim();
    let lower = raw.to_ascii_lowercase();
    if lower.starts_with("data:") || lower.starts_with("about:") || lower.starts_with("javascript:") {
        return None;
    }
    url_utils::resolve(raw, base).filter(|url| !is_rejected_url(url))
}

/// Phase 1: image declared in the page metadata.
#[must_use]
pub fn image_from_metadata(doc: &Document, base: &Url) -> Option<String> {
    let declared_width = meta_content(doc, &["og:image:width"]).and_then(|w| w.trim().parse::<f64>().ok());
    let declared_height = meta_content(doc, &["og:image:height"]).and_then(|h| h.trim().parse::<f64>().ok());
    if let (Some(width), Some(height)) = (declared_width, declared_height) {
        if !passes_size_gate(width, height) {
            return None;
        }
    }

    let from_meta = META_IMAGE_KEYS
        .iter()
        .filter_map(|key| meta_content(doc, &[key]))
        .chain(
            doc.select("meta[itemprop='image']")
                .iter()
                .filter_map(|meta| dom::non_empty_attribute(&meta, "content")),
        )
        .chain(
            doc.select("link[rel~='image_src']")
                .iter()
                .filter_map(|link| dom::non_empty_attribute(&link, "href")),
        );

    from_meta
        .filter_map(|raw| resolve_image(&raw, base))
        .map(String::from)
        .next()
}

/// Weight of a `srcset` descriptor: `640w` is 640, `2x` is 2000.
fn descriptor_weight(descriptor: Option<&str>) -> f64 {
    let Some(descriptor) = descriptor else {
        return 1000.0;
    };
    let descriptor = descriptor.trim().to_ascii_lowercase();
    if let Some(width) = descriptor.strip_suffix('w') {
        return width.parse().unwrap_or(0.0);
    }
    if let Some(density) = descriptor.strip_suffix('x') {
        return density.parse::<f64>().map_or(0.0, |d| d * 1000.0);
    }
    0.0
}

/// Best candidate of a `srcset` attribute; ties go to the earliest entry.
#[must_use]
pub fn best_srcset_candidate(srcset: &str) -> Option<String> {
    let mut best: Option<(f64, &str)> = None;
    for entry in srcset.split(',') {
        let mut parts = entry.split_whitespace();
        let Some(url) = parts.next() else {
            continue;
        };
        let weight = descriptor_weight(parts.next());
        if best.is_none_or(|(best_weight, _)| weight > best_weight) {
            best = Some((weight, url));
        }
    }
    best.map(|(_, url)| url.to_string())
}

fn raw_image_source(img: &Selection) -> Option<String> {
    dom::non_empty_attribute(img, "src")
        .or_else(|| dom::non_empty_attribute(img, "srcset").and_then(|s| best_srcset_candidate(&s)))
        .or_else(|| dom::non_empty_attribute(img, "data-src"))
        .or_else(|| dom::non_empty_attribute(img, "data-original"))
        .or_else(|| dom::non_empty_attribute(img, "data-lazy-src"))
}

/// Score one content image; `None` when it is rejected outright.
fn score_image(node: &NodeRef, position: usize, url: &Url) -> Option<i32> {
    let img = Selection::from(*node);
    let class = dom::get_attribute(&img, "class").unwrap_or_default();
    if HIDDEN_CLASS.is_match(&class) {
        return None;
    }

    let described = format!("{} {}", dom::class_and_id(&img), dom::get_attribute(&img, "alt").unwrap_or_default());
    if BLOCKED_IMAGE.is_match(&described) || BLOCKED_IMAGE.is_match(url.as_str()) {
        return None;
    }

    let width = dom::numeric_attribute(&img, "width");
    let height = dom::numeric_attribute(&img, "height");
    let area = match (width, height) {
        (Some(w), Some(h)) => {
            if !passes_size_gate(w, h) {
                return None;
            }
            Some(w * h)
        }
        _ => None,
    };

    let mut score = 0;
    if dom::closest_ancestor(node, "figure").is_some() {
        score += 25;
    }
    if POSITIVE_IMAGE.is_match(&described) {
        score += 25;
    }
    if dom::non_empty_attribute(&img, "alt").is_some_and(|alt| alt.chars().count() >= 20) {
        score += 15;
    }
    if area.is_some_and(|a| a >= LARGE_AREA) {
        score += 25;
    }
    if position < 3 {
        score += 20;
    }
    Some(score)
}

/// Phase 2: best-scoring image inside the content root.
#[must_use]
pub fn image_from_content(root: &Selection, base: &Url) -> Option<String> {
    let mut best: Option<(i32, Url)> = None;

    for (position, node) in root.select("img").nodes().iter().enumerate() {
        let img = Selection::from(*node);
        let Some(url) = raw_image_source(&img).and_then(|raw| resolve_image(&raw, base)) else {
            continue;
        };
        let Some(score) = score_image(node, position, &url) else {
            continue;
        };
        if score < MIN_IMAGE_SCORE {
            continue;
        }
        if best.as_ref().is_none_or(|(best_score, _)| score > *best_score) {
            best = Some((score, url));
        }
    }

    best.map(|(_, url)| url.to_string())
}

/// Lead image: metadata first, then the content scan.
#[must_use]
pub fn extract_lead_image(doc: &Document, root: &Selection, base: &Url) -> Option<String> {
    image_from_metadata(doc, base).or_else(|| image_from_content(root, base))
}
