//! Lazy-loaded media repair.
//!
//! Pages that load images from script leave the real URL in a `data-*`
//! attribute and a placeholder (or nothing) in `src`.

use dom_query::Selection;

use crate::dom;
use crate::patterns::LAZY_SRC_ATTRIBUTES;

/// Copy `from` into `to` when `to` is missing or blank.
fn promote(sel: &Selection, from: &str, to: &str) -> bool {
    if dom::non_empty_attribute(sel, to).is_some() {
        return false;
    }
    match dom::non_empty_attribute(sel, from) {
        Some(value) => {
            sel.set_attr(to, &value);
            true
        }
        None => false,
    }
}

fn is_tracking_pixel(img: &Selection) -> bool {
    dom::numeric_attribute(img, "width") == Some(1.0) && dom::numeric_attribute(img, "height") == Some(1.0)
}

/// Repair lazy media under `root` and drop 1×1 tracking images.
pub fn repair_lazy_media(root: &Selection) {
    let mut promoted = 0;
    let mut dropped = 0;

    for node in root.select("img").nodes() {
        let img = Selection::from(*node);

        if dom::non_empty_attribute(&img, "src").is_none() {
            if let Some(source) = LAZY_SRC_ATTRIBUTES.iter().find(|attr| dom::non_empty_attribute(&img, attr).is_some()) {
                promote(&img, source, "src");
                promoted += 1;
            }
        }
        if promote(&img, "data-srcset", "srcset") {
            promoted += 1;
        }

        if is_tracking_pixel(&img) {
            img.remove();
            dropped += 1;
        }
    }

    for node in root.select("picture source").nodes() {
        promote(&Selection::from(*node), "data-srcset", "srcset");
    }

    for node in root.select("video").nodes() {
        if promote(&Selection::from(*node), "data-poster", "poster") {
            promoted += 1;
        }
    }

    tracing::trace!(promoted, dropped, "repaired lazy media");
}
