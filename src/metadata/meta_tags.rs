//! HTML Meta Tag Extraction
//!
//! Looks up `<meta>` values by `name`, `property` or `itemprop`, in the
//! caller's priority order.

use dom_query::{Document, Selection};

use crate::dom;

/// Meta keys carrying the page title.
pub const TITLE_KEYS: &[&str] = &["og:title"];

/// Meta keys carrying the author, most specific first.
pub const AUTHOR_KEYS: &[&str] = &[
    "author",
    "article:author",
    "dc.creator",
    "byl",
    "parsely-author",
    "sailthru.author",
];

/// Meta keys carrying the description.
pub const DESCRIPTION_KEYS: &[&str] = &["description", "og:description"];

/// Key a `<meta>` element is addressed by, lowercase.
fn meta_key(meta: &Selection) -> Option<String> {
    dom::non_empty_attribute(meta, "name")
        .or_else(|| dom::non_empty_attribute(meta, "property"))
        .or_else(|| dom::non_empty_attribute(meta, "itemprop"))
        .map(|key| key.to_ascii_lowercase())
}

/// Content of the first `<meta>` matching the earliest key in `keys`.
///
/// Keys are tried in order; within a key the first tag in the document
/// wins. Blank content is skipped.
#[must_use]
pub fn meta_content(doc: &Document, keys: &[&str]) -> Option<String> {
    let metas: Vec<(String, String)> = doc
        .select("meta")
        .iter()
        .filter_map(|meta| {
            let key = meta_key(&meta)?;
            let content = dom::non_empty_attribute(&meta, "content")?;
            Some((key, content))
        })
        .collect();

    keys.iter().find_map(|wanted| {
        metas
            .iter()
            .find(|(key, _)| key == wanted)
            .map(|(_, content)| content.clone())
    })
}

/// Check that an author value looks like a name.
///
/// Rejects URLs (`article:author` often holds a profile link), JSON blobs
/// and values too short or too long to be a name.
#[must_use]
pub fn validate_metadata_name(name: &str) -> bool {
    let name = name.trim();
    let length = name.chars().count();
    if !(2..=120).contains(&length) {
        return false;
    }
    if name.starts_with("http://") || name.starts_with("https://") || name.starts_with("www.") {
        return false;
    }
    if name.starts_with('{') || name.starts_with('[') {
        return false;
    }
    !(length > 20 && !name.contains(' '))
}
