//! URL Utility Functions
//!
//! Resolution of relative hrefs against the page URL, host helpers and the
//! normalized key used to compare pagination links.

use url::Url;

/// Schemes that never point at a page or an image.
const NON_NAVIGABLE_PREFIXES: &[&str] = &["javascript:", "mailto:", "tel:"];

/// Whether an href is a script, mail or phone link, or a bare fragment.
#[must_use]
pub fn is_ignored_href(href: &str) -> bool {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return true;
    }
    let lower = href.to_ascii_lowercase();
    NON_NAVIGABLE_PREFIXES.iter().any(|prefix| lower.starts_with(prefix))
}

/// Resolve a relative or absolute href against `base`.
///
/// # Returns
/// * `None` for ignored hrefs and anything `Url::join` rejects
#[must_use]
pub fn resolve(href: &str, base: &Url) -> Option<Url> {
    if is_ignored_href(href) {
        return None;
    }
    base.join(href.trim()).ok()
}

/// Host of a URL, lowercase.
#[must_use]
pub fn host(url: &Url) -> Option<String> {
    url.host_str().map(str::to_ascii_lowercase)
}

/// Whether two URLs share a host.
#[must_use]
pub fn same_host(a: &Url, b: &Url) -> bool {
    host(a) == host(b)
}

/// Whether `host` is `domain` or one of its subdomains.
#[must_use]
pub fn host_matches_domain(host: &str, domain: &str) -> bool {
    let host = host.to_ascii_lowercase();
    let domain = domain.trim().trim_start_matches('.').to_ascii_lowercase();
    if domain.is_empty() {
        return false;
    }
    host == domain || host.ends_with(&format!(".{domain}"))
}

/// Normalized comparison key: path and query, fragment dropped, lowercased.
#[must_use]
pub fn pagination_key(url: &Url) -> String {
    let mut key = url.path().to_lowercase();
    if let Some(query) = url.query() {
        key.push('?');
        key.push_str(&query.to_lowercase());
    }
    key
}
