//! Compiled regex patterns and keyword vocabularies.
//!
//! Every class/id vocabulary used by the scorers, cleaners, lead image and
//! pagination code lives here so the lists cannot drift apart. Patterns are
//! compiled once using `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Class/id weighting
// =============================================================================

/// Positive class/id words. Word boundaries are any non-alphanumeric
/// character, so `article-body` and `post_content` both match.
pub static POSITIVE_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:^|[^a-z0-9])(article|content|entry|main|page|post|story|text|body|blog|news|markdown)(?:$|[^a-z0-9])",
    )
    .expect("POSITIVE_WORDS regex")
});

/// Negative class/id words, same boundary rules as [`POSITIVE_WORDS`].
pub static NEGATIVE_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:^|[^a-z0-9])(comments?|sidebar|promo|ads?|advert|nav|share|social|subscribe|cookie|footer|related|sponsor(?:ed)?|widget|popup|modal|newsletter)(?:$|[^a-z0-9])",
    )
    .expect("NEGATIVE_WORDS regex")
});

/// Substrings that mark an element as an unlikely content candidate.
pub static UNLIKELY_CANDIDATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)banner|breadcrumbs|combx|comment|community|disqus|extra|foot|header|legends|menu|related|remark|replies|rss|shoutbox|sidebar|skyscraper|social|sponsor|supplemental|ad-break|agegate|pagination|pager|popup|yom-remote|nav",
    )
    .expect("UNLIKELY_CANDIDATE regex")
});

/// Cancels [`UNLIKELY_CANDIDATE`] when it also matches.
pub static OK_MAYBE_CANDIDATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)article|body|column|content|main|shadow").expect("OK_MAYBE_CANDIDATE regex")
});

/// Class/id substrings that make a candidate's token set empty.
pub const HARD_NEGATIVE_TOKENS: &[&str] = &["comment", "disqus", "reply"];

/// Tokens dropped from candidate token sets.
pub const IGNORED_TOKENS: &[&str] = &["nav", "footer", "header"];

// =============================================================================
// Fixed chrome
// =============================================================================

/// `position: fixed` / `position: sticky` in an inline style.
pub static FIXED_POSITION_STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)position\s*:\s*(fixed|sticky)").expect("FIXED_POSITION_STYLE regex")
});

/// Zero offsets anchoring an element to a viewport edge.
pub static EDGE_ANCHOR_STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|;)\s*(top|bottom|left|right|inset)\s*:\s*0(?:px)?\s*(?:;|$)")
        .expect("EDGE_ANCHOR_STYLE regex")
});

/// Explicit pixel height (or max-height).
pub static PIXEL_HEIGHT_STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|;)\s*(?:max-)?height\s*:\s*(\d+(?:\.\d+)?)px").expect("PIXEL_HEIGHT_STYLE regex")
});

/// Class/id tokens typical of sticky headers, rails and overlays.
pub static CHROME_TOKENS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:^|[^a-z0-9])(sticky|affix|navbar|rail|toolbar|topbar|masthead|overlay|drawer|fixed)(?:$|[^a-z0-9])",
    )
    .expect("CHROME_TOKENS regex")
});

/// aria-label values that describe navigation.
pub static NAV_ARIA_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)nav|menu|breadcrumb").expect("NAV_ARIA_LABEL regex"));

/// Class/id values that look like an article container.
pub static CONTENT_LIKE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)article|content|story|post|entry").expect("CONTENT_LIKE regex"));

// =============================================================================
// Cleaning vocabularies
// =============================================================================

/// Document-level negative id/class substrings.
pub const DOCUMENT_NEGATIVE_SUBSTRINGS: &[&str] = &[
    "comment", "disqus", "sidebar", "sponsor", "promo", "advert", "share", "social",
    "newsletter", "subscribe", "cookie", "popup", "modal", "outbrain", "taboola",
];

/// Document-level positive id/class substrings that veto a negative match.
pub const DOCUMENT_POSITIVE_SUBSTRINGS: &[&str] = &[
    "article", "content", "entry", "main", "post", "story", "text", "body", "blog",
];

/// Content-root junk id/class substrings.
pub const CONTENT_JUNK_SUBSTRINGS: &[&str] = &[
    "share", "social", "newsletter", "subscribe", "cookie", "banner", "promo", "related",
    "recommend",
];

/// Elements removed from the content root outright.
pub const CONTENT_JUNK_TAGS: &str = "form, button, input, select, textarea, nav, footer, header, aside";

/// Lazy-loading attributes promoted to `src`, in priority order.
pub const LAZY_SRC_ATTRIBUTES: &[&str] = &["data-src", "data-original", "data-lazy-src", "data-url", "data-img"];

/// Tags that make a container "block-level" for wrapper unwrapping.
pub const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "details", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr",
    "li", "main", "nav", "ol", "p", "pre", "section", "table", "ul", "img", "picture", "video",
    "iframe",
];

/// Media descendants that keep an otherwise empty cell or paragraph.
pub const MEDIA_SELECTOR: &str = "img, picture, video, audio, iframe, svg, object, embed";

// =============================================================================
// Header deduplication
// =============================================================================

/// Words that make a heading look like byline/timestamp preamble.
pub const PREAMBLE_NOISE_TOKENS: &[&str] = &[
    "by", "posted", "updated", "published", "written", "share", "min", "mins", "minute",
    "minutes", "read", "comments", "comment", "am", "pm", "ago", "hours", "hour", "days", "day",
    "months", "month", "edt", "est", "utc", "gmt", "print", "email", "tweet",
];

/// Byline and timestamp shapes in a preamble heading.
pub static PREAMBLE_NOISE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(by|posted by|written by|updated|published)\b|\b\d{1,2}:\d{2}\b|\b\d{4}-\d{2}-\d{2}\b|\b(jan|feb|mar|apr|may|jun|jul|aug|sep|sept|oct|nov|dec)[a-z]*\.?\s+\d{1,2},?\s+\d{4}\b|\b\d+\s*(min|mins|minute|minutes)\s+read\b",
    )
    .expect("PREAMBLE_NOISE regex")
});

// =============================================================================
// Lead image
// =============================================================================

/// Image class/id/alt/url keywords that disqualify a lead image.
pub static BLOCKED_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)logo|icon|avatar|sprite|thumbnail|thumb|tracking|pixel|placeholder|advert|badge|emoji|spinner|loading|blank|spacer|banner-ad",
    )
    .expect("BLOCKED_IMAGE regex")
});

/// Image class/id/alt/url keywords that favour a lead image.
pub static POSITIVE_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)hero|lead|featured|primary|main|article|story").expect("POSITIVE_IMAGE regex")
});

/// Class names that hide an image.
pub static HIDDEN_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[^a-z0-9])(hidden|hide|sr-only|visually-hidden|invisible|d-none)(?:$|[^a-z0-9])")
        .expect("HIDDEN_CLASS regex")
});

// =============================================================================
// Pagination
// =============================================================================

/// Anchor labels that announce the next page.
pub static NEXT_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(next|continue|more|older|page\s*\d+)\b").expect("NEXT_LABEL regex")
});

/// Anchor labels that switch to another story rather than paginate.
pub static STORY_SWITCH_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(next|previous|prev)\s+(story|article|post|video|gallery)\b|\brelated\b|\bmore\s+(stories|articles|news|from)\b|\brecommended\b",
    )
    .expect("STORY_SWITCH_LABEL regex")
});

/// Hrefs shaped like pagination.
pub static PAGINATION_HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)/page/\d+|[?&](page|p|pg|paged)=\d+").expect("PAGINATION_HREF regex")
});

/// Anchor container class/id tokens that suggest non-pagination links.
pub static PAGINATION_NEGATIVE_CONTAINER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)comment|related|promo|social|share|footer|header|nav").expect("PAGINATION_NEGATIVE_CONTAINER regex")
});

// =============================================================================
// Text cleaning
// =============================================================================

/// Matches multiple whitespace characters for normalization.
pub static WHITESPACE_NORMALIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_NORMALIZE regex"));

/// `charset=` inside a `<meta>` tag, either `<meta charset>` or the
/// `content` of an `http-equiv="Content-Type"` declaration.
pub static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\b[^>]*?charset\s*=\s*["']?([A-Za-z0-9_.:-]+)"#).expect("META_CHARSET regex")
});

/// Runs of two or more `<br>` separated only by whitespace.
pub static DOUBLE_BR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:<br\s*/?>\s*){2,}").expect("DOUBLE_BR regex"));

// =============================================================================
// CSS Selectors
// =============================================================================

/// Paragraph-like nodes whose scores propagate to their ancestors.
pub const PARAGRAPH_SELECTOR: &str = "p, pre, td, blockquote";

/// Containers scored by the density pass.
pub const CONTAINER_SELECTOR: &str = "article, main, section, div";

/// Selector for byline-like DOM elements.
pub const BYLINE_SELECTOR: &str =
    ".byline, .author, .author-name, [itemprop='author'], [class*='byline'], [class*='author']";
