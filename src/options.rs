//! Configuration options for content extraction.
//!
//! `ExtractionOptions` is an immutable record: build it once with struct
//! update syntax (or deserialize it from JSON) and pass it by reference.

use serde::Deserialize;

/// Configuration options for content extraction.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings; missing fields in a deserialized options file
/// take their default value.
///
/// # Example
///
/// ```rust
/// use rs_readability::ExtractionOptions;
///
/// let options = ExtractionOptions {
///     use_clustering: false,
///     keep_iframes: true,
///     ..ExtractionOptions::default()
/// };
/// assert!(!options.use_clustering);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct ExtractionOptions {
    /// Keep `<iframe>` elements during document cleaning.
    ///
    /// Default: `false`
    pub keep_iframes: bool,

    /// Keep `<video>` elements (and their `<source>` children).
    ///
    /// Default: `true`
    pub keep_videos: bool,

    /// Keep `<audio>` elements (and their `<source>` children).
    ///
    /// Default: `true`
    pub keep_audio: bool,

    /// Use `<article>` instead of `<div>` for the synthesized content root.
    ///
    /// Default: `false`
    pub wrap_in_article: bool,

    /// Merge several high-scoring regions into one content root.
    ///
    /// When disabled, the single best candidate is used.
    ///
    /// Default: `true`
    pub use_clustering: bool,

    /// Number of top-scoring candidates considered for clustering.
    ///
    /// Values below 1 behave like 1.
    ///
    /// Default: `4`
    pub cluster_top_n: usize,

    /// Maximum document-order rank distance between clustered candidates.
    ///
    /// Default: `3`
    pub cluster_max_rank_gap: usize,

    /// Maximum tree depth difference between clustered candidates.
    ///
    /// Default: `2`
    pub cluster_max_depth_delta: usize,

    /// Minimum class/id token Jaccard similarity for clustering.
    ///
    /// Default: `0.2`
    pub cluster_min_token_jaccard: f64,

    /// Remove h1-h3 headings that repeat the article title.
    ///
    /// Default: `true`
    pub remove_title_headers: bool,

    /// Remove byline/timestamp-like headings before the first paragraph.
    ///
    /// Default: `true`
    pub remove_preamble_headers: bool,

    /// Anchors farther than this many tree hops from the content root
    /// are penalized as pagination candidates.
    ///
    /// Default: `6`
    pub max_pagination_distance_from_root: usize,

    /// Minimum accumulated score for a next-page link to be reported.
    ///
    /// Default: `0.6`
    pub min_next_page_confidence: f64,

    /// Let a matching domain rule's content root bypass scoring.
    ///
    /// Default: `true`
    pub prefer_rule_root: bool,

    /// Populate `Article::lead_image_url`.
    ///
    /// Default: `true`
    pub extract_lead_image: bool,

    /// Populate `Article::next_page_url`.
    ///
    /// Default: `true`
    pub detect_next_page: bool,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            keep_iframes: false,
            keep_videos: true,
            keep_audio: true,
            wrap_in_article: false,
            use_clustering: true,
            cluster_top_n: 4,
            cluster_max_rank_gap: 3,
            cluster_max_depth_delta: 2,
            cluster_min_token_jaccard: 0.2,
            remove_title_headers: true,
            remove_preamble_headers: true,
            max_pagination_distance_from_root: 6,
            min_next_page_confidence: 0.6,
            prefer_rule_root: true,
            extract_lead_image: true,
            detect_next_page: true,
        }
    }
}

impl ExtractionOptions {
    /// Parse options from a JSON document. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Effective number of candidates to cluster (never below 1).
    #[must_use]
    pub fn effective_top_n(&self) -> usize {
        self.cluster_top_n.max(1)
    }
}
