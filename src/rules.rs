//! Domain Rules
//!
//! Per-site overrides are data, not algorithm: an ordered list of
//! [`SiteRule`] records behind the [`DomainRules`] trait. The extractor
//! consults the trait at three points (content root, score adjustments,
//! metadata) and never depends on any particular site.
//!
//! # Example
//!
//! ```rust
//! use rs_readability::{DomainRules, RuleRegistry};
//! use url::Url;
//!
//! let registry = RuleRegistry::from_json(
//!     r#"[{"domains": ["example.com"], "content_selectors": ["article .body"]}]"#,
//! )
//! .unwrap();
//! let url = Url::parse("https://www.example.com/story").unwrap();
//! assert!(registry.matches(&url));
//! ```

use dom_query::{Document, Selection};
use serde::Deserialize;
use url::Url;

use crate::candidates::ScoreAdjustment;
use crate::dom;
use crate::error::{Error, Result};
use crate::url_utils;

/// Metadata supplied by a rule. Present fields beat the heuristics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataOverride {
    pub title: Option<String>,
    pub byline: Option<String>,
    pub excerpt: Option<String>,
    pub lead_image_url: Option<String>,
}

/// Hook points the extractor consults for a page.
pub trait DomainRules {
    /// Whether any rule applies to `url`.
    fn matches(&self, url: &Url) -> bool;

    /// Element to use as the content root, bypassing scoring.
    fn preferred_content_root<'a>(&self, doc: &'a Document, url: &Url) -> Option<Selection<'a>>;

    /// Score deltas added to the heuristic candidate scores.
    fn candidate_score_adjustments<'a>(&self, doc: &'a Document, url: &Url) -> Vec<ScoreAdjustment<'a>>;

    /// Metadata overrides; relative image URLs resolve against `url`.
    fn metadata_overrides(&self, doc: &Document, url: &Url) -> MetadataOverride;
}

/// A selector paired with the score delta for every element it matches.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SelectorAdjustment {
    pub selector: String,
    pub delta: f64,
}

/// One site's overrides. Every selector list is tried in order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteRule {
    /// Hosts this rule applies to; subdomains match too.
    pub domains: Vec<String>,
    /// Content root candidates; the first selector that matches wins.
    pub content_selectors: Vec<String>,
    /// Score deltas for matching elements.
    pub score_adjustments: Vec<SelectorAdjustment>,
    /// Element whose text is the title.
    pub title_selector: Option<String>,
    /// Element whose text is the byline.
    pub byline_selector: Option<String>,
    /// Element whose text is the excerpt.
    pub excerpt_selector: Option<String>,
    /// Element whose `src`, `content` or `href` is the lead image.
    pub lead_image_selector: Option<String>,
}

/// Select with a user-supplied selector. Unparseable selectors and empty
/// matches both yield `None`.
fn select_rule<'a>(doc: &'a Document, selector: &str) -> Option<Selection<'a>> {
    let matched = doc.try_select(selector).filter(Selection::exists);
    if matched.is_none() {
        tracing::debug!(selector, "rule selector matched nothing");
    }
    matched
}

fn selected_text(doc: &Document, selector: Option<&String>) -> Option<String> {
    let sel = select_rule(doc, selector?)?;
    let text = dom::normalized_text(&sel.first());
    (!text.is_empty()).then_some(text)
}

fn selected_image(doc: &Document, selector: Option<&String>, url: &Url) -> Option<String> {
    let sel = select_rule(doc, selector?)?.first();
    let raw = ["src", "content", "href"]
        .iter()
        .find_map(|attr| dom::non_empty_attribute(&sel, attr))?;
    url_utils::resolve(&raw, url).map(String::from)
}

impl SiteRule {
    /// Whether this rule applies to `url`.
    #[must_use]
    pub fn applies_to(&self, url: &Url) -> bool {
        url_utils::host(url).is_some_and(|host| {
            self.domains
                .iter()
                .any(|domain| url_utils::host_matches_domain(&host, domain))
        })
    }

    fn content_root<'a>(&self, doc: &'a Document) -> Option<Selection<'a>> {
        self.content_selectors
            .iter()
            .find_map(|selector| select_rule(doc, selector))
            .map(|sel| sel.first())
    }

    fn metadata(&self, doc: &Document, url: &Url) -> MetadataOverride {
        MetadataOverride {
            title: selected_text(doc, self.title_selector.as_ref()),
            byline: selected_text(doc, self.byline_selector.as_ref()),
            excerpt: selected_text(doc, self.excerpt_selector.as_ref()),
            lead_image_url: selected_image(doc, self.lead_image_selector.as_ref(), url),
        }
    }
}

/// Ordered collection of [`SiteRule`]s.
///
/// The default registry is empty and matches nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleRegistry {
    rules: Vec<SiteRule>,
}

impl RuleRegistry {
    /// Build a registry from rules, keeping their order.
    #[must_use]
    pub fn new(rules: Vec<SiteRule>) -> Self {
        Self { rules }
    }

    /// Parse a JSON array of rules.
    pub fn from_json(json: &str) -> Result<Self> {
        let rules: Vec<SiteRule> = serde_json::from_str(json).map_err(|e| Error::InvalidRules(e.to_string()))?;
        Ok(Self::new(rules))
    }

    fn matching<'r>(&'r self, url: &'r Url) -> impl Iterator<Item = &'r SiteRule> + 'r {
        self.rules.iter().filter(move |rule| rule.applies_to(url))
    }
}

impl DomainRules for RuleRegistry {
    fn matches(&self, url: &Url) -> bool {
        self.matching(url).next().is_some()
    }

    fn preferred_content_root<'a>(&self, doc: &'a Document, url: &Url) -> Option<Selection<'a>> {
        self.matching(url).find_map(|rule| rule.content_root(doc))
    }

    fn candidate_score_adjustments<'a>(&self, doc: &'a Document, url: &Url) -> Vec<ScoreAdjustment<'a>> {
        let mut adjustments = Vec::new();
        for rule in self.matching(url) {
            for adjustment in &rule.score_adjustments {
                let Some(matched) = select_rule(doc, &adjustment.selector) else {
                    continue;
                };
                for node in matched.nodes() {
                    adjustments.push(ScoreAdjustment {
                        element: Selection::from(*node),
                        delta: adjustment.delta,
                    });
                }
            }
        }
        adjustments
    }

    fn metadata_overrides(&self, doc: &Document, url: &Url) -> MetadataOverride {
        let mut merged = MetadataOverride::default();
        for rule in self.matching(url) {
            let found = rule.metadata(doc, url);
            merged.title = merged.title.or(found.title);
            merged.byline = merged.byline.or(found.byline);
            merged.excerpt = merged.excerpt.or(found.excerpt);
            merged.lead_image_url = merged.lead_image_url.or(found.lead_image_url);
        }
        merged
    }
}
