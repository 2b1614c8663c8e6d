//! Extraction pipeline.
//!
//! Runs the stages in a fixed order over one owned tree:
//! parse, document cleaning, metadata, content selection (rule root or
//! scored candidates), next-page detection, content cleaning,
//! serialization, lead image and overrides. Any stage error aborts the
//! call with no partial output.

use dom_query::{Document, Selection};
use url::Url;

use crate::candidates::collect_candidates;
use crate::cleaning;
use crate::cluster;
use crate::dom::{self, StructuralPath};
use crate::error::{Error, Result};
use crate::lead_image;
use crate::metadata;
use crate::options::ExtractionOptions;
use crate::pagination;
use crate::patterns::WHITESPACE_NORMALIZE;
use crate::result::Article;
use crate::rules::{DomainRules, MetadataOverride};

/// Minimum trimmed text length of an extracted article.
pub(crate) const MIN_ARTICLE_TEXT: usize = 80;

/// Length of a synthesized excerpt before the ellipsis.
const EXCERPT_CHARS: usize = 240;

/// Deep copy of the selected content plus where it came from.
struct Selected {
    document: Document,
    source_paths: Vec<StructuralPath>,
}

/// Excerpt built from the article text when the page has no description.
pub(crate) fn synthesize_excerpt(text: &str) -> Option<String> {
    let flat = WHITESPACE_NORMALIZE.replace_all(text.trim(), " ");
    if flat.is_empty() {
        return None;
    }
    if flat.chars().count() <= EXCERPT_CHARS {
        return Some(flat.into_owned());
    }
    let mut excerpt: String = flat.chars().take(EXCERPT_CHARS).collect();
    excerpt.push('…');
    Some(excerpt)
}

/// Content root preferred by a matching rule, copied out of the page.
fn rule_root(doc: &Document, url: &Url, rules: &dyn DomainRules, options: &ExtractionOptions) -> Option<Selected> {
    let root = rules.preferred_content_root(doc, url)?;
    let path = StructuralPath::of_selection(&root)?;
    tracing::debug!(%path, "using rule content root");
    Some(Selected {
        document: dom::copy_into_wrapper(&[root], cluster::wrapper_tag(options)),
        source_paths: vec![path],
    })
}

/// Score, cluster and copy the best region of `body`.
fn scored_root<'a>(
    doc: &'a Document,
    body: &Selection<'a>,
    url: &Url,
    rules: Option<&dyn DomainRules>,
    options: &ExtractionOptions,
) -> Result<Selected> {
    let adjustments = rules
        .map(|r| r.candidate_score_adjustments(doc, url))
        .unwrap_or_default();
    let candidates = collect_candidates(body, &adjustments);
    tracing::debug!(candidates = candidates.len(), adjustments = adjustments.len(), "collected candidates");

    let members = if options.use_clustering {
        cluster::select_members(&candidates, options)
    } else {
        cluster::best_candidate(&candidates).into_iter().collect()
    };
    if members.is_empty() {
        return Err(Error::NoReadableContent);
    }

    tracing::debug!(
        members = members.len(),
        paths = ?members.iter().map(|c| c.path.to_string()).collect::<Vec<_>>(),
        "selected content"
    );
    Ok(Selected {
        document: cluster::synthesize_root(&members, options),
        source_paths: cluster::member_paths(&members),
    })
}

/// Run the full pipeline on one page.
pub(crate) fn extract_document(
    html: &str,
    url: &Url,
    options: &ExtractionOptions,
    rules: Option<&dyn DomainRules>,
) -> Result<Article> {
    if html.trim().is_empty() {
        return Err(Error::EmptyHtml);
    }

    let document = dom::parse(html);
    cleaning::clean_document(&document, options);
    let page_metadata = metadata::extract_metadata(&document);

    let body = document.select("body");
    if !body.exists() {
        return Err(Error::ParseFailed);
    }

    let rules = rules.filter(|r| r.matches(url));
    let preferred = match rules {
        Some(r) if options.prefer_rule_root => rule_root(&document, url, r, options),
        _ => None,
    };
    let selected = match preferred {
        Some(selected) => selected,
        None => scored_root(&document, &body, url, rules, options)?,
    };

    let next_page_url = if options.detect_next_page {
        pagination::detect_next_page(&document, url, &selected.source_paths, options)
    } else {
        None
    };

    let overrides = rules
        .map(|r| r.metadata_overrides(&document, url))
        .unwrap_or_default();
    let MetadataOverride {
        title: title_override,
        byline: byline_override,
        excerpt: excerpt_override,
        lead_image_url: image_override,
    } = overrides;
    let title = metadata::resolve_title(title_override.or(page_metadata.title), url);

    let root = dom::content_root(&selected.document);
    cleaning::clean_content_root(&root, Some(&title), options);

    let content_html = dom::outer_html(&root).to_string();
    let text_content = dom::flatten_text(&root);
    let text_length = text_content.trim().chars().count();
    if text_length < MIN_ARTICLE_TEXT {
        tracing::debug!(text_length, "content too short");
        return Err(Error::NoReadableContent);
    }

    let lead_image_url = if options.extract_lead_image {
        image_override.or_else(|| lead_image::extract_lead_image(&document, &root, url))
    } else {
        None
    };

    let excerpt = excerpt_override
        .or(page_metadata.excerpt)
        .or_else(|| synthesize_excerpt(&text_content));

    tracing::debug!(%url, text_length, has_next_page = next_page_url.is_some(), "extracted article");
    Ok(Article {
        url: url.to_string(),
        title,
        byline: byline_override.or(page_metadata.byline),
        excerpt,
        content_html,
        text_content,
        lead_image_url,
        next_page_url,
    })
}
