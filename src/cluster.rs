//! Clustering Engine
//!
//! Merges several high-scoring, compatible regions into one synthesized
//! content root. Members are deep-copied into a fresh document so the
//! evaluation tree is never touched.

use std::collections::BTreeSet;

use dom_query::{Document, Selection};

use crate::candidates::Candidate;
use crate::dom::{self, StructuralPath};
use crate::options::ExtractionOptions;

/// Intersection over union of two token sets. Two empty sets score 0.
#[must_use]
pub fn token_jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

/// Whether `b` may join a cluster next to `a`.
#[must_use]
pub fn compatible(a: &Candidate, b: &Candidate, options: &ExtractionOptions) -> bool {
    let rank_gap = a.order_index.abs_diff(b.order_index);
    let depth_delta = a.depth.abs_diff(b.depth);

    if rank_gap > options.cluster_max_rank_gap || depth_delta > options.cluster_max_depth_delta {
        return false;
    }

    let similar = token_jaccard(&a.tokens, &b.tokens) >= options.cluster_min_token_jaccard;
    let strong_neighbour = b.score > a.score * 0.9 && rank_gap <= (options.cluster_max_rank_gap / 2).max(1);
    similar || strong_neighbour
}

/// Cluster value: total score plus a small bonus for size.
#[must_use]
pub fn cluster_value(members: &[&Candidate]) -> f64 {
    let sum: f64 = members.iter().map(|c| c.score).sum();
    sum + ((members.len() + 1) as f64).ln() * 0.25
}

/// Top `max(1, top_n)` candidates by score, ties broken by document order.
fn top_candidates<'c, 'a>(candidates: &'c [Candidate<'a>], top_n: usize) -> Vec<&'c Candidate<'a>> {
    let mut ranked: Vec<&Candidate> = candidates.iter().collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.order_index.cmp(&b.order_index)));
    ranked.truncate(top_n.max(1));
    ranked
}

/// Greedy grouping of document-ordered candidates.
fn group<'c, 'a>(ordered: &[&'c Candidate<'a>], options: &ExtractionOptions) -> Vec<Vec<&'c Candidate<'a>>> {
    let mut clusters: Vec<Vec<&Candidate>> = Vec::new();

    for &candidate in ordered {
        let joins = clusters.last().is_some_and(|cluster| {
            let seed = cluster[0];
            let last = cluster[cluster.len() - 1];
            compatible(seed, candidate, options) || compatible(last, candidate, options)
        });

        match clusters.last_mut() {
            Some(cluster) if joins => cluster.push(candidate),
            _ => clusters.push(vec![candidate]),
        }
    }
    clusters
}

/// Drop members nested inside an earlier member. Input is in document
/// order, so an ancestor is always seen before its descendants.
fn outermost<'c, 'a>(members: &[&'c Candidate<'a>]) -> Vec<&'c Candidate<'a>> {
    let mut emitted: Vec<&Candidate> = Vec::new();
    for &member in members {
        let nested = emitted.iter().any(|kept| kept.path.is_ancestor_of(&member.path) || kept.path == member.path);
        if !nested {
            emitted.push(member);
        }
    }
    emitted
}

/// Paths of the candidates that make up the content root, in document order.
///
/// Returns an empty list when there are no candidates.
#[must_use]
pub fn select_members<'c, 'a>(candidates: &'c [Candidate<'a>], options: &ExtractionOptions) -> Vec<&'c Candidate<'a>> {
    let mut top = top_candidates(candidates, options.effective_top_n());
    if top.len() <= 1 {
        return top;
    }

    top.sort_by(|a, b| a.path.cmp(&b.path));
    let clusters = group(&top, options);

    let mut best: Option<(f64, &Vec<&Candidate>)> = None;
    for cluster in &clusters {
        let value = cluster_value(cluster);
        if best.is_none_or(|(best_value, _)| value > best_value) {
            best = Some((value, cluster));
        }
    }

    let members = best.map(|(value, cluster)| {
        tracing::trace!(clusters = clusters.len(), members = cluster.len(), value, "picked cluster");
        cluster.as_slice()
    });
    outermost(members.unwrap_or_default())
}

/// The single highest-scoring candidate (earliest on ties).
#[must_use]
pub fn best_candidate<'c, 'a>(candidates: &'c [Candidate<'a>]) -> Option<&'c Candidate<'a>> {
    top_candidates(candidates, 1).into_iter().next()
}

/// Tag of the synthesized content root.
#[must_use]
pub fn wrapper_tag(options: &ExtractionOptions) -> &'static str {
    if options.wrap_in_article {
        "article"
    } else {
        "div"
    }
}

/// Deep-copy the chosen members into a synthesized root document.
#[must_use]
pub fn synthesize_root(members: &[&Candidate], options: &ExtractionOptions) -> Document {
    let elements: Vec<Selection> = members.iter().map(|c| c.element.clone()).collect();
    dom::copy_into_wrapper(&elements, wrapper_tag(options))
}

/// Paths of members, for callers that need identities after the copy.
#[must_use]
pub fn member_paths(members: &[&Candidate]) -> Vec<StructuralPath> {
    members.iter().map(|c| c.path.clone()).collect()
}
