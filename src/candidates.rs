//! Candidate Collector
//!
//! Walks the body and accumulates a score per structural position from two
//! passes: paragraph propagation (each scoring paragraph feeds its parent
//! and grandparent) and container density (article/main/section/div feed
//! themselves). Both passes add into the same map.

use std::collections::{BTreeSet, HashMap};

use dom_query::{NodeRef, Selection};

use crate::dom::{self, StructuralPath};
use crate::link_density::link_density;
use crate::patterns::{CONTAINER_SELECTOR, HARD_NEGATIVE_TOKENS, IGNORED_TOKENS, PARAGRAPH_SELECTOR};
use crate::scoring::{class_weight, density_score, fixed_chrome_penalty, paragraph_score};

/// A scored tree position considered as part of the article.
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    /// Structural identity of the element.
    pub path: StructuralPath,
    /// Dense rank among all candidates in document order.
    pub order_index: usize,
    /// Number of element ancestors.
    pub depth: usize,
    /// Accumulated score.
    pub score: f64,
    /// Normalized class/id words.
    pub tokens: BTreeSet<String>,
    /// The element in the evaluated tree.
    pub element: Selection<'a>,
}

/// An externally supplied score delta for one element.
#[derive(Debug, Clone)]
pub struct ScoreAdjustment<'a> {
    /// Element whose score is adjusted.
    pub element: Selection<'a>,
    /// Added to the heuristic score.
    pub delta: f64,
}

/// Accumulator preserving first-insertion order so iteration is stable.
#[derive(Default)]
struct ScoreMap<'a> {
    index: HashMap<StructuralPath, usize>,
    entries: Vec<(StructuralPath, NodeRef<'a>, f64)>,
}

impl<'a> ScoreMap<'a> {
    fn add(&mut self, node: NodeRef<'a>, amount: f64) {
        let path = StructuralPath::of(&node);
        if let Some(&i) = self.index.get(&path) {
            self.entries[i].2 += amount;
        } else {
            self.index.insert(path.clone(), self.entries.len());
            self.entries.push((path, node, amount));
        }
    }
}

/// Normalized class/id tokens of an element.
///
/// Words of at least three characters, lowercased, without the generic
/// chrome words. Empty when the raw class/id mentions comments.
#[must_use]
pub fn candidate_tokens(sel: &Selection) -> BTreeSet<String> {
    let raw = dom::class_and_id(sel).to_ascii_lowercase();
    if HARD_NEGATIVE_TOKENS.iter().any(|neg| raw.contains(neg)) {
        return BTreeSet::new();
    }
    raw.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| word.chars().count() >= 3)
        .filter(|word| !IGNORED_TOKENS.contains(word))
        .map(str::to_string)
        .collect()
}

/// Collect scored candidates under `body`, in document order.
///
/// `adjustments` are added after the heuristic passes; an adjusted element
/// that earned no heuristic score still becomes an entry. Only entries with
/// a positive final score are returned.
#[must_use]
pub fn collect_candidates<'a>(body: &Selection<'a>, adjustments: &[ScoreAdjustment<'a>]) -> Vec<Candidate<'a>> {
    let mut scores = ScoreMap::default();

    for node in body.select(PARAGRAPH_SELECTOR).nodes() {
        let paragraph = Selection::from(*node);
        let p_score = paragraph_score(&paragraph);
        if p_score <= 0.0 {
            continue;
        }

        let combined = p_score * 0.6 + density_score(&paragraph) * 0.4;
        let damping = 1.0 - link_density(&paragraph).min(0.85);
        let weight = class_weight(&paragraph);

        let mut ancestor = dom::element_parent(node);
        for level in 1..=2_u32 {
            let Some(target) = ancestor else {
                break;
            };
            if dom::node_is(&target, &["html"]) {
                break;
            }
            let divisor = if level == 1 { 2.0 } else { 4.0 };
            let increment = (combined / f64::from(level)) * damping + weight / divisor;
            scores.add(target, increment);
            ancestor = dom::element_parent(&target);
        }
    }

    for node in body.select(CONTAINER_SELECTOR).nodes() {
        let container = Selection::from(*node);
        let density = density_score(&container);
        if density <= 0.0 {
            continue;
        }
        let increment = density * (1.0 - link_density(&container).min(0.85)) + class_weight(&container) * 0.25;
        scores.add(*node, increment);
    }

    for entry in &mut scores.entries {
        entry.2 += fixed_chrome_penalty(&Selection::from(entry.1));
    }

    for adjustment in adjustments {
        if let Some(node) = adjustment.element.nodes().first() {
            scores.add(*node, adjustment.delta);
        }
    }

    let mut positive: Vec<(StructuralPath, NodeRef<'a>, f64)> =
        scores.entries.into_iter().filter(|(_, _, score)| *score > 0.0).collect();
    positive.sort_by(|a, b| a.0.cmp(&b.0));

    positive
        .into_iter()
        .enumerate()
        .map(|(order_index, (path, node, score))| {
            let element = Selection::from(node);
            Candidate {
                depth: dom::depth(&node),
                tokens: candidate_tokens(&element),
                path,
                order_index,
                score,
                element,
            }
        })
        .collect()
}
