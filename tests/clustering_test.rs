//! Candidate collection and clustering over whole pages.

#![allow(clippy::expect_used)] // expect() is appropriate in tests for clear panic messages

use dom_query::Document;
use rs_readability::candidates::collect_candidates;
use rs_readability::cluster::{best_candidate, select_members};
use rs_readability::dom::{self, content_root};
use rs_readability::ExtractionOptions;

const PROSE: &str = "Volunteers counted forty-two species in the wetland this year, up from thirty, and the heron colony doubled.";

fn layered_page() -> String {
    format!(
        r#"<html><body>
            <main class="main">
              <section class="post-section"><div class="post-body"><p>{PROSE}</p><p>{PROSE}</p></div></section>
              <section class="post-section"><div class="post-body"><p>{PROSE}</p></div></section>
            </main>
            <aside class="rail"><ul><li><a href="/a">A link</a></li><li><a href="/b">B link</a></li></ul></aside>
        </body></html>"#
    )
}

#[test]
fn members_never_nest() {
    let doc = Document::from(layered_page());
    let candidates = collect_candidates(&doc.select("body"), &[]);
    assert!(!candidates.is_empty());

    for top_n in [1, 2, 4, 8] {
        let options = ExtractionOptions {
            cluster_top_n: top_n,
            ..ExtractionOptions::default()
        };
        let members = select_members(&candidates, &options);
        assert!(!members.is_empty());
        for a in &members {
            for b in &members {
                assert!(!a.path.is_ancestor_of(&b.path), "{} contains {}", a.path, b.path);
            }
        }
    }
}

#[test]
fn candidates_are_in_document_order_with_dense_ranks() {
    let doc = Document::from(layered_page());
    let candidates = collect_candidates(&doc.select("body"), &[]);

    for (i, candidate) in candidates.iter().enumerate() {
        assert_eq!(candidate.order_index, i);
        assert!(candidate.score > 0.0);
    }
    for pair in candidates.windows(2) {
        assert!(pair[0].path < pair[1].path);
    }
}

#[test]
fn link_rail_is_not_a_candidate() {
    let doc = Document::from(layered_page());
    let candidates = collect_candidates(&doc.select("body"), &[]);
    assert!(candidates
        .iter()
        .all(|c| !matches!(dom::tag_name(&c.element).as_deref(), Some("aside" | "ul" | "li"))));
}

#[test]
fn best_candidate_matches_top_one_cluster() {
    let doc = Document::from(layered_page());
    let candidates = collect_candidates(&doc.select("body"), &[]);
    let options = ExtractionOptions {
        cluster_top_n: 1,
        ..ExtractionOptions::default()
    };

    let best = best_candidate(&candidates).expect("a best candidate");
    let members = select_members(&candidates, &options);
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].path, best.path);
}

#[test]
fn synthesized_root_is_a_detached_copy() {
    let doc = Document::from(layered_page());
    let candidates = collect_candidates(&doc.select("body"), &[]);
    let members = select_members(&candidates, &ExtractionOptions::default());

    let copy = rs_readability::cluster::synthesize_root(&members, &ExtractionOptions::default());
    let root = content_root(&copy);
    assert!(root.exists());
    root.select("p").remove();

    assert_eq!(doc.select("p").length(), 3);
}
