//! The classic content-scoring algorithm (C8): score candidate paragraphs,
//! propagate "gravity" to parents/grandparents, and pick the highest-scoring
//! parent as the article's main-content subtree.
//!
//! Gravity is tracked in an external map keyed on node identity rather than
//! mutated onto the DOM (the original design's `gravityScore`/`gravityNodes`
//! scratch attributes) — see the REDESIGN FLAG in SPEC_FULL.md §9. The map is
//! local to a single [`calculate_best_node`] call and never outlives it.

use crate::config::ExtractorConfig;
use crate::dom::{Document, Node};
use crate::text::keywords::{BuiltinStopwords, StopwordsProvider};
use std::collections::HashMap;

#[derive(Default, Clone, Copy)]
struct GravityEntry {
    score: f64,
    nodes: u32,
}

/// Find the DOM subtree most likely to contain the article body.
///
/// Uses the built-in English-weighted stopword list; see
/// [`crate::text::keywords::StopwordsProvider`] for plugging in a richer one.
pub fn calculate_best_node(doc: &mut Document, config: &ExtractorConfig) -> Option<Node> {
    calculate_best_node_with_stopwords(doc, config, &BuiltinStopwords)
}

pub fn calculate_best_node_with_stopwords(
    doc: &mut Document,
    config: &ExtractorConfig,
    stopwords: &dyn StopwordsProvider,
) -> Option<Node> {
    let candidates: Vec<Node> = doc
        .select_tags(&["p", "pre", "td"])
        .into_iter()
        .filter(|&n| {
            stopwords.count(&doc.text(n), "en") > config.min_stopword_count
                && !is_link_dense(doc, n, config)
        })
        .collect();

    if candidates.is_empty() {
        return None;
    }

    let mut gravity: HashMap<Node, GravityEntry> = HashMap::new();
    let total = candidates.len();
    let bottom_quarter_count = total / 4;
    let mut tail_penalty_accum: f64 = 0.0;
    let mut boost_index: u32 = 1;

    for (position, &node) in candidates.iter().enumerate() {
        let mut upscore = stopwords.count(&doc.text(node), "en") as f64;

        if is_boostable(doc, node, stopwords) {
            upscore += (50.0 / boost_index as f64).floor();
            boost_index += 1;
        }

        if total > config.tail_penalty_trigger_count {
            let remaining = total - position;
            if remaining <= bottom_quarter_count {
                let booster = bottom_quarter_count as f64 - remaining as f64;
                let penalty = -(booster * booster);
                if (tail_penalty_accum + penalty).abs() > config.tail_penalty_cap as f64 {
                    upscore += 5.0;
                } else {
                    tail_penalty_accum += penalty;
                    upscore += penalty;
                }
            }
        }

        if let Some(parent) = doc.parent(node) {
            let entry = gravity.entry(parent).or_default();
            entry.score += upscore;
            entry.nodes += 1;

            if let Some(grandparent) = doc.parent(parent) {
                let gp_entry = gravity.entry(grandparent).or_default();
                gp_entry.score += upscore / 2.0;
                gp_entry.nodes += 1;
            }
        }
    }

    let (top_node, top_entry) = gravity
        .into_iter()
        .max_by(|(_, a), (_, b)| a.score.partial_cmp(&b.score).unwrap())?;
    tracing::debug!(gravity_score = top_entry.score, contributing_nodes = top_entry.nodes, "top node selected");

    adopt_siblings(doc, top_node, stopwords, config);
    Some(top_node)
}

fn is_boostable(doc: &Document, node: Node, stopwords: &dyn StopwordsProvider) -> bool {
    doc.previous_siblings(node)
        .into_iter()
        .filter(|&s| doc.tag_name(s).as_deref() == Some("p"))
        .take(3)
        .any(|s| stopwords.count(&doc.text(s), "en") > 5)
}

/// Ratio of link-word-count to total-word-count, weighted by link count. A node
/// with links but no alphanumeric words at all is treated as maximally dense.
pub fn link_density(doc: &Document, node: Node) -> f64 {
    let links = doc.select_tags_within(node, &["a"]);
    if links.is_empty() {
        return 0.0;
    }

    let total_words = word_count(&doc.text(node));
    let link_words: usize = links.iter().map(|&a| word_count(&doc.text(a))).sum();

    if total_words == 0 {
        return f64::MAX;
    }

    (link_words as f64 / total_words as f64) * links.len() as f64
}

fn is_link_dense(doc: &Document, node: Node, config: &ExtractorConfig) -> bool {
    link_density(doc, node) >= config.link_density_threshold
}

fn word_count(text: &str) -> usize {
    text.split_whitespace()
        .filter(|w| w.chars().any(|c| c.is_alphanumeric()))
        .count()
}

/// Pull in paragraph content immediately preceding `top_node` that looks like a
/// continuation of the article (used when the scoring pass under-selected the
/// opening paragraphs). Adopted nodes are inserted at the front of `top_node`,
/// in the order encountered walking backward from `top_node`.
fn adopt_siblings(
    doc: &mut Document,
    top_node: Node,
    stopwords: &dyn StopwordsProvider,
    config: &ExtractorConfig,
) {
    let qualifying_paragraphs: Vec<Node> = doc
        .children(top_node)
        .into_iter()
        .filter(|&c| doc.tag_name(c).as_deref() == Some("p"))
        .filter(|&p| stopwords.count(&doc.text(p), "en") > 2 && !is_link_dense(doc, p, config))
        .collect();
    if qualifying_paragraphs.is_empty() {
        return;
    }
    let baseline: f64 = qualifying_paragraphs
        .iter()
        .map(|&p| stopwords.count(&doc.text(p), "en") as f64)
        .sum::<f64>()
        / qualifying_paragraphs.len() as f64;

    for sibling in doc.previous_siblings(top_node) {
        if doc.tag_name(sibling).as_deref() == Some("p") {
            if !doc.text(sibling).trim().is_empty() {
                doc.prepend_existing(top_node, sibling);
            }
            continue;
        }
        let inner_paragraphs: Vec<Node> = doc
            .children(sibling)
            .into_iter()
            .filter(|&c| doc.tag_name(c).as_deref() == Some("p"))
            .collect();
        for p in inner_paragraphs {
            let count = stopwords.count(&doc.text(p), "en") as f64;
            if count > 0.3 * baseline && !is_link_dense(doc, p, config) {
                doc.prepend_existing(top_node, p);
            }
        }
    }
}

/// Remove non-`<p>` children of `top_node` that are link-dense — boilerplate
/// ("related articles", share-button rows) that survived the scoring pass.
pub fn post_cleanup(doc: &mut Document, top_node: Node) {
    post_cleanup_with_config(doc, top_node, &ExtractorConfig::default());
}

pub fn post_cleanup_with_config(doc: &mut Document, top_node: Node, config: &ExtractorConfig) {
    let to_remove: Vec<Node> = doc
        .children(top_node)
        .into_iter()
        .filter(|&c| doc.tag_name(c).as_deref() != Some("p") && is_link_dense(doc, c, config))
        .collect();
    for node in to_remove {
        doc.remove(node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article_html() -> String {
        let mut paragraphs = String::new();
        for i in 0..6 {
            paragraphs.push_str(&format!(
                "<p>This is paragraph number {i} and it contains a fair amount of prose that the quick brown fox and the lazy dog would have written about their day in the park with their friends.</p>"
            ));
        }
        format!(
            "<html><body><div class=\"content\">{paragraphs}</div><div class=\"sidebar\"><p><a href=\"/x\">short link text only</a></p></div></body></html>"
        )
    }

    #[test]
    fn test_calculate_best_node_picks_content_div() {
        let mut doc = Document::parse(&article_html());
        let config = ExtractorConfig::default();
        let top = calculate_best_node(&mut doc, &config).unwrap();
        assert_eq!(doc.attr(top, "class").as_deref(), Some("content"));
    }

    #[test]
    fn test_calculate_best_node_deterministic() {
        let config = ExtractorConfig::default();
        let mut doc_a = Document::parse(&article_html());
        let mut doc_b = Document::parse(&article_html());
        let top_a = calculate_best_node(&mut doc_a, &config);
        let top_b = calculate_best_node(&mut doc_b, &config);
        assert_eq!(
            top_a.map(|n| doc_a.path(n)),
            top_b.map(|n| doc_b.path(n))
        );
    }

    #[test]
    fn test_link_density_no_words_but_links_is_dense() {
        let doc = Document::parse("<div><a href=\"/x\"></a></div>");
        let div = doc.select_tags(&["div"])[0];
        assert!(link_density(&doc, div) >= 1.0);
    }

    #[test]
    fn test_post_cleanup_removes_link_dense_non_paragraph() {
        let mut doc = Document::parse(
            "<div id=\"top\"><p>Real prose paragraph with enough words to count as content.</p><div><a href=\"/a\">a</a><a href=\"/b\">b</a><a href=\"/c\">c</a></div></div>",
        );
        let top = doc.select_tags(&["div"])[0];
        post_cleanup(&mut doc, top);
        assert_eq!(doc.children(top).len(), 1);
    }
}
