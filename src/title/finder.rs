//! Scored title selection among heading/paragraph candidates, `<title>`, and
//! `og:title`, followed by pipe/dash post-split cleanup (C7).

use crate::dom::geometry::{dom_distance, find_corresponding_node};
use crate::dom::{Document, Node};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TITLE_HINT: Regex = Regex::new(r"(?i)title|headline|heading").unwrap();
    static ref PENALTY_ZONE: Regex =
        Regex::new(r"(?i)nav|aside|sidebar|footer|related-posts|comments|e-loop-item|post-navigation").unwrap();
    static ref SENTENCE_PUNCTUATION: Regex = Regex::new(r"[.?!:»]").unwrap();
}

const MAX_TITLE_PROXIMITY_DISTANCE: usize = 4;

struct Candidate {
    node: Node,
    text: String,
    score: f64,
}

/// Select the best title for the article.
///
/// `top_node` is expected in `cleaned_doc`'s coordinate space (as produced by
/// [`crate::content::calculate_best_node`]); it is remapped into
/// `original_doc` via [`find_corresponding_node`] since heading/paragraph
/// candidates are gathered from the uncleaned document, where boilerplate
/// headings haven't yet been stripped out.
pub fn get_title(original_doc: &Document, cleaned_doc: &Document, top_node: Option<Node>) -> String {
    let title_text = original_doc
        .select("title")
        .into_iter()
        .next()
        .map(|n| original_doc.text(n))
        .unwrap_or_default();

    let title_og = original_doc
        .select("meta[property=\"og:title\"], meta[name=\"og:title\"]")
        .into_iter()
        .next()
        .and_then(|n| original_doc.attr(n, "content"))
        .unwrap_or_default();

    let mapped_top = top_node.and_then(|t| find_corresponding_node(t, cleaned_doc, original_doc));

    let heuristic = best_heuristic_candidate(original_doc, mapped_top);

    let chosen = pick_weighted(&heuristic, &title_og, &title_text);
    let hint = heuristic.as_ref().map(|c| c.text.as_str()).or(Some(title_og.as_str()));

    let result = post_process(&chosen, hint);
    tracing::debug!(title = %result, "title selected");
    result
}

fn best_heuristic_candidate(doc: &Document, mapped_top: Option<Node>) -> Option<Candidate> {
    let mut candidates: Vec<Candidate> = doc
        .select_tags(&["h1", "h2", "h3", "p"])
        .into_iter()
        .filter_map(|node| score_candidate(doc, node, mapped_top))
        .collect();

    candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap());
    candidates.into_iter().find(|c| c.score > 70.0)
}

fn score_candidate(doc: &Document, node: Node, mapped_top: Option<Node>) -> Option<Candidate> {
    let text = doc.text(node);
    let len = text.chars().count();
    if !(15..=250).contains(&len) {
        return None;
    }

    let tag = doc.tag_name(node).unwrap_or_default();
    let mut score = 0.0;
    if tag == "h1" {
        score += 100.0;
    } else if tag == "h2" {
        score += 30.0;
    }

    let class = doc.attr(node, "class").unwrap_or_default();
    let id = doc.attr(node, "id").unwrap_or_default();
    if TITLE_HINT.is_match(&class) || TITLE_HINT.is_match(&id) {
        score += 85.0;
    }

    if let Some(top) = mapped_top {
        if is_descendant(doc, top, node) {
            score += 50.0;
        } else if let Some(d) = dom_distance(doc, node, top) {
            if d <= MAX_TITLE_PROXIMITY_DISTANCE {
                score += 80.0;
            }
        }
    }

    if tag == "p" {
        let word_count = text.split_whitespace().count();
        if SENTENCE_PUNCTUATION.is_match(&text) || word_count > 25 {
            score -= 50.0;
        }
    }

    if ancestor_in_penalty_zone(doc, node) {
        score -= 100.0;
    }

    Some(Candidate { node, text, score })
}

fn is_descendant(doc: &Document, ancestor: Node, node: Node) -> bool {
    let mut current = doc.parent(node);
    while let Some(n) = current {
        if n == ancestor {
            return true;
        }
        current = doc.parent(n);
    }
    false
}

fn ancestor_in_penalty_zone(doc: &Document, node: Node) -> bool {
    let mut current = doc.parent(node);
    while let Some(n) = current {
        let class = doc.attr(n, "class").unwrap_or_default();
        let id = doc.attr(n, "id").unwrap_or_default();
        let tag = doc.tag_name(n).unwrap_or_default();
        if PENALTY_ZONE.is_match(&class) || PENALTY_ZONE.is_match(&id) || PENALTY_ZONE.is_match(&tag) {
            return true;
        }
        current = doc.parent(n);
    }
    false
}

fn pick_weighted(heuristic: &Option<Candidate>, og: &str, title: &str) -> String {
    let mut best = String::new();
    let mut best_weight = f64::MIN;

    if let Some(c) = heuristic {
        let weight = 1.0 * c.text.chars().count() as f64;
        if weight > best_weight {
            best_weight = weight;
            best = c.text.clone();
        }
    }
    if !og.is_empty() {
        let weight = 0.9 * og.chars().count() as f64;
        if weight > best_weight {
            best_weight = weight;
            best = og.to_string();
        }
    }
    if !title.is_empty() {
        let weight = 0.5 * title.chars().count() as f64;
        if weight > best_weight {
            best = title.to_string();
        }
    }
    best
}

fn post_process(title: &str, hint: Option<&str>) -> String {
    let cleaned = title.replace('\u{FFFD}', "");

    let pieces: Vec<&str> = if cleaned.contains('|') {
        cleaned.split('|').collect()
    } else if cleaned.contains(" - ") {
        cleaned.split(" - ").collect()
    } else {
        return cleaned.trim().to_string();
    };

    let hint_alnum = hint.map(keep_alphanumeric).unwrap_or_default();

    let chosen = if !hint_alnum.is_empty() {
        pieces
            .iter()
            .find(|p| !hint_alnum.is_empty() && keep_alphanumeric(p).contains(&hint_alnum))
            .or_else(|| pieces.iter().max_by_key(|p| p.trim().chars().count()))
    } else {
        pieces.iter().max_by_key(|p| p.trim().chars().count())
    };

    chosen.unwrap_or(&cleaned.as_str()).trim().to_string()
}

fn keep_alphanumeric(s: &str) -> String {
    s.chars().filter(|c| c.is_alphanumeric()).collect::<String>().to_lowercase()
}
