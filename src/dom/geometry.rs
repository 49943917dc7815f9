//! Cross-tree node correlation and DOM-distance scoring (C5).
//!
//! `scraper`/`ego-tree` have no XPath support, so correlating a node found in one
//! parse of a page with the "same" node in another parse (original vs. cleaned
//! document) goes through the canonical path string from [`super::Document::path`]
//! instead — see the REDESIGN FLAGS note in SPEC_FULL.md.

use super::{Document, Node};

/// Find the node in `target_doc` that corresponds to `node` in `source_doc`.
///
/// Tries the exact path first; on a miss, strips positional indices
/// (`tag[3]` -> `tag`) and returns the first node in `target_doc` whose
/// index-stripped path matches.
pub fn find_corresponding_node(
    node: Node,
    source_doc: &Document,
    target_doc: &Document,
) -> Option<Node> {
    let source_path = source_doc.path(node);

    for candidate in target_doc.select("*") {
        if target_doc.path(candidate) == source_path {
            return Some(candidate);
        }
    }

    let stripped_source = strip_indices(&source_path);
    target_doc
        .select("*")
        .into_iter()
        .find(|&candidate| strip_indices(&target_doc.path(candidate)) == stripped_source)
}

fn strip_indices(path: &str) -> String {
    path.split('/')
        .map(|segment| match segment.find('[') {
            Some(i) => &segment[..i],
            None => segment,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// DOM-path distance between two nodes in the *same* document: the number of steps
/// up to their common ancestor in the path representation, summed across both
/// sides. `None` if either path is empty (detached node) — stands in for the
/// original's "infinite" distance.
pub fn dom_distance(doc: &Document, a: Node, b: Node) -> Option<usize> {
    let path_a = doc.path(a);
    let path_b = doc.path(b);
    let segs_a: Vec<&str> = path_a.split('/').filter(|s| !s.is_empty()).collect();
    let segs_b: Vec<&str> = path_b.split('/').filter(|s| !s.is_empty()).collect();
    if segs_a.is_empty() || segs_b.is_empty() {
        return None;
    }
    let common = segs_a
        .iter()
        .zip(segs_b.iter())
        .take_while(|(x, y)| x == y)
        .count();
    Some((segs_a.len() - common) + (segs_b.len() - common))
}

/// Additive proximity bonus for a candidate at `distance` from the reference node,
/// capped at 100 and zero once `distance >= max_distance`.
pub fn proximity_score(distance: Option<usize>, max_distance: usize) -> u32 {
    let Some(d) = distance else { return 0 };
    if d >= max_distance || max_distance == 0 {
        return 0;
    }
    (100.0 * (1.0 - d as f64 / max_distance as f64)).floor() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_distance_self_is_zero() {
        let doc = Document::parse("<html><body><p>a</p></body></html>");
        let p = doc.select_tags(&["p"])[0];
        assert_eq!(dom_distance(&doc, p, p), Some(0));
    }

    #[test]
    fn test_dom_distance_symmetric() {
        let doc = Document::parse(
            "<html><body><div><p>a</p></div><div><span>b</span></div></body></html>",
        );
        let p = doc.select_tags(&["p"])[0];
        let span = doc.select_tags(&["span"])[0];
        assert_eq!(dom_distance(&doc, p, span), dom_distance(&doc, span, p));
    }

    #[test]
    fn test_proximity_score_monotonic_and_zero_at_bound() {
        assert!(proximity_score(Some(1), 10) > proximity_score(Some(5), 10));
        assert_eq!(proximity_score(Some(10), 10), 0);
        assert_eq!(proximity_score(None, 10), 0);
    }

    #[test]
    fn test_find_corresponding_node_exact_path() {
        let html = "<html><body><div><p>x</p></div></body></html>";
        let source = Document::parse(html);
        let target = Document::parse(html);
        let p = source.select_tags(&["p"])[0];
        let found = find_corresponding_node(p, &source, &target).unwrap();
        assert_eq!(target.tag_name(found).as_deref(), Some("p"));
    }
}
