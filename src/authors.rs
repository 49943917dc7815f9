//! Byline author extraction (A5).
//!
//! A simple grammar: split a candidate byline on common delimiters and
//! conjunctions, treat remaining tokens as name fragments, and drop anything
//! containing a digit. A stricter name grammar (honorifics, suffixes, initials)
//! is a known limitation, not built — see SPEC_FULL.md §9.

use crate::dom::Document;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref BYLINE_SELECTOR_ATTRS: Vec<(&'static str, &'static str)> = vec![
        ("meta[name=\"author\"]", "content"),
        ("meta[property=\"article:author\"]", "content"),
        ("[rel=\"author\"]", ""),
        (".author", ""),
        (".byline", ""),
        ("[itemprop=\"author\"]", ""),
    ];

    static ref LEADING_BY: Regex = Regex::new(r"(?i)^\s*by\s*:?\s*").unwrap();
    static ref SPLIT_DELIMITERS: Regex = Regex::new(r"(?i)\s*(,|&| and )\s*").unwrap();
    static ref HAS_DIGIT: Regex = Regex::new(r"\d").unwrap();
}

/// Collect author names from meta tags and common byline markup.
pub fn get_authors(doc: &Document) -> Vec<String> {
    let mut authors = Vec::new();
    let mut seen = std::collections::HashSet::new();

    for (selector, attr) in BYLINE_SELECTOR_ATTRS.iter() {
        for node in doc.select(selector) {
            let raw = if attr.is_empty() {
                doc.text(node)
            } else {
                doc.attr(node, attr).unwrap_or_default()
            };
            for name in split_byline(&raw) {
                if seen.insert(name.clone()) {
                    authors.push(name);
                }
            }
        }
    }

    authors
}

fn split_byline(raw: &str) -> Vec<String> {
    let without_prefix = LEADING_BY.replace(raw, "");
    SPLIT_DELIMITERS
        .split(&without_prefix)
        .map(str::trim)
        .filter(|s| !s.is_empty() && !HAS_DIGIT.is_match(s))
        .map(str::to_string)
        .collect()
}
