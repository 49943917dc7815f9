//! Tiered publication-date strategy (C6): URL, then metadata tags, then `<time>`,
//! then scored heuristic candidates. The first tier to produce a valid instant wins
//! — even a coarse URL match beats a precise meta tag, which is the original
//! implementation's documented (if debatable) tier order; see SPEC_FULL.md §9.

use crate::config::ExtractorConfig;
use crate::date::parser::parse_and_validate_with_config as parse_and_validate_cfg;
use crate::dom::geometry::{dom_distance, proximity_score};
use crate::dom::{Document, Node};
use crate::text::keywords::{
    contains_month, MONTHS_AR, MONTHS_DE, MONTHS_EN, MONTHS_ES, MONTHS_FR, PUBLICATION_KEYWORD_REGEX,
};
use crate::url_utils::STRICT_DATE_REGEX;
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DATE_ATTR_HINT: Regex = Regex::new(r"(?i)date|time|publish|created|updated").unwrap();
    static ref CLASS_HINT: Regex =
        Regex::new(r"(?i)publish|timestamp|date|entry-date|post-date|time").unwrap();
    static ref ID_HINT: Regex = Regex::new(r"(?i)publish|date|time|created|updated").unwrap();
    static ref PENALTY_ZONE: Regex = Regex::new(r"(?i)nav|aside|sidebar|footer").unwrap();

    static ref META_TAG_SELECTORS: Vec<(&'static str, &'static str)> = vec![
        ("meta[property=\"article:published_time\"]", "content"),
        ("meta[itemprop=\"datePublished\"]", "datetime"),
        ("meta[name=\"pubdate\"]", "content"),
        ("meta[name=\"published_time\"]", "content"),
        ("meta[name=\"publish_date\"]", "content"),
        ("meta[property=\"og:published_time\"]", "content"),
        ("meta[name=\"date\"]", "content"),
        ("meta[name=\"DC.date.issued\"]", "content"),
        ("meta[name=\"dcterms.created\"]", "content"),
        ("meta[name=\"OriginalPublicationDate\"]", "content"),
        ("meta[name=\"sailthru.date\"]", "content"),
        ("meta[name=\"article_date_original\"]", "content"),
        ("meta[name=\"publication_date\"]", "content"),
        ("meta[name=\"PublishDate\"]", "content"),
        ("[property=\"rnews:datePublished\"]", "content"),
        ("[data-publishdate]", "data-publishdate"),
    ];

    static ref EMBEDDED_ISO: Regex =
        Regex::new(r"(19|20)\d{2}[-/.]\d{1,2}[-/.]\d{1,2}").unwrap();
}

/// Find the article's publication instant, trying each tier in order.
pub fn get_publishing_date(
    url: &str,
    original_doc: &Document,
    top_node: Option<Node>,
    config: &ExtractorConfig,
) -> Option<DateTime<Utc>> {
    let now = Utc::now();

    if let Some(dt) = tier_url(url, now, config) {
        tracing::debug!(tier = "url", %dt, "publication date found");
        return Some(dt);
    }
    if let Some(dt) = tier_meta_tags(original_doc, now, config) {
        tracing::debug!(tier = "meta", %dt, "publication date found");
        return Some(dt);
    }
    if let Some(dt) = tier_time_element(original_doc, now, config) {
        tracing::debug!(tier = "time-element", %dt, "publication date found");
        return Some(dt);
    }
    let dt = tier_heuristic(original_doc, top_node, config, now);
    if let Some(dt) = dt {
        tracing::debug!(tier = "heuristic", %dt, "publication date found");
    }
    dt
}

fn tier_url(url: &str, now: DateTime<Utc>, config: &ExtractorConfig) -> Option<DateTime<Utc>> {
    let m = STRICT_DATE_REGEX.find(url)?;
    parse_and_validate_cfg(m.as_str(), false, true, now, config)
}

fn tier_meta_tags(doc: &Document, now: DateTime<Utc>, config: &ExtractorConfig) -> Option<DateTime<Utc>> {
    for (selector, attr) in META_TAG_SELECTORS.iter() {
        for node in doc.select(selector) {
            if let Some(value) = doc.attr(node, attr) {
                if let Some(dt) = parse_and_validate_cfg(&value, false, false, now, config) {
                    return Some(dt);
                }
            }
        }
    }
    None
}

fn tier_time_element(doc: &Document, now: DateTime<Utc>, config: &ExtractorConfig) -> Option<DateTime<Utc>> {
    for node in doc.select("time[datetime]") {
        if let Some(value) = doc.attr(node, "datetime") {
            if let Some(dt) = parse_and_validate_cfg(&value, false, false, now, config) {
                return Some(dt);
            }
        }
    }
    None
}

struct Candidate {
    node: Node,
    text: String,
    score: f64,
}

fn tier_heuristic(
    doc: &Document,
    top_node: Option<Node>,
    config: &ExtractorConfig,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    let mut candidates: Vec<Candidate> = doc
        .select_tags(&["p", "span", "div", "td", "time"])
        .into_iter()
        .filter_map(|node| build_candidate(doc, node, top_node, config))
        .collect();

    candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap());

    for candidate in candidates.into_iter().filter(|c| c.score >= -30.0) {
        if let Some(dt) = parse_and_validate_cfg(&candidate.text, true, false, now, config) {
            return Some(dt);
        }
    }
    None
}

fn build_candidate(
    doc: &Document,
    node: Node,
    top_node: Option<Node>,
    config: &ExtractorConfig,
) -> Option<Candidate> {
    let text = doc.text(node);
    let len = text.chars().count();
    if !(6..=200).contains(&len) {
        return None;
    }

    let class = doc.attr(node, "class").unwrap_or_default();
    let id = doc.attr(node, "id").unwrap_or_default();
    let has_attr_signal = DATE_ATTR_HINT.is_match(&class)
        || DATE_ATTR_HINT.is_match(&id)
        || doc.attr(node, "data-publishdate").is_some();

    let (text, mut score, is_synthesized) = if is_likely_date_text(&text) || has_attr_signal {
        (text, 0.0, false)
    } else if len > 100 {
        let embedded = EMBEDDED_ISO.find(&text)?.as_str().to_string();
        (embedded, 80.0, true)
    } else {
        return None;
    };

    if has_attr_signal {
        score += 50.0;
    }
    if len <= 30 {
        score += 40.0;
    } else if len <= 50 {
        score += 20.0;
    }

    let proximity_weight = if has_attr_signal {
        1.0
    } else if is_synthesized {
        0.7
    } else {
        0.3
    };
    if let Some(top) = top_node {
        let distance = dom_distance(doc, node, top);
        score += proximity_score(distance, config.max_distance) as f64 * proximity_weight;
    }

    if PUBLICATION_KEYWORD_REGEX.is_match(&text) {
        score += 100.0;
    }
    if CLASS_HINT.is_match(&class) {
        score += 80.0;
    }
    if ID_HINT.is_match(&id) {
        score += 120.0;
    }
    if doc.tag_name(node).as_deref() == Some("time") {
        score += 60.0;
    }
    if ancestor_in_penalty_zone(doc, node) {
        score -= 20.0;
    }

    Some(Candidate { node, text, score })
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

lazy_static! {
    // Explicit numeric dates: D/M/Y or M/D/Y, and Y/M/D, unanchored (a date can
    // appear anywhere in the candidate text, not only at its start).
    static ref LIKELY_DATE_FULL: Regex = Regex::new(
        r"(?i)\b\d{1,2}[-/.]\d{1,2}[-/.](19|20)\d{2}\b|\b(19|20)\d{2}[-/.]\d{1,2}[-/.]\d{1,2}\b|(19|20)\d{2}-\d{2}-\d{2}T\d{2}:\d{2}|\b\d{1,2}:\d{2}\s*(am|pm|ص|م)\b|(published|updated|posted|created):\s*\d"
    ).unwrap();

    // "Day Month-name Year" as a literal alternative, built from the same
    // per-language month tables the trie is built from.
    static ref ALL_MONTH_NAMES: String = MONTHS_EN
        .iter()
        .chain(MONTHS_ES)
        .chain(MONTHS_DE)
        .chain(MONTHS_FR)
        .chain(MONTHS_AR)
        .copied()
        .collect::<Vec<_>>()
        .join("|");
    static ref DAY_MONTH_YEAR_TEXT: Regex =
        Regex::new(&format!(r"(?i)\b\d{{1,2}}\s+({})\.?,?\s+(19|20)\d{{2}}\b", *ALL_MONTH_NAMES)).unwrap();

    static ref HAS_YEAR: Regex = Regex::new(r"(19|20)\d{2}").unwrap();
}

fn is_likely_date_text(text: &str) -> bool {
    if LIKELY_DATE_FULL.is_match(text) || DAY_MONTH_YEAR_TEXT.is_match(text) {
        return true;
    }
    HAS_YEAR.is_match(text) && contains_month(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_url_wins_even_with_meta_tag_present() {
        let doc = Document::parse(
            r#"<html><head><meta property="article:published_time" content="2024-01-01"></head><body></body></html>"#,
        );
        let config = ExtractorConfig::default();
        let dt = get_publishing_date(
            "https://example.com/news/2023/12/25/big-story",
            &doc,
            None,
            &config,
        )
        .unwrap();
        assert_eq!(dt.format("%Y-%m-%d").to_string(), "2023-12-25");
    }

    #[test]
    fn test_meta_tag_tier_used_without_url_date() {
        let doc = Document::parse(
            r#"<html><head><meta property="article:published_time" content="2024-02-02"></head><body></body></html>"#,
        );
        let config = ExtractorConfig::default();
        let dt = get_publishing_date("https://example.com/news/story", &doc, None, &config).unwrap();
        assert_eq!(dt.format("%Y-%m-%d").to_string(), "2024-02-02");
    }

    #[test]
    fn test_time_element_tier() {
        let doc = Document::parse(
            r#"<html><body><time datetime="2024-03-03">March 3</time></body></html>"#,
        );
        let config = ExtractorConfig::default();
        let dt = get_publishing_date("https://example.com/story", &doc, None, &config).unwrap();
        assert_eq!(dt.format("%Y-%m-%d").to_string(), "2024-03-03");
    }

    #[test]
    fn test_heuristic_tier_scores_date_class() {
        let doc = Document::parse(
            r#"<html><body><div class="nav"><span class="post-date">Published 3 March 2020</span></div></body></html>"#,
        );
        let config = ExtractorConfig::default();
        let dt = get_publishing_date("https://example.com/story", &doc, None, &config).unwrap();
        assert_eq!(dt.format("%Y-%m-%d").to_string(), "2020-03-03");
    }

    #[test]
    fn test_is_likely_date_text_catches_long_day_month_year_sentence() {
        let text = "Posted by J. Smith on 15 March 2024 after the morning briefing";
        assert!(text.chars().count() > 50);
        assert!(is_likely_date_text(text));
    }

    #[test]
    fn test_is_likely_date_text_numeric_date_need_not_be_leading() {
        assert!(is_likely_date_text("Ref 88, filed 5/3/2024 by staff"));
    }

    #[test]
    fn test_heuristic_tier_finds_date_in_longer_sentence() {
        let doc = Document::parse(
            r#"<html><body><p class="byline">Posted by J. Smith on 15 March 2024 after the morning briefing</p></body></html>"#,
        );
        let config = ExtractorConfig::default();
        let dt = get_publishing_date("https://example.com/story", &doc, None, &config).unwrap();
        assert_eq!(dt.format("%Y-%m-%d").to_string(), "2024-03-15");
    }
}
