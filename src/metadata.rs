//! Straightforward metadata accessors (A4): the parts of the public API that
//! are a direct selector/attribute read rather than a scored heuristic.

use crate::dom::Document;
use crate::url_utils::prepare_url;

pub fn language(doc: &Document) -> Option<String> {
    doc.select("html")
        .into_iter()
        .next()
        .and_then(|n| doc.attr(n, "lang"))
        .or_else(|| {
            doc.select("meta[http-equiv=\"content-language\"]")
                .into_iter()
                .next()
                .and_then(|n| doc.attr(n, "content"))
        })
}

pub fn description(doc: &Document) -> Option<String> {
    first_meta_content(doc, &["meta[name=\"description\"]", "meta[property=\"og:description\"]"])
}

pub fn keywords(doc: &Document) -> Vec<String> {
    first_meta_content(doc, &["meta[name=\"keywords\"]"])
        .map(|raw| raw.split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect())
        .unwrap_or_default()
}

pub fn canonical_link(doc: &Document) -> Option<String> {
    doc.select("link[rel=\"canonical\"]")
        .into_iter()
        .next()
        .and_then(|n| doc.attr(n, "href"))
}

pub fn og_image(doc: &Document) -> Option<String> {
    first_meta_content(doc, &["meta[property=\"og:image\"]", "meta[name=\"og:image\"]"])
}

pub fn site_name(doc: &Document) -> Option<String> {
    first_meta_content(doc, &["meta[property=\"og:site_name\"]"])
}

pub fn page_type(doc: &Document) -> Option<String> {
    first_meta_content(doc, &["meta[property=\"og:type\"]"])
}

pub fn favicon(doc: &Document, base_url: &str) -> Option<String> {
    let href = doc
        .select("link[rel=\"icon\"], link[rel=\"shortcut icon\"]")
        .into_iter()
        .next()
        .and_then(|n| doc.attr(n, "href"))?;
    prepare_url(&href, base_url)
}

pub fn tags(doc: &Document) -> Vec<String> {
    doc.select("meta[property=\"article:tag\"]")
        .into_iter()
        .filter_map(|n| doc.attr(n, "content"))
        .collect()
}

pub fn category_urls(doc: &Document, base_url: &str) -> Vec<String> {
    doc.select("meta[property=\"article:section\"] a, nav a")
        .into_iter()
        .filter_map(|n| doc.attr(n, "href"))
        .filter_map(|href| prepare_url(&href, base_url))
        .collect()
}

pub fn feed_urls(doc: &Document, base_url: &str) -> Vec<String> {
    doc.select("link[type=\"application/rss+xml\"], link[type=\"application/atom+xml\"]")
        .into_iter()
        .filter_map(|n| doc.attr(n, "href"))
        .filter_map(|href| prepare_url(&href, base_url))
        .collect()
}

fn first_meta_content(doc: &Document, selectors: &[&str]) -> Option<String> {
    for selector in selectors {
        if let Some(node) = doc.select(selector).into_iter().next() {
            if let Some(content) = doc.attr(node, "content") {
                return Some(content);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_from_html_lang_attr() {
        let doc = Document::parse("<html lang=\"fr\"><body></body></html>");
        assert_eq!(language(&doc), Some("fr".to_string()));
    }

    #[test]
    fn test_description_falls_back_to_og() {
        let doc = Document::parse(
            r#"<html><head><meta property="og:description" content="A summary"></head><body></body></html>"#,
        );
        assert_eq!(description(&doc), Some("A summary".to_string()));
    }

    #[test]
    fn test_keywords_split_on_comma() {
        let doc = Document::parse(
            r#"<html><head><meta name="keywords" content="news, politics, world"></head><body></body></html>"#,
        );
        assert_eq!(keywords(&doc), vec!["news", "politics", "world"]);
    }

    #[test]
    fn test_canonical_link() {
        let doc = Document::parse(
            r#"<html><head><link rel="canonical" href="https://example.com/a"></head><body></body></html>"#,
        );
        assert_eq!(canonical_link(&doc), Some("https://example.com/a".to_string()));
    }

    #[test]
    fn test_favicon_resolved_against_base() {
        let doc = Document::parse(
            r#"<html><head><link rel="icon" href="/favicon.ico"></head><body></body></html>"#,
        );
        assert_eq!(
            favicon(&doc, "https://example.com/story"),
            Some("https://example.com/favicon.ico".to_string())
        );
    }
}
