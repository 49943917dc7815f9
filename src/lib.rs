/*!
# Overview

[article-extractor][crate] extracts structured metadata from an arbitrary HTML
news article: the publication date, title, authors, and the main-content
subtree ("top node"), plus auxiliary fields such as canonical URL, language,
and tags.

The hard part is the extraction core: tiered, multi-signal, DOM-distance-scored
heuristics for the publication date ([`date`]), the title ([`title`]), and the
main-content top node ([`content`]), backed by a multilingual month recognizer
([`text`]) and a small DOM adapter over [`scraper`] ([`dom`]).

# Examples

## Using the convenience wrapper

[`ArticleExtractor::extract`] runs the full pipeline and returns an [`Article`].

```
use article_extractor::ArticleExtractor;

let html = r#"
<html>
  <head>
    <title>Example Site - Big Story Breaks Today</title>
    <meta property="article:published_time" content="2024-03-05T08:00:00Z">
  </head>
  <body>
    <h1>Big Story Breaks Today</h1>
    <div class="content">
      <p>Reporters on the ground described a scene that quickly drew a crowd
      of onlookers and local officials throughout the morning hours.</p>
      <p>Officials said the investigation would continue over the following
      days as more witnesses were expected to come forward with details.</p>
    </div>
  </body>
</html>
"#;

let extractor = ArticleExtractor::new();
let article = extractor.extract(html, "https://example.com/news/story");
assert_eq!(article.title, "Big Story Breaks Today");
assert!(article.publish_date.is_some());
```

## Using individual components

Each tier of the pipeline (C1-C8 in the design notes) is also exposed directly,
so a host can run only the pieces it needs — for example scoring the top node
without also running date/title extraction.
*/

pub mod authors;
pub mod config;
pub mod content;
pub mod date;
pub mod dom;
pub mod error;
pub mod metadata;
pub mod text;
pub mod title;
pub mod url_utils;

pub use authors::get_authors;
pub use config::ExtractorConfig;
pub use content::{calculate_best_node, post_cleanup};
pub use date::get_publishing_date;
pub use dom::{Document, Node};
pub use error::ExtractorError;
pub use title::get_title;

use chrono::{DateTime, Utc};
use dom::geometry::find_corresponding_node;
use serde::{Deserialize, Serialize};

/// Structured metadata extracted from a single article page.
///
/// See [module doc][crate#examples] for usage examples.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub authors: Vec<String>,
    pub publish_date: Option<DateTime<Utc>>,
    pub language: Option<String>,
    pub description: Option<String>,
    pub keywords: Vec<String>,
    pub canonical_link: Option<String>,
    pub og_image: Option<String>,
    pub site_name: Option<String>,
    pub page_type: Option<String>,
    pub favicon: Option<String>,
    pub tags: Vec<String>,
    pub category_urls: Vec<String>,
    pub feed_urls: Vec<String>,
    /// Text content of the detected main-content subtree, if one was found.
    pub top_node_text: Option<String>,
}

/// Runs the full extraction pipeline over a parsed page.
///
/// See [module doc][crate#examples] for usage examples.
#[derive(Debug, Clone, Default)]
pub struct ArticleExtractor {
    config: ExtractorConfig,
}

impl ArticleExtractor {
    /// Construct an extractor with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct an extractor with thresholds loaded from environment variables.
    pub fn from_env() -> Self {
        Self {
            config: ExtractorConfig::from_env(),
        }
    }

    pub fn with_config(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Extract structured metadata from `html`, an already-fetched page body,
    /// with `url` used for the publication-date URL tier and for resolving
    /// relative links (favicon, feeds, category links).
    pub fn extract(&self, html: &str, url: &str) -> Article {
        let original_doc = Document::parse(html);
        let mut cleaned_doc = clean_document(html);

        let top_node = content::calculate_best_node(&mut cleaned_doc, &self.config);
        if let Some(node) = top_node {
            content::post_cleanup_with_config(&mut cleaned_doc, node, &self.config);
        }

        let mapped_top_in_original =
            top_node.and_then(|n| find_corresponding_node(n, &cleaned_doc, &original_doc));

        let publish_date = date::get_publishing_date(
            url,
            &original_doc,
            mapped_top_in_original,
            &self.config,
        );
        let title = title::get_title(&original_doc, &cleaned_doc, top_node);
        let authors = authors::get_authors(&original_doc);

        Article {
            title,
            authors,
            publish_date,
            language: metadata::language(&original_doc),
            description: metadata::description(&original_doc),
            keywords: metadata::keywords(&original_doc),
            canonical_link: metadata::canonical_link(&original_doc),
            og_image: metadata::og_image(&original_doc),
            site_name: metadata::site_name(&original_doc),
            page_type: metadata::page_type(&original_doc),
            favicon: metadata::favicon(&original_doc, url),
            tags: metadata::tags(&original_doc),
            category_urls: metadata::category_urls(&original_doc, url),
            feed_urls: metadata::feed_urls(&original_doc, url),
            top_node_text: top_node.map(|n| cleaned_doc.text(n)),
        }
    }
}

fn clean_document(html: &str) -> Document {
    let mut doc = Document::parse(html);
    for node in doc.select_tags(&["script", "style", "noscript"]) {
        doc.remove(node);
    }
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_html() -> &'static str {
        r#"
        <html lang="en">
          <head>
            <title>Daily Times - Markets Rally After Announcement</title>
            <meta property="article:published_time" content="2024-04-10T09:30:00Z">
            <meta name="author" content="Jane Doe">
            <meta name="description" content="Markets responded quickly.">
          </head>
          <body>
            <nav><a href="/sports">Sports</a></nav>
            <h1>Markets Rally After Announcement</h1>
            <div class="article-body">
              <p>Investors reacted within minutes of the announcement, sending
              major indices higher across the board during the session.</p>
              <p>Analysts said the rally reflected pent-up demand after weeks
              of uncertainty about the direction of monetary policy.</p>
              <p>Trading volume was well above the recent average as funds
              rebalanced positions heading into the close of the week.</p>
            </div>
          </body>
        </html>
        "#
    }

    #[test]
    fn test_extract_full_pipeline() {
        let extractor = ArticleExtractor::new();
        let article = extractor.extract(sample_html(), "https://example.com/markets/story");

        assert_eq!(article.title, "Markets Rally After Announcement");
        assert_eq!(article.authors, vec!["Jane Doe".to_string()]);
        assert!(article.publish_date.is_some());
        assert_eq!(article.language.as_deref(), Some("en"));
        assert!(article.top_node_text.unwrap().contains("Investors reacted"));
    }

    #[test]
    fn test_extract_never_panics_on_empty_input() {
        let extractor = ArticleExtractor::new();
        let article = extractor.extract("", "not a url");
        assert_eq!(article.title, "");
        assert!(article.publish_date.is_none());
    }

    #[test]
    fn test_url_tier_wins_even_with_precise_meta_tag() {
        let html = r#"
        <html><head>
            <meta property="article:published_time" content="2024-01-01T00:00:00Z">
        </head><body></body></html>
        "#;
        let extractor = ArticleExtractor::new();
        let article = extractor.extract(html, "https://example.com/news/2023/11/20/story");
        assert_eq!(
            article.publish_date.unwrap().format("%Y-%m-%d").to_string(),
            "2023-11-20"
        );
    }
}
