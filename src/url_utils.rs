//! URL helpers: scheme/domain/path accessors and the strict date regex used by
//! the publication-date URL tier (C6 Tier 1).

use crate::error::ExtractorError;
use lazy_static::lazy_static;
use regex::Regex;
use url::Url;

lazy_static! {
    /// Matches a `YYYY/MM/DD`, `YYYY-MM-DD` or similarly delimited date embedded
    /// anywhere in a URL path, e.g. `/news/2024/03/05/headline-slug`.
    pub static ref STRICT_DATE_REGEX: Regex =
        Regex::new(r"(19|20)\d{2}[-/]\d{1,2}[-/]\d{1,2}").unwrap();
}

fn parse(url: &str) -> Result<Url, ExtractorError> {
    Url::parse(url).map_err(|e| ExtractorError::InvalidUrl(e.to_string()))
}

pub fn scheme(url: &str) -> Option<String> {
    parse(url).ok().map(|u| u.scheme().to_string())
}

pub fn domain(url: &str) -> Option<String> {
    parse(url).ok().and_then(|u| u.domain().map(str::to_string))
}

pub fn path(url: &str) -> Option<String> {
    parse(url).ok().map(|u| u.path().to_string())
}

/// Resolve `candidate` (possibly relative) against `base`, returning an absolute
/// URL string. `None` on any parse failure — callers treat a missing resolution
/// as "skip this link" rather than a hard error.
pub fn prepare_url(candidate: &str, base: &str) -> Option<String> {
    let base = parse(base).ok()?;
    base.join(candidate).ok().map(|u| u.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_date_regex_matches_slash_form() {
        assert!(STRICT_DATE_REGEX.is_match("https://example.com/news/2024/03/05/story"));
    }

    #[test]
    fn test_strict_date_regex_rejects_non_date() {
        assert!(!STRICT_DATE_REGEX.is_match("https://example.com/news/story-123"));
    }

    #[test]
    fn test_scheme_and_domain() {
        assert_eq!(scheme("https://example.com/a"), Some("https".to_string()));
        assert_eq!(domain("https://example.com/a"), Some("example.com".to_string()));
    }

    #[test]
    fn test_prepare_url_resolves_relative_path() {
        let got = prepare_url("/a/b", "https://example.com/x/y").unwrap();
        assert_eq!(got, "https://example.com/a/b");
    }

    #[test]
    fn test_prepare_url_invalid_base_returns_none() {
        assert_eq!(prepare_url("/a", "not a url"), None);
    }
}
