//! Isolates the most date-like substring out of arbitrary candidate text (C3).

use crate::text::keywords::PREFIX_CLEANING_REGEXES;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref PARENTHETICAL: Regex = Regex::new(r"\(([^)]*\d{4}[^)]*)\)").unwrap();

    static ref TEXTUAL_DATE: Regex = Regex::new(
        r"(?i)\b\d{1,2}\s+(january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sep|sept|oct|nov|dec)\s+\d{4}\b|\b(january|february|march|april|may|june|july|august|september|october|november|december)\s+\d{1,2},?\s+\d{4}\b|[ء-ي]+\s+\d{1,2}\s*,?\s*\d{4}"
    ).unwrap();

    static ref NUMERIC_DATE: Regex =
        Regex::new(r"(19|20)\d{2}[-/.]\d{1,2}[-/.]\d{1,2}(\s+\d{1,2}:\d{2})?").unwrap();
}

/// Run the five-step pipeline against `text`, returning the first substring that
/// matches a tier, or the trimmed/cleaned fallback if none does.
pub fn extract_best_date_string(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(caps) = PARENTHETICAL.captures(trimmed) {
        return Some(caps[1].trim().to_string());
    }

    let mut cleaned = trimmed.to_string();
    for re in PREFIX_CLEANING_REGEXES.iter() {
        cleaned = re.replace(&cleaned, "").trim().to_string();
    }

    if let Some(m) = TEXTUAL_DATE.find(&cleaned) {
        return Some(m.as_str().trim().to_string());
    }

    if let Some(m) = NUMERIC_DATE.find(&cleaned) {
        return Some(m.as_str().trim().to_string());
    }

    Some(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parenthetical_wins_first() {
        let got = extract_best_date_string("Some text (Updated 12 May 2024) trailing").unwrap();
        assert_eq!(got, "Updated 12 May 2024");
    }

    #[test]
    fn test_prefix_stripped_then_textual() {
        let got = extract_best_date_string("Published: March 3, 2024").unwrap();
        assert_eq!(got, "March 3, 2024");
    }

    #[test]
    fn test_numeric_iso_pattern() {
        let got = extract_best_date_string("Ref id 88 2024-03-05 12:30 end").unwrap();
        assert_eq!(got, "2024-03-05 12:30");
    }

    #[test]
    fn test_fallback_returns_trimmed_text() {
        let got = extract_best_date_string("  no date markers here  ").unwrap();
        assert_eq!(got, "no date markers here");
    }

    #[test]
    fn test_empty_input_returns_none() {
        assert_eq!(extract_best_date_string("   "), None);
    }
}
