//! Static keyword tables: month names per language, publication keywords, prefix
//! cleaning patterns, and a small built-in stopword list.
//!
//! Tables are small enough to inline as `&'static [&'static str]` slices rather
//! than loading from a data file, following the original implementation's layout.

use crate::text::normalize::normalize_for_matching;
use crate::text::trie::Trie;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

pub const MONTHS_EN: &[&str] = &[
    "january", "february", "march", "april", "may", "june", "july", "august",
    "september", "october", "november", "december", "jan", "feb", "mar", "apr",
    "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec",
];

pub const MONTHS_ES: &[&str] = &[
    "enero", "febrero", "marzo", "abril", "mayo", "junio", "julio", "agosto",
    "septiembre", "octubre", "noviembre", "diciembre",
];

pub const MONTHS_DE: &[&str] = &[
    "januar", "februar", "marz", "april", "mai", "juni", "juli", "august",
    "september", "oktober", "november", "dezember",
];

// "mars" (March) lives in the full French list only; the original source carried
// it twice (full list + abbreviations) but a Trie insert is idempotent either way.
pub const MONTHS_FR: &[&str] = &[
    "janvier", "fevrier", "mars", "avril", "mai", "juin", "juillet", "aout",
    "septembre", "octobre", "novembre", "decembre",
];

// Pre-normalized (no diacritics, alef variants folded) since they are inserted
// through the same `normalize_for_matching` pass the Trie builder uses.
pub const MONTHS_AR: &[&str] = &[
    "يناير", "فبراير", "مارس", "ابريل", "مايو", "يونيو", "يوليو", "اغسطس",
    "سبتمبر", "اكتوبر", "نوفمبر", "ديسمبر", "كانون الثاني", "شباط", "اذار",
    "نيسان", "ايار", "حزيران", "تموز", "اب", "كانون الاول", "تشرين الاول",
    "تشرين الثاني",
];

pub const PUBLICATION_KEYWORDS: &[&str] = &[
    "published", "updated", "posted", "created", "date", "release",
    "publie", "publicado", "veroffentlicht", "نشر", "تاريخ", "نشر في",
];

lazy_static! {
    pub static ref MONTH_TRIE: Trie = Trie::build(
        MONTHS_EN
            .iter()
            .chain(MONTHS_ES)
            .chain(MONTHS_DE)
            .chain(MONTHS_FR)
            .chain(MONTHS_AR)
            .copied(),
        |s| normalize_for_matching(s),
    );

    /// Per-language "Published:"-style prefixes to strip before date parsing.
    pub static ref PREFIX_CLEANING_REGEXES: Vec<Regex> = vec![
        Regex::new(r"(?i)^\s*(published|posted|updated|created)\s*(on|:)?\s*").unwrap(),
        Regex::new(r"(?i)^\s*publie\s*le\s*:?\s*").unwrap(),
        Regex::new(r"(?i)^\s*publicado\s*(el)?\s*:?\s*").unwrap(),
        Regex::new(r"(?i)^\s*veroffentlicht\s*am\s*:?\s*").unwrap(),
        Regex::new(r"^\s*نشر\s*في\s*:?\s*").unwrap(),
    ];

    pub static ref PUBLICATION_KEYWORD_REGEX: Regex = {
        let joined = PUBLICATION_KEYWORDS.join("|");
        Regex::new(&format!("(?i){joined}")).unwrap()
    };
}

/// Returns whether `contains_month`, via the shared trie, finds a month name in
/// normalized `text`.
pub fn contains_month(text: &str) -> bool {
    MONTH_TRIE.contains_in(&normalize_for_matching(text))
}

/// Host-pluggable stopword counter, so a richer language-specific list can
/// replace the crate's small built-in set without touching the scoring core.
pub trait StopwordsProvider: Send + Sync {
    fn count(&self, text: &str, language: &str) -> usize;
}

const STOPWORDS_EN: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "is", "are", "was", "were", "be", "been",
    "to", "of", "in", "on", "at", "for", "with", "as", "by", "that", "this", "it",
    "from", "he", "she", "they", "we", "you", "i", "his", "her", "their", "its",
    "not", "have", "has", "had", "will", "would", "could", "should", "which", "who",
];

const STOPWORDS_ES: &[&str] = &[
    "el", "la", "los", "las", "un", "una", "y", "o", "pero", "es", "son", "fue",
    "de", "en", "a", "para", "con", "por", "que", "su", "no", "se",
];

const STOPWORDS_FR: &[&str] = &[
    "le", "la", "les", "un", "une", "et", "ou", "mais", "est", "sont", "de", "en",
    "a", "pour", "avec", "par", "que", "son", "sa", "ne", "pas",
];

const STOPWORDS_DE: &[&str] = &[
    "der", "die", "das", "ein", "eine", "und", "oder", "aber", "ist", "sind",
    "von", "in", "auf", "fur", "mit", "als", "dass", "nicht", "hat", "war",
];

const STOPWORDS_AR: &[&str] = &[
    "من", "في", "على", "الى", "عن", "مع", "هذا", "هذه", "التي", "الذي", "وان",
    "كان", "لا", "ان", "او", "ثم",
];

lazy_static! {
    static ref STOPWORD_SETS: [(&'static str, HashSet<&'static str>); 5] = [
        ("en", STOPWORDS_EN.iter().copied().collect()),
        ("es", STOPWORDS_ES.iter().copied().collect()),
        ("fr", STOPWORDS_FR.iter().copied().collect()),
        ("de", STOPWORDS_DE.iter().copied().collect()),
        ("ar", STOPWORDS_AR.iter().copied().collect()),
    ];
}

/// Built-in stopword counter covering English, Spanish, French, German, and
/// Arabic. Unknown languages fall back to the English set.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinStopwords;

impl StopwordsProvider for BuiltinStopwords {
    fn count(&self, text: &str, language: &str) -> usize {
        let set = STOPWORD_SETS
            .iter()
            .find(|(lang, _)| *lang == language)
            .map(|(_, set)| set)
            .unwrap_or(&STOPWORD_SETS[0].1);
        normalize_for_matching(text)
            .split_whitespace()
            .filter(|w| set.contains(w.trim_matches(|c: char| !c.is_alphanumeric())))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_month_english() {
        assert!(contains_month("Published on 3 March 2024"));
        assert!(!contains_month("Published on a Tuesday"));
    }

    #[test]
    fn test_contains_month_arabic() {
        assert!(contains_month("نشر في 3 مارس 2024"));
    }

    #[test]
    fn test_builtin_stopwords_counts_known_words() {
        let sw = BuiltinStopwords;
        assert!(sw.count("The quick fox and the dog", "en") >= 3);
    }

    #[test]
    fn test_builtin_stopwords_unknown_language_falls_back_to_english() {
        let sw = BuiltinStopwords;
        assert_eq!(sw.count("the cat and the hat", "xx"), sw.count("the cat and the hat", "en"));
    }
}
