//! Unicode normalization used to make month-keyword matching script-insensitive (C1).

use std::borrow::Cow;

/// Fold Arabic letter variants to their base form and strip diacritics
/// (U+064B..=U+0652). Idempotent; a no-op on text with no Arabic script.
pub fn normalize_arabic(text: &str) -> Cow<'_, str> {
    if !text.chars().any(needs_normalization) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\u{0625}' | '\u{0623}' | '\u{0622}' | '\u{0627}' => out.push('\u{0627}'), // إأآا -> ا
            '\u{0649}' => out.push('\u{064A}'),                                       // ى -> ي
            '\u{0629}' => out.push('\u{0647}'),                                       // ة -> ه
            '\u{064B}'..='\u{0652}' => {}                                             // drop diacritics
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

fn needs_normalization(ch: char) -> bool {
    matches!(ch,
        '\u{0625}' | '\u{0623}' | '\u{0622}' | '\u{0627}' | '\u{0649}' | '\u{0629}'
        | '\u{064B}'..='\u{0652}'
    )
}

/// Lowercase (Unicode-aware) then Arabic-normalize. The canonical form keyword
/// tables are inserted under, and candidate text is matched against.
pub fn normalize_for_matching(text: &str) -> String {
    normalize_arabic(&text.to_lowercase()).into_owned()
}
