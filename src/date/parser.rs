//! Parses a candidate date string into an instant, applying the format-order
//! heuristics and future-date rejection policy (C4).

use crate::config::ExtractorConfig;
use crate::date::extractor::extract_best_date_string;
use crate::text::normalize::normalize_for_matching;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

lazy_static! {
    static ref TIMEZONE_ARTIFACT: Regex =
        Regex::new(r"(?i)\s*[-(]?\s*(GMT|UTC)\s*[+-]\d{1,2}\)?").unwrap();

    static ref ISO_DATE: Regex =
        Regex::new(r"(\d{4})[-./](\d{1,2})[-./](\d{1,2})(?:[ T](\d{1,2}):(\d{2}))?").unwrap();

    static ref NUMERIC_DATE: Regex =
        Regex::new(r"\b(\d{1,4})[-/.](\d{1,2})[-/.](\d{1,4})(?:\s+(\d{1,2}):(\d{2}))?").unwrap();

    static ref DAY_MONTH_YEAR: Regex = Regex::new(
        r"(?i)\b(\d{1,2})\s+(january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sep|sept|oct|nov|dec)\.?,?\s+(\d{4})\b"
    ).unwrap();

    static ref MONTH_DAY_YEAR: Regex = Regex::new(
        r"(?i)\b(january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sep|sept|oct|nov|dec)\.?\s+(\d{1,2}),?\s+(\d{4})\b"
    ).unwrap();

    static ref MONTH_NUMBERS: HashMap<&'static str, u32> = [
        ("january", 1), ("jan", 1),
        ("february", 2), ("feb", 2),
        ("march", 3), ("mar", 3),
        ("april", 4), ("apr", 4),
        ("may", 5),
        ("june", 6), ("jun", 6),
        ("july", 7), ("jul", 7),
        ("august", 8), ("aug", 8),
        ("september", 9), ("sep", 9), ("sept", 9),
        ("october", 10), ("oct", 10),
        ("november", 11), ("nov", 11),
        ("december", 12), ("dec", 12),
    ]
    .into_iter()
    .collect();
}

/// Parse `s` into a validated UTC instant.
///
/// `from_url` prioritizes the year-month-day interpretation (URL slugs are
/// almost always ISO-ordered); `from_heuristic` selects the tighter 24h
/// future-date threshold and permits a retry through [`extract_best_date_string`]
/// if the raw text does not parse.
pub fn parse_and_validate(
    s: &str,
    from_heuristic: bool,
    from_url: bool,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    parse_and_validate_with_config(s, from_heuristic, from_url, now, &ExtractorConfig::default())
}

/// Same as [`parse_and_validate`], sourcing the future-date thresholds from
/// `config` rather than the crate defaults.
pub fn parse_and_validate_with_config(
    s: &str,
    from_heuristic: bool,
    from_url: bool,
    now: DateTime<Utc>,
    config: &ExtractorConfig,
) -> Option<DateTime<Utc>> {
    let cleaned = strip_timezone_artifacts(s);
    let parsed = parse_core(&cleaned, from_url).or_else(|| {
        from_heuristic
            .then(|| extract_best_date_string(s))
            .flatten()
            .and_then(|alt| parse_core(&strip_timezone_artifacts(&alt), from_url))
    })?;

    let threshold = if from_heuristic {
        Duration::hours(config.heuristic_future_threshold_hours)
    } else {
        Duration::days(config.tier_future_threshold_days)
    };
    if parsed > now + threshold {
        return None;
    }
    Some(parsed)
}

fn strip_timezone_artifacts(s: &str) -> String {
    TIMEZONE_ARTIFACT.replace_all(s, "").trim().to_string()
}

fn parse_core(s: &str, from_url: bool) -> Option<DateTime<Utc>> {
    parse_iso(s)
        .or_else(|| parse_textual(s))
        .or_else(|| parse_numeric(s, from_url))
}

fn parse_iso(s: &str) -> Option<DateTime<Utc>> {
    let caps = ISO_DATE.captures(s)?;
    build_datetime(
        caps[1].parse().ok()?,
        caps[2].parse().ok()?,
        caps[3].parse().ok()?,
        caps.get(4).map(|m| m.as_str().parse().unwrap_or(0)).unwrap_or(0),
        caps.get(5).map(|m| m.as_str().parse().unwrap_or(0)).unwrap_or(0),
    )
}

fn parse_textual(s: &str) -> Option<DateTime<Utc>> {
    if let Some(caps) = DAY_MONTH_YEAR.captures(s) {
        let day: u32 = caps[1].parse().ok()?;
        let month = MONTH_NUMBERS.get(normalize_for_matching(&caps[2]).as_str())?;
        let year: i32 = caps[3].parse().ok()?;
        return build_datetime(year, *month, day, 0, 0);
    }
    if let Some(caps) = MONTH_DAY_YEAR.captures(s) {
        let month = MONTH_NUMBERS.get(normalize_for_matching(&caps[1]).as_str())?;
        let day: u32 = caps[2].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;
        return build_datetime(year, *month, day, 0, 0);
    }
    None
}

fn parse_numeric(s: &str, from_url: bool) -> Option<DateTime<Utc>> {
    let caps = NUMERIC_DATE.captures(s)?;
    let g1 = &caps[1];
    let g2: u32 = caps[2].parse().ok()?;
    let g3 = &caps[3];
    let hour = caps.get(4).map(|m| m.as_str().parse().unwrap_or(0)).unwrap_or(0);
    let minute = caps.get(5).map(|m| m.as_str().parse().unwrap_or(0)).unwrap_or(0);

    let (year, month, day): (i32, u32, u32) = if g1.len() == 4 {
        (g1.parse().ok()?, g2, g3.parse().ok()?)
    } else if g3.len() == 4 {
        let first_num: u32 = g1.parse().ok()?;
        let year: i32 = g3.parse().ok()?;
        if first_num > 12 {
            // European D/M/YYYY: first group can't be a month.
            (year, g2, first_num)
        } else {
            // American M/D/YYYY is the ambiguous default; URL tier already
            // preferred the year-first branch above when it applies.
            let _ = from_url;
            (year, first_num, g2)
        }
    } else {
        return None;
    };

    build_datetime(year, month, day, hour, minute)
}

fn build_datetime(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Option<DateTime<Utc>> {
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
    Some(Utc.from_utc_datetime(&date.and_time(time)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_iso_date_parses_directly() {
        let got = parse_and_validate("2024-03-05", false, false, now()).unwrap();
        assert_eq!((got.year(), got.month(), got.day()), (2024, 3, 5));
    }

    #[test]
    fn test_american_format_month_first() {
        let got = parse_and_validate("3/5/2024", false, false, now()).unwrap();
        assert_eq!((got.year(), got.month(), got.day()), (2024, 3, 5));
    }

    #[test]
    fn test_european_format_detected_by_overflow_day() {
        let got = parse_and_validate("25/3/2024", false, false, now()).unwrap();
        assert_eq!((got.year(), got.month(), got.day()), (2024, 3, 25));
    }

    #[test]
    fn test_textual_day_month_year() {
        let got = parse_and_validate("5 March 2024", false, false, now()).unwrap();
        assert_eq!((got.year(), got.month(), got.day()), (2024, 3, 5));
    }

    #[test]
    fn test_textual_month_day_year() {
        let got = parse_and_validate("March 5, 2024", false, false, now()).unwrap();
        assert_eq!((got.year(), got.month(), got.day()), (2024, 3, 5));
    }

    #[test]
    fn test_future_date_rejected_for_heuristic_tier() {
        assert!(parse_and_validate("2024-06-20", true, false, now()).is_none());
    }

    #[test]
    fn test_future_date_allowed_within_week_for_non_heuristic() {
        assert!(parse_and_validate("2024-06-20", false, false, now()).is_some());
    }

    #[test]
    fn test_strips_timezone_artifact() {
        let got = parse_and_validate("2024-03-05 - GMT (+2)", false, false, now()).unwrap();
        assert_eq!((got.year(), got.month(), got.day()), (2024, 3, 5));
    }
}
