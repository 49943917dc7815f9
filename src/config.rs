//! Configuration management for the extraction core.
//!
//! This module provides a centralized configuration struct that loads settings
//! from environment variables. All configuration is loaded once at startup
//! and can be displayed for logging purposes.

use std::fmt;

const DEFAULT_MAX_DISTANCE: usize = 10;
const DEFAULT_HEURISTIC_FUTURE_THRESHOLD_HOURS: i64 = 24;
const DEFAULT_TIER_FUTURE_THRESHOLD_DAYS: i64 = 7;
const DEFAULT_MIN_STOPWORD_COUNT: usize = 2;
const DEFAULT_LINK_DENSITY_THRESHOLD: f64 = 1.0;
const DEFAULT_TAIL_PENALTY_TRIGGER_COUNT: usize = 15;
const DEFAULT_TAIL_PENALTY_CAP: i64 = 40;

/// Tunable thresholds for the extraction heuristics.
///
/// Every constant named in SPEC_FULL.md §4 is represented here so a host can
/// override it without forking the crate.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Maximum DOM-path distance considered for proximity scoring (C5/C6/C7).
    /// Environment variable: `ARTICLE_EXTRACTOR_MAX_DISTANCE`
    pub max_distance: usize,

    /// Future-date rejection window for heuristic-tier date candidates (C4).
    /// Environment variable: `ARTICLE_EXTRACTOR_HEURISTIC_FUTURE_HOURS`
    pub heuristic_future_threshold_hours: i64,

    /// Future-date rejection window for URL/meta-tier date candidates (C4).
    /// Environment variable: `ARTICLE_EXTRACTOR_TIER_FUTURE_DAYS`
    pub tier_future_threshold_days: i64,

    /// Minimum stopword count for a node to be considered a content candidate (C8).
    /// Environment variable: `ARTICLE_EXTRACTOR_MIN_STOPWORD_COUNT`
    pub min_stopword_count: usize,

    /// Link-word-to-total-word ratio, weighted by link count, at or above which
    /// a node is treated as link-dense (C8).
    /// Environment variable: `ARTICLE_EXTRACTOR_LINK_DENSITY_THRESHOLD`
    pub link_density_threshold: f64,

    /// Candidate-count threshold above which the tail quartile penalty kicks in (C8).
    /// Environment variable: `ARTICLE_EXTRACTOR_TAIL_PENALTY_TRIGGER_COUNT`
    pub tail_penalty_trigger_count: usize,

    /// Accumulated negative tail-penalty magnitude above which the penalty is
    /// replaced by a small positive score (C8).
    /// Environment variable: `ARTICLE_EXTRACTOR_TAIL_PENALTY_CAP`
    pub tail_penalty_cap: i64,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_distance: DEFAULT_MAX_DISTANCE,
            heuristic_future_threshold_hours: DEFAULT_HEURISTIC_FUTURE_THRESHOLD_HOURS,
            tier_future_threshold_days: DEFAULT_TIER_FUTURE_THRESHOLD_DAYS,
            min_stopword_count: DEFAULT_MIN_STOPWORD_COUNT,
            link_density_threshold: DEFAULT_LINK_DENSITY_THRESHOLD,
            tail_penalty_trigger_count: DEFAULT_TAIL_PENALTY_TRIGGER_COUNT,
            tail_penalty_cap: DEFAULT_TAIL_PENALTY_CAP,
        }
    }
}

impl ExtractorConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables, falling back to defaults
    /// for anything unset or unparseable.
    pub fn from_env() -> Self {
        Self {
            max_distance: env_parsed("ARTICLE_EXTRACTOR_MAX_DISTANCE", DEFAULT_MAX_DISTANCE),
            heuristic_future_threshold_hours: env_parsed(
                "ARTICLE_EXTRACTOR_HEURISTIC_FUTURE_HOURS",
                DEFAULT_HEURISTIC_FUTURE_THRESHOLD_HOURS,
            ),
            tier_future_threshold_days: env_parsed(
                "ARTICLE_EXTRACTOR_TIER_FUTURE_DAYS",
                DEFAULT_TIER_FUTURE_THRESHOLD_DAYS,
            ),
            min_stopword_count: env_parsed(
                "ARTICLE_EXTRACTOR_MIN_STOPWORD_COUNT",
                DEFAULT_MIN_STOPWORD_COUNT,
            ),
            link_density_threshold: env_parsed(
                "ARTICLE_EXTRACTOR_LINK_DENSITY_THRESHOLD",
                DEFAULT_LINK_DENSITY_THRESHOLD,
            ),
            tail_penalty_trigger_count: env_parsed(
                "ARTICLE_EXTRACTOR_TAIL_PENALTY_TRIGGER_COUNT",
                DEFAULT_TAIL_PENALTY_TRIGGER_COUNT,
            ),
            tail_penalty_cap: env_parsed("ARTICLE_EXTRACTOR_TAIL_PENALTY_CAP", DEFAULT_TAIL_PENALTY_CAP),
        }
    }

    /// Display configuration summary for logging.
    pub fn display_summary(&self) -> Vec<String> {
        vec![
            "=== Article Extractor Configuration ===".to_string(),
            format!("max_distance={}", self.max_distance),
            format!(
                "future thresholds: heuristic={}h, tiered={}d",
                self.heuristic_future_threshold_hours, self.tier_future_threshold_days
            ),
            format!(
                "content scoring: min_stopword_count={}, link_density_threshold={:.2}",
                self.min_stopword_count, self.link_density_threshold
            ),
            format!(
                "tail penalty: trigger_count={}, cap={}",
                self.tail_penalty_trigger_count, self.tail_penalty_cap
            ),
            "========================================".to_string(),
        ]
    }
}

impl fmt::Display for ExtractorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "max_distance={}, heuristic_future_hours={}, tier_future_days={}, min_stopword_count={}, link_density_threshold={:.2}",
            self.max_distance,
            self.heuristic_future_threshold_hours,
            self.tier_future_threshold_days,
            self.min_stopword_count,
            self.link_density_threshold
        )
    }
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key).ok().and_then(|s| s.parse().ok()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExtractorConfig::default();
        assert_eq!(config.max_distance, 10);
        assert_eq!(config.heuristic_future_threshold_hours, 24);
        assert_eq!(config.tier_future_threshold_days, 7);
        assert_eq!(config.min_stopword_count, 2);
    }

    #[test]
    fn test_display_contains_key_fields() {
        let config = ExtractorConfig::default();
        let display = format!("{}", config);
        assert!(display.contains("max_distance=10"));
        assert!(display.contains("heuristic_future_hours=24"));
    }
}
