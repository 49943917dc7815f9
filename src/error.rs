//! Error handling module.
//!
//! The public extraction functions are total (see SPEC_FULL.md §7): every caller
//! facing function returns a best-effort value, never an `Err`. [`ExtractorError`]
//! exists for the handful of fallible internal primitives (URL parsing, regex
//! compilation at construction time) and is always collapsed with `.ok()` or
//! `.unwrap_or_default()` before it would cross the public API boundary.

use thiserror::Error;

/// Errors produced by internal, non-public-surface operations.
#[derive(Debug, Error)]
pub enum ExtractorError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("invalid regex pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}
