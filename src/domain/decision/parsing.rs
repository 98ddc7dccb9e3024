//! Recovery rules for narrowly prompted model answers
//!
//! None of these fail: an answer that cannot be read falls back to a safe
//! default.

use once_cell::sync::Lazy;
use regex::Regex;

const REASON_PREFIX: &str = "Because";

static NUMBER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+(?:\.\d+)?").unwrap());

/// First number in the answer, ignoring thousands separators; 0.0 when none
pub fn parse_amount(output: &str) -> f64 {
    let without_separators = output.replace(',', "");

    NUMBER_PATTERN
        .find(&without_separators)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Trim and make sure the sentence opens with "Because"
pub fn normalize_reason(output: &str) -> String {
    let trimmed = output.trim();

    if trimmed.is_empty() || trimmed.starts_with(REASON_PREFIX) {
        trimmed.to_string()
    } else {
        format!("{} {}", REASON_PREFIX, trimmed)
    }
}
