//! Structured fields pulled out of a free-text question
//!
//! Extraction is best effort: a pattern that does not match leaves the field
//! empty, it never fails.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Question shapes that name the thing being asked about
static SUBJECT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)^(?:is|are)\s+(?:a\s+|an\s+|the\s+|my\s+)?(?P<subject>.+?)\s+(?:covered|included|reimbursed)\b",
        r"(?i)\b(?:does|do|will|would)\s+(?:my|the|this|our)\s+(?:policy|plan|insurance)\s+(?:cover|pay\s+for|include)\s+(?P<subject>.+)",
        r"(?i)\b(?:coverage|cover)\s+(?:for|of)\s+(?P<subject>.+)",
        r"(?i)\bclaims?\s+(?:(?:my|the)\s+)?(?:expenses?\s+|costs?\s+|bills?\s+)?for\s+(?P<subject>.+)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

/// Qualifiers trailing the subject ("... for a 46 year old", "... under my plan",
/// "... available?")
static SUBJECT_QUALIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:^|,?\s+)(?:(?:for|under|in|at|on)\s+(?:a|an|my|me|the|this|our)\b|(?:if|when|since|after|as)\b|(?:available|allowed|possible|payable|reimbursable|included|covered)\b).*$",
    )
    .unwrap()
});

/// Article or possessive leading the subject
static SUBJECT_DETERMINER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:a|an|the|my|our|your|his|her|their)\s+").unwrap()
});

/// Captures that only point back at the question and name nothing
const PRONOUN_SUBJECTS: &[&str] = &["it", "this", "that", "they", "these", "those", "them"];

static AGE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[^\d.])(\d{1,2})\s*-?\s*(?:years?[\s-]*old|yrs?\b|yo\b|y/o|age\b)").unwrap()
});

static DURATION_AFTER_POLICY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:policy|plan)\s+(?:for|since)\s+(\d+(?:\.\d+)?)\s*(years?|months?)\b").unwrap()
});

static DURATION_BEFORE_POLICY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d+(?:\.\d+)?)\s*-?\s*(years?|months?)[\s-]*(?:old\s+)?(?:policy|plan)\b")
        .unwrap()
});

/// Fields derived from the raw query text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredQuery {
    /// Procedure or condition asked about; the whole trimmed query when no
    /// narrower subject was recognised
    pub subject: String,
    pub age: Option<u32>,
    pub policy_duration_months: Option<u32>,
}

impl StructuredQuery {
    pub fn from_query(query: &str) -> Self {
        let trimmed = query.trim();
        let lowered = trimmed.to_lowercase();

        Self {
            subject: extract_subject(trimmed).unwrap_or_else(|| trimmed.to_string()),
            age: extract_age(&lowered),
            policy_duration_months: extract_policy_duration(&lowered),
        }
    }
}

fn extract_subject(query: &str) -> Option<String> {
    SUBJECT_PATTERNS.iter().find_map(|pattern| {
        let captured = pattern.captures(query)?.name("subject")?.as_str();
        let narrowed = SUBJECT_QUALIFIER.replace(captured.trim(), "");
        let trimmed = narrowed
            .trim()
            .trim_end_matches(|c: char| matches!(c, '?' | '.' | '!' | ',' | ';' | ':'))
            .trim();
        let cleaned = SUBJECT_DETERMINER.replace(trimmed, "");
        let cleaned = cleaned.trim();

        let is_pronoun = PRONOUN_SUBJECTS
            .iter()
            .any(|pronoun| cleaned.eq_ignore_ascii_case(pronoun));

        (!cleaned.is_empty() && !is_pronoun).then(|| cleaned.to_string())
    })
}

fn extract_age(lowered: &str) -> Option<u32> {
    AGE_PATTERN
        .captures(lowered)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

fn extract_policy_duration(lowered: &str) -> Option<u32> {
    let caps = DURATION_AFTER_POLICY
        .captures(lowered)
        .or_else(|| DURATION_BEFORE_POLICY.captures(lowered))?;

    let value: f64 = caps.get(1)?.as_str().parse().ok()?;
    let months = if caps.get(2)?.as_str().starts_with("year") {
        value * 12.0
    } else {
        value
    };

    Some(months.round() as u32)
}
