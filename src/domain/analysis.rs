//! Lexical scan of retrieved policy text
//!
//! The analysis is advisory. It can add a justification sentence that agrees
//! with the synthesized decision, but it never changes the decision.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::decision::DecisionStatus;

const COVERAGE_PHRASES: &[&str] = &[
    "is covered",
    "are covered",
    "coverage includes",
    "benefits include",
    "eligible for",
    "reimbursed",
    "we pay",
    "covered expense",
];

const EXCLUSION_PHRASES: &[&str] = &[
    "not covered",
    "excluded",
    "not eligible",
    "exception",
    "limitation",
    "we do not pay",
    "excluded from coverage",
];

const COVERAGE_AGREEMENT: &str =
    "The policy contains language indicating this type of service is covered";
const EXCLUSION_AGREEMENT: &str = "The policy contains exclusion language for this type of service";

static AMOUNT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\s*(\d+(?:,\d{3})*(?:\.\d{2})?)").unwrap());

static PERCENTAGE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\s*%").unwrap());

/// Signals found in the context text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextAnalysis {
    pub coverage_found: bool,
    pub exclusion_found: bool,
    /// Dollar figures as written, without the `$`
    pub amounts: Vec<String>,
    pub percentages: Vec<u32>,
}

impl ContextAnalysis {
    pub fn analyze(context: &str) -> Self {
        let lowered = context.to_lowercase();

        Self {
            coverage_found: COVERAGE_PHRASES.iter().any(|p| lowered.contains(p)),
            exclusion_found: EXCLUSION_PHRASES.iter().any(|p| lowered.contains(p)),
            amounts: AMOUNT_PATTERN
                .captures_iter(context)
                .filter_map(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
                .collect(),
            percentages: PERCENTAGE_PATTERN
                .captures_iter(context)
                .filter_map(|caps| caps.get(1))
                .filter_map(|m| m.as_str().parse().ok())
                .collect(),
        }
    }

    /// Extra justification when the lexical signal matches the decision
    pub fn agreement_sentence(&self, decision: DecisionStatus) -> Option<&'static str> {
        match decision {
            DecisionStatus::Approved if self.coverage_found => Some(COVERAGE_AGREEMENT),
            DecisionStatus::Rejected if self.exclusion_found => Some(EXCLUSION_AGREEMENT),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_coverage_case_insensitively() {
        let analysis = ContextAnalysis::analyze("Physiotherapy IS COVERED up to 10 sessions.");
        assert!(analysis.coverage_found);
        assert!(!analysis.exclusion_found);
    }

    #[test]
    fn test_detects_exclusion() {
        let analysis = ContextAnalysis::analyze("Cosmetic dental work is excluded.");
        assert!(analysis.exclusion_found);
    }

    #[test]
    fn test_extracts_amounts_and_percentages() {
        let analysis = ContextAnalysis::analyze(
            "We pay 80% of costs up to $5,000.00 per year, and $ 250 for ambulance. Co-pay 20 %.",
        );

        assert_eq!(analysis.amounts, vec!["5,000.00", "250"]);
        assert_eq!(analysis.percentages, vec![80, 20]);
    }

    #[test]
    fn test_empty_context() {
        assert_eq!(ContextAnalysis::analyze(""), ContextAnalysis::default());
    }

    #[test]
    fn test_agreement_requires_matching_decision() {
        let analysis = ContextAnalysis::analyze("Surgery is covered. Dental is not covered.");

        assert_eq!(
            analysis.agreement_sentence(DecisionStatus::Approved),
            Some(COVERAGE_AGREEMENT)
        );
        assert_eq!(
            analysis.agreement_sentence(DecisionStatus::Rejected),
            Some(EXCLUSION_AGREEMENT)
        );
        assert_eq!(analysis.agreement_sentence(DecisionStatus::NeedsReview), None);
    }

    #[test]
    fn test_no_agreement_without_signal() {
        let analysis = ContextAnalysis::analyze("Section 2 defines terms.");
        assert_eq!(analysis.agreement_sentence(DecisionStatus::Approved), None);
        assert_eq!(analysis.agreement_sentence(DecisionStatus::Rejected), None);
    }
}
