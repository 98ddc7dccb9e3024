use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorical outcome of a coverage question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecisionStatus {
    Approved,
    Rejected,
    #[serde(rename = "Needs Review")]
    NeedsReview,
    /// The document could not be read
    Error,
}

impl DecisionStatus {
    /// Map a free-form status answer. Matching is by substring on the
    /// upper-cased text, "APPROVED" first, so surrounding prose is tolerated.
    pub fn from_model_output(output: &str) -> Self {
        let upper = output.to_uppercase();

        if upper.contains("APPROVED") {
            Self::Approved
        } else if upper.contains("REJECTED") {
            Self::Rejected
        } else {
            Self::NeedsReview
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::NeedsReview => "Needs Review",
            Self::Error => "Error",
        }
    }
}

impl fmt::Display for DecisionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_keywords() {
        assert_eq!(DecisionStatus::from_model_output("APPROVED"), DecisionStatus::Approved);
        assert_eq!(DecisionStatus::from_model_output("REJECTED"), DecisionStatus::Rejected);
        assert_eq!(DecisionStatus::from_model_output("UNCLEAR"), DecisionStatus::NeedsReview);
    }

    #[test]
    fn test_keyword_inside_prose() {
        assert_eq!(
            DecisionStatus::from_model_output("I think this is REJECTED because..."),
            DecisionStatus::Rejected
        );
        assert_eq!(
            DecisionStatus::from_model_output("approved."),
            DecisionStatus::Approved
        );
    }

    #[test]
    fn test_non_conforming_output() {
        assert_eq!(
            DecisionStatus::from_model_output("It depends on the waiting period"),
            DecisionStatus::NeedsReview
        );
        assert_eq!(DecisionStatus::from_model_output(""), DecisionStatus::NeedsReview);
    }

    #[test]
    fn test_serialized_names() {
        assert_eq!(
            serde_json::to_string(&DecisionStatus::NeedsReview).unwrap(),
            "\"Needs Review\""
        );
        assert_eq!(
            serde_json::to_string(&DecisionStatus::Approved).unwrap(),
            "\"Approved\""
        );
        assert_eq!(DecisionStatus::Error.to_string(), "Error");
    }
}
