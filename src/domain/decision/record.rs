use serde::{Deserialize, Serialize, Serializer};

use super::DecisionStatus;

const UNREADABLE_JUSTIFICATION: &str = "Could not read the PDF document";
const UNREADABLE_NARRATIVE: &str = "I'm sorry, I couldn't read your policy document. Please make sure it's a valid PDF file and try again.";
const NO_CONTEXT_JUSTIFICATION: &str = "No relevant information found in the policy for this question";

/// Largest magnitude at which every whole f64 is exactly representable
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Output of the synthesis steps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    decision: DecisionStatus,
    amount_covered: f64,
    main_reason: String,
    supporting_detail: String,
}

impl DecisionRecord {
    /// Negative or non-finite amounts are stored as 0
    pub fn new(
        decision: DecisionStatus,
        amount_covered: f64,
        main_reason: impl Into<String>,
        supporting_detail: impl Into<String>,
    ) -> Self {
        let amount_covered = if amount_covered.is_finite() && amount_covered > 0.0 {
            amount_covered
        } else {
            0.0
        };

        Self {
            decision,
            amount_covered,
            main_reason: main_reason.into(),
            supporting_detail: supporting_detail.into(),
        }
    }

    pub fn decision(&self) -> DecisionStatus {
        self.decision
    }

    pub fn amount_covered(&self) -> f64 {
        self.amount_covered
    }

    pub fn main_reason(&self) -> &str {
        &self.main_reason
    }

    pub fn supporting_detail(&self) -> &str {
        &self.supporting_detail
    }
}

/// The answer returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalResponse {
    pub decision: DecisionStatus,
    #[serde(serialize_with = "serialize_amount")]
    pub amount_covered: Option<f64>,
    pub justification: Vec<String>,
    pub narrative_response: String,
}

impl FinalResponse {
    pub fn new(
        decision: DecisionStatus,
        amount_covered: Option<f64>,
        justification: Vec<String>,
        narrative_response: impl Into<String>,
    ) -> Self {
        Self {
            decision,
            amount_covered,
            justification,
            narrative_response: narrative_response.into(),
        }
    }

    /// Terminal response for a document that yielded no text
    pub fn extraction_failed() -> Self {
        Self::new(
            DecisionStatus::Error,
            Some(0.0),
            vec![UNREADABLE_JUSTIFICATION.to_string()],
            UNREADABLE_NARRATIVE,
        )
    }

    /// Terminal response when retrieval found nothing for the query
    pub fn no_relevant_context(query: &str) -> Self {
        Self::new(
            DecisionStatus::NeedsReview,
            Some(0.0),
            vec![NO_CONTEXT_JUSTIFICATION.to_string()],
            format!(
                "I couldn't find specific information about '{}' in your policy document. \
                 This might mean it's covered under a general category, or you may need to \
                 contact customer service for clarification.",
                query
            ),
        )
    }
}

/// Whole amounts are written as JSON integers (`0`, `1500`), others keep
/// their fraction (`1250.5`)
fn serialize_amount<S: Serializer>(amount: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match amount {
        Some(value) if value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER => {
            serializer.serialize_some(&(*value as i64))
        }
        Some(value) => serializer.serialize_some(value),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_clamps_amount() {
        let record = DecisionRecord::new(DecisionStatus::Approved, -5.0, "Because", "");
        assert_eq!(record.amount_covered(), 0.0);

        let record = DecisionRecord::new(DecisionStatus::Approved, f64::NAN, "Because", "");
        assert_eq!(record.amount_covered(), 0.0);

        let record = DecisionRecord::new(DecisionStatus::Approved, 1250.5, "Because", "");
        assert_eq!(record.amount_covered(), 1250.5);
    }

    #[test]
    fn test_extraction_failed_shape() {
        let response = FinalResponse::extraction_failed();

        assert_eq!(response.decision, DecisionStatus::Error);
        assert_eq!(response.amount_covered, Some(0.0));
        assert_eq!(response.justification, vec!["Could not read the PDF document"]);
        assert!(response.narrative_response.starts_with("I'm sorry"));
    }

    #[test]
    fn test_no_relevant_context_quotes_query() {
        let response = FinalResponse::no_relevant_context("dental implants");

        assert_eq!(response.decision, DecisionStatus::NeedsReview);
        assert!(response.justification[0].contains("No relevant information found"));
        assert!(response.narrative_response.contains("'dental implants'"));
        assert!(response
            .narrative_response
            .contains("general category, or you may need to contact customer service"));
    }

    #[test]
    fn test_final_response_json_shape() {
        let json = serde_json::to_value(FinalResponse::extraction_failed()).unwrap();

        assert_eq!(json["decision"], "Error");
        assert_eq!(json["amount_covered"], 0.0);
        assert!(json["justification"].is_array());
        assert!(json["narrative_response"].is_string());
    }

    #[test]
    fn test_recovered_responses_write_integer_amount() {
        let json = serde_json::to_string(&FinalResponse::extraction_failed()).unwrap();
        assert!(json.starts_with(r#"{"decision":"Error","amount_covered":0,"#));

        let json = serde_json::to_string(&FinalResponse::no_relevant_context("x")).unwrap();
        assert!(json.contains(r#""amount_covered":0,"#));
    }

    #[test]
    fn test_fractional_and_missing_amounts() {
        let response = FinalResponse::new(DecisionStatus::Approved, Some(1250.5), vec![], "ok");
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""amount_covered":1250.5"#));

        let response = FinalResponse::new(DecisionStatus::Approved, Some(1500.0), vec![], "ok");
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""amount_covered":1500,"#));

        let response = FinalResponse::new(DecisionStatus::NeedsReview, None, vec![], "ok");
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""amount_covered":null"#));
    }

    #[test]
    fn test_integer_amount_reads_back() {
        let json = serde_json::to_string(&FinalResponse::extraction_failed()).unwrap();
        let parsed: FinalResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, FinalResponse::extraction_failed());
    }
}
