//! Prompt builders for each synthesis step
//!
//! Every builder is a pure function of its typed inputs so prompts can be
//! checked without a model backend.

use crate::domain::decision::{DecisionRecord, DecisionStatus};

/// Step 1: a single categorical word
pub fn status_prompt(query: &str, context: &str) -> String {
    format!(
        "You are reviewing an insurance policy to answer this question: {query}\n\n\
         Policy excerpts:\n{context}\n\n\
         Reply with exactly ONE word:\n\
         - APPROVED if the policy clearly covers this\n\
         - REJECTED if the policy clearly excludes this\n\
         - UNCLEAR if the excerpts do not settle it\n\n\
         Answer:"
    )
}

/// Step 2: a bare number, 0 when the excerpts name no amount
pub fn amount_prompt(query: &str, context: &str) -> String {
    format!(
        "You are reading an insurance policy to answer this question: {query}\n\n\
         Policy excerpts:\n{context}\n\n\
         What dollar amount would the policy pay for this? Consider:\n\
         - explicit amounts such as $500 or $1,000\n\
         - maximum benefit or coverage amounts\n\
         - per-claim or annual limits\n\n\
         Reply with the number only (for example 500 or 1000).\n\
         If the excerpts state no amount, reply with 0.\n\n\
         Amount:"
    )
}

/// Step 3: one sentence opening with "Because", explaining `decision`
pub fn reason_prompt(query: &str, context: &str, decision: DecisionStatus) -> String {
    format!(
        "You reviewed an insurance policy for this question: {query}\n\
         Your decision was: {decision}\n\n\
         Policy excerpts:\n{context}\n\n\
         Give the main reason for that decision in ONE plain-English sentence \
         that starts with \"Because\".\n\n\
         Examples:\n\
         - \"Because the policy covers all surgical procedures under Section 3\"\n\
         - \"Because dental work is listed as an exclusion\"\n\
         - \"Because the policy does not mention this treatment\"\n\n\
         Reason:"
    )
}

/// Step 4: one concrete fact from the excerpts
pub fn detail_prompt(query: &str, context: &str) -> String {
    format!(
        "You are reading an insurance policy for this question: {query}\n\n\
         Policy excerpts:\n{context}\n\n\
         Quote ONE specific fact from the excerpts that supports the answer, such as:\n\
         - a section or clause number\n\
         - a coverage rule or exclusion\n\
         - a benefit limit\n\n\
         State it as a short fact, for example:\n\
         - \"The policy caps coverage at $5000 per year\"\n\
         - \"Section 2.1 lists dental procedures as excluded\"\n\n\
         Detail:"
    )
}

/// Final step: a short conversational answer built from the decision record
pub fn narrative_prompt(query: &str, record: &DecisionRecord) -> String {
    format!(
        "Write a friendly reply to a customer who asked: \"{query}\"\n\n\
         Decision: {decision}\n\
         Amount: ${amount}\n\
         Main reason: {reason}\n\
         Supporting detail: {detail}\n\n\
         The reply should answer the question directly, explain the decision, \
         mention the amount when there is one, and be 2-3 sentences of plain, \
         warm language with no bullet points.\n\n\
         Reply:",
        decision = record.decision(),
        amount = record.amount_covered(),
        reason = record.main_reason(),
        detail = record.supporting_detail(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTEXT: &str = "Section 4.2: Dental implants are excluded.";

    #[test]
    fn test_status_prompt_lists_answers() {
        let prompt = status_prompt("Are dental implants covered?", CONTEXT);

        assert!(prompt.contains("Are dental implants covered?"));
        assert!(prompt.contains(CONTEXT));
        for word in ["APPROVED", "REJECTED", "UNCLEAR"] {
            assert!(prompt.contains(word));
        }
    }

    #[test]
    fn test_amount_prompt_defaults_to_zero() {
        let prompt = amount_prompt("knee surgery", CONTEXT);
        assert!(prompt.contains("reply with 0"));
        assert!(prompt.ends_with("Amount:"));
    }

    #[test]
    fn test_reason_prompt_carries_decision() {
        let prompt = reason_prompt("knee surgery", CONTEXT, DecisionStatus::NeedsReview);

        assert!(prompt.contains("Your decision was: Needs Review"));
        assert!(prompt.contains("starts with \"Because\""));
    }

    #[test]
    fn test_detail_prompt_embeds_context() {
        let prompt = detail_prompt("knee surgery", CONTEXT);
        assert!(prompt.contains(CONTEXT));
        assert!(prompt.ends_with("Detail:"));
    }

    #[test]
    fn test_narrative_prompt_uses_record_fields() {
        let record = DecisionRecord::new(
            DecisionStatus::Approved,
            1250.5,
            "Because surgery is covered",
            "Section 3 covers inpatient surgery",
        );

        let prompt = narrative_prompt("knee surgery", &record);

        assert!(prompt.contains("\"knee surgery\""));
        assert!(prompt.contains("Decision: Approved"));
        assert!(prompt.contains("Amount: $1250.5"));
        assert!(prompt.contains("Main reason: Because surgery is covered"));
        assert!(prompt.contains("Supporting detail: Section 3 covers inpatient surgery"));
    }
}
