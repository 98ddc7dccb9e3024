use super::StructuredQuery;

/// Search terms used to widen recall, in retrieval priority order:
/// the raw query, the subject, then the subject with "coverage" and
/// "excluded" appended.
pub fn reformulate(query: &str, structured: &StructuredQuery) -> Vec<String> {
    let query = query.trim();
    let subject = if structured.subject.is_empty() {
        query
    } else {
        structured.subject.as_str()
    };

    vec![
        query.to_string(),
        subject.to_string(),
        format!("{} coverage", subject),
        format!("{} excluded", subject),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reformulate_order() {
        let query = "Is physiotherapy covered?";
        let terms = reformulate(query, &StructuredQuery::from_query(query));

        assert_eq!(
            terms,
            vec![
                "Is physiotherapy covered?",
                "physiotherapy",
                "physiotherapy coverage",
                "physiotherapy excluded",
            ]
        );
    }

    #[test]
    fn test_reformulate_without_narrower_subject() {
        let query = "dental implants";
        let terms = reformulate(query, &StructuredQuery::from_query(query));

        assert_eq!(terms[0], "dental implants");
        assert_eq!(terms[1], "dental implants");
        assert_eq!(terms[2], "dental implants coverage");
        assert_eq!(terms[3], "dental implants excluded");
    }

    #[test]
    fn test_pronoun_question_searches_whole_query() {
        let query = "Is it covered if I break my leg?";
        let terms = reformulate(query, &StructuredQuery::from_query(query));

        assert_eq!(terms[1], query);
        assert_eq!(terms[2], "Is it covered if I break my leg? coverage");
        assert!(terms.iter().all(|term| term != "it"));
    }

    #[test]
    fn test_empty_subject_falls_back_to_query() {
        let structured = StructuredQuery {
            subject: String::new(),
            age: None,
            policy_duration_months: None,
        };
        let terms = reformulate("maternity", &structured);

        assert_eq!(terms[1], "maternity");
        assert_eq!(terms[3], "maternity excluded");
    }
}
