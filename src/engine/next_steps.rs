//! Escalation ladder
//!
//! Static policy for now. The extraction is passed in so per-case tailoring
//! (e.g. keying off the due date) can land here without touching callers.

use crate::domain::ExtractionResult;

const LADDER: [&str; 4] = [
    "Send the friendly reminder now if the relationship is ongoing.",
    "If there is no reply within 2 business days, send the neutral follow-up.",
    "If there is still no reply after 5 business days, send the firm notice.",
    "If the invoice remains unpaid, consider pausing service or escalating per your contract.",
];

pub fn plan(_extraction: &ExtractionResult) -> Vec<String> {
    LADDER.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ladder_is_fixed() {
        let empty = plan(&ExtractionResult::default());
        let full = plan(&ExtractionResult {
            due_date: Some("2020-01-01".to_string()),
            ..Default::default()
        });
        assert_eq!(empty.len(), 4);
        assert_eq!(empty, full);
        assert!(empty[1].contains("2 business days"));
        assert!(empty[2].contains("5 business days"));
    }
}
