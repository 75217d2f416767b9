//! Invoice follow-up engine
//!
//! Deterministic pipeline: extract fields, compute days overdue, flag missing
//! fields, render the three emails, attach the escalation ladder. The only
//! error is argument validation; unextractable fields become `None` plus a
//! red flag.

pub mod compose;
pub mod dates;
pub mod extract;
pub mod next_steps;
pub mod red_flags;
pub mod validate;

use chrono::NaiveDate;
use serde_json::Value;

use crate::domain::{ExtractedFields, PrepareInput, PreparedResult};

pub use validate::ValidationError;

/// Validate loose JSON arguments, then run [`prepare`].
pub fn prepare_from_arguments(
    arguments: &Value,
    today_fallback: NaiveDate,
) -> Result<PreparedResult, ValidationError> {
    let input = validate::validate_arguments(arguments)?;
    Ok(prepare(&input, today_fallback))
}

/// Build the full follow-up package for one invoice.
///
/// `today_fallback` is used when the input carries no reference date, so the
/// result depends only on its arguments.
pub fn prepare(input: &PrepareInput, today_fallback: NaiveDate) -> PreparedResult {
    let extraction = extract::extract_all(&input.invoice_text);

    let today = input
        .today
        .clone()
        .unwrap_or_else(|| today_fallback.format("%Y-%m-%d").to_string());
    let days_overdue = dates::days_overdue(&today, extraction.due_date.as_deref());

    let red_flags = red_flags::evaluate(&extraction);

    let ctx = compose::EmailContext::new(&extraction, input.currency.as_deref(), days_overdue);
    let follow_up_emails = compose::compose_emails(&ctx);

    let next_steps = next_steps::plan(&extraction);

    let currency = input.currency.clone().or_else(|| extraction.currency.clone());
    let summary = compose::summarize(
        &extraction,
        currency.as_deref(),
        days_overdue,
        red_flags.len(),
    );

    tracing::debug!(
        vendor = extraction.vendor.is_some(),
        invoice_number = extraction.invoice_number.is_some(),
        due_date = extraction.due_date.is_some(),
        amount = extraction.amount.is_some(),
        payment_terms = extraction.payment_terms.is_some(),
        days_overdue = ?days_overdue,
        tone = ?input.tone,
        red_flags = red_flags.len(),
        "Prepared invoice follow-up"
    );

    PreparedResult {
        summary,
        extracted: ExtractedFields {
            vendor: extraction.vendor,
            amount: extraction.amount,
            currency,
            invoice_number: extraction.invoice_number,
            due_date: extraction.due_date,
            days_overdue,
            payment_terms: extraction.payment_terms,
        },
        follow_up_emails,
        next_steps,
        red_flags,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Tone;
    use serde_json::json;

    const SCENARIO_A: &str = "Acme Design Studio LLC\n\
        123 Market Street\n\
        INVOICE #INV-1042\n\
        Due Date: 2025-11-30\n\
        Total Due: USD 2,450.00\n\
        Payment terms: Net 15\n";

    fn fallback() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
    }

    #[test]
    fn scenario_fully_extracted() {
        let input = PrepareInput::new(SCENARIO_A).with_today("2025-12-15");
        let result = prepare(&input, fallback());

        assert_eq!(result.extracted.vendor.as_deref(), Some("Acme Design Studio LLC"));
        assert_eq!(result.extracted.invoice_number.as_deref(), Some("INV-1042"));
        assert_eq!(result.extracted.due_date.as_deref(), Some("2025-11-30"));
        assert_eq!(result.extracted.amount.as_deref(), Some("2450.00"));
        assert_eq!(result.extracted.currency.as_deref(), Some("USD"));
        assert_eq!(result.extracted.payment_terms.as_deref(), Some("Net 15"));
        assert_eq!(result.extracted.days_overdue, Some(15));
        assert!(result.red_flags.is_empty());
        assert_eq!(result.summary.len(), 3);
        assert_eq!(result.next_steps.len(), 4);
        assert!(result
            .follow_up_emails
            .firm
            .contains("invoice INV-1042 for USD 2450.00, due on 2025-11-30 (15 days overdue)"));
    }

    #[test]
    fn scenario_nothing_recognizable() {
        let input = PrepareInput::new("Hello there, just checking in about our work together.")
            .with_today("2025-12-15");
        let result = prepare(&input, fallback());

        assert_eq!(result.extracted.invoice_number, None);
        assert_eq!(result.extracted.amount, None);
        assert_eq!(result.extracted.due_date, None);
        assert_eq!(result.extracted.payment_terms, None);
        assert_eq!(result.extracted.days_overdue, None);
        assert_eq!(
            result.red_flags,
            vec![
                red_flags::MISSING_INVOICE_NUMBER,
                red_flags::MISSING_AMOUNT,
                red_flags::MISSING_DUE_DATE,
                red_flags::MISSING_PAYMENT_TERMS,
            ]
        );
        assert!(result.follow_up_emails.neutral.contains("USD [amount], now due."));
    }

    #[test]
    fn scenario_due_in_future() {
        let input = PrepareInput::new("Acme\nDue 2025-12-01\nNet 30").with_today("2025-11-20");
        let result = prepare(&input, fallback());
        assert_eq!(result.extracted.days_overdue, Some(0));
        assert!(!result.follow_up_emails.friendly.contains("days overdue"));
    }

    #[test]
    fn scenario_currency_override() {
        let input = PrepareInput::new(SCENARIO_A)
            .with_currency("EUR")
            .with_today("2025-12-15");
        let result = prepare(&input, fallback());
        assert_eq!(result.extracted.currency.as_deref(), Some("EUR"));
        assert!(result.follow_up_emails.friendly.contains("EUR 2450.00"));
    }

    #[test]
    fn plain_amount_keeps_digits() {
        let input = PrepareInput::new("Acme\nTotal: 2450 GBP").with_today("2025-12-15");
        let result = prepare(&input, fallback());
        assert_eq!(result.extracted.amount.as_deref(), Some("2450"));
    }

    #[test]
    fn missing_due_date_means_no_overdue_and_a_flag() {
        let input = PrepareInput::new("Acme\nInvoice #7\nTotal 10 USD\nNet 10");
        let result = prepare(&input, fallback());
        assert_eq!(result.extracted.days_overdue, None);
        assert_eq!(result.red_flags, vec![red_flags::MISSING_DUE_DATE]);
    }

    #[test]
    fn fallback_date_used_without_today() {
        let input = PrepareInput::new("Acme\nDue 2025-12-22");
        let result = prepare(&input, fallback());
        assert_eq!(result.extracted.days_overdue, Some(10));
    }

    #[test]
    fn invalid_today_degrades_to_absent() {
        let input = PrepareInput::new(SCENARIO_A).with_today("someday");
        let result = prepare(&input, fallback());
        assert_eq!(result.extracted.days_overdue, None);
        assert!(result.red_flags.is_empty());
    }

    #[test]
    fn tone_does_not_filter_emails() {
        let base = prepare(&PrepareInput::new(SCENARIO_A).with_today("2025-12-15"), fallback());
        let firm = prepare(
            &PrepareInput::new(SCENARIO_A)
                .with_today("2025-12-15")
                .with_tone(Tone::Firm),
            fallback(),
        );
        assert_eq!(base, firm);
        assert!(!firm.follow_up_emails.friendly.is_empty());
    }

    #[test]
    fn output_is_byte_identical_across_calls() {
        let args = json!({ "invoiceText": SCENARIO_A, "today": "2025-12-15" });
        let a = prepare_from_arguments(&args, fallback()).unwrap();
        let b = prepare_from_arguments(&args, fallback()).unwrap();
        assert_eq!(
            serde_json::to_vec(&a).unwrap(),
            serde_json::to_vec(&b).unwrap()
        );
    }

    #[test]
    fn serialized_shape() {
        let args = json!({ "invoiceText": "Hi" });
        let prepared = prepare_from_arguments(&args, fallback()).unwrap();
        let value = serde_json::to_value(prepared).unwrap();

        for key in ["summary", "extracted", "followUpEmails", "nextSteps", "redFlags"] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        for key in [
            "vendor",
            "amount",
            "currency",
            "invoiceNumber",
            "dueDate",
            "daysOverdue",
            "paymentTerms",
        ] {
            assert!(value["extracted"].get(key).is_some(), "missing extracted.{key}");
        }
        assert!(value["extracted"]["dueDate"].is_null());
        assert_eq!(value["followUpEmails"].as_object().unwrap().len(), 3);
    }

    #[test]
    fn validation_error_surfaces() {
        let err = prepare_from_arguments(&json!({ "invoiceText": "" }), fallback()).unwrap_err();
        assert_eq!(err.issues[0].field, "invoiceText");
    }

    #[test]
    fn never_panics_on_odd_input() {
        let huge = "9,".repeat(50_000) + "\u{0}\u{202e}€";
        for text in ["\u{0}", "////", "Net 999999", "1/1/1", huge.as_str()] {
            let result = prepare(&PrepareInput::new(text), fallback());
            assert_eq!(result.summary.len(), 3);
        }
    }
}
