//! Missing-field warnings

use crate::domain::ExtractionResult;

pub const MISSING_INVOICE_NUMBER: &str =
    "Invoice number not found: confirm the invoice reference before sending.";
pub const MISSING_AMOUNT: &str = "Amount not found: confirm the outstanding balance.";
pub const MISSING_DUE_DATE: &str =
    "Due date not found: days overdue could not be calculated.";
pub const MISSING_PAYMENT_TERMS: &str =
    "Payment terms not found: check the contract for agreed terms.";

/// One warning per missing field, in a fixed order. Vendor is not flagged.
pub fn evaluate(extraction: &ExtractionResult) -> Vec<String> {
    [
        (extraction.invoice_number.is_none(), MISSING_INVOICE_NUMBER),
        (extraction.amount.is_none(), MISSING_AMOUNT),
        (extraction.due_date.is_none(), MISSING_DUE_DATE),
        (extraction.payment_terms.is_none(), MISSING_PAYMENT_TERMS),
    ]
    .into_iter()
    .filter(|(missing, _)| *missing)
    .map(|(_, flag)| flag.to_string())
    .collect()
}
