//! Field extractors
//!
//! One pure function per field. Each scans the raw invoice text with a small,
//! explicit regex set and returns a normalized value or `None`. None of them
//! can fail: an unmatched pattern simply means the field was not found.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::ExtractionResult;

/// Longest vendor name kept, in characters.
pub const VENDOR_MAX_CHARS: usize = 120;

// ── Regex patterns ──────────────────────────────────────────────────────

static RE_LABEL_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^invoice\b").unwrap());

static RE_INVOICE_NO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:invoice\b[ \t]*(?:no\b\.?|#|number\b)?|inv\b\.?[ \t]*(?:no\b\.?|#)?)[ \t]*[:#]?[ \t]*([A-Z0-9][A-Z0-9-]*)",
    )
    .unwrap()
});

static RE_DATE_ISO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(20\d{2}-\d{2}-\d{2})\b").unwrap());

static RE_DATE_US: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2})/(\d{1,2})/(\d{4})\b").unwrap());

static RE_CURRENCY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(USD|EUR|GBP|INR|AUD|CAD)\b").unwrap());

static RE_AMOUNT_GROUPED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{1,3}(?:,\d{3})+(?:\.\d+)?\b").unwrap());

static RE_AMOUNT_PLAIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d+(?:\.\d+)?\b").unwrap());

static RE_TERMS_NET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bnet\s*(\d+)").unwrap());

static RE_TERMS_RECEIPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bdue\s+on\s+receipt\b").unwrap());

// ── Entry point ─────────────────────────────────────────────────────────

/// Run every extractor over the text. Extractors are independent.
pub fn extract_all(text: &str) -> ExtractionResult {
    let (amount, currency) = extract_amount_and_currency(text);

    ExtractionResult {
        vendor: extract_vendor(text),
        invoice_number: extract_invoice_number(text),
        due_date: extract_due_date(text),
        amount,
        currency,
        payment_terms: extract_payment_terms(text),
    }
}

// ── Scalar field extractors ─────────────────────────────────────────────

/// First non-blank line, unless it is an "Invoice ..." label line.
pub fn extract_vendor(text: &str) -> Option<String> {
    let line = text.lines().map(str::trim).find(|l| !l.is_empty())?;

    if RE_LABEL_LINE.is_match(line) {
        return None;
    }

    Some(line.chars().take(VENDOR_MAX_CHARS).collect())
}

/// Token following an "Invoice #", "Invoice No.", "Invoice Number" or "INV" label.
pub fn extract_invoice_number(text: &str) -> Option<String> {
    RE_INVOICE_NO
        .captures(text)
        .map(|c| c[1].trim_end_matches('-').to_string())
        .filter(|s| !s.is_empty())
}

/// ISO date first, then US `M/D/YYYY` converted to `YYYY-MM-DD`.
pub fn extract_due_date(text: &str) -> Option<String> {
    if let Some(cap) = RE_DATE_ISO.captures(text) {
        return Some(cap[1].to_string());
    }

    let cap = RE_DATE_US.captures(text)?;
    let month: u32 = cap[1].parse().ok()?;
    let day: u32 = cap[2].parse().ok()?;
    Some(format!("{}-{:02}-{:02}", &cap[3], month, day))
}

/// Currency from a fixed whitelist, amount from the first qualifying number.
///
/// The two are independent: either may be found without the other. The
/// amount is not anchored to a "Total" label, so on texts with several
/// numbers the first grouped figure (or, failing that, the first plain
/// number) wins.
pub fn extract_amount_and_currency(text: &str) -> (Option<String>, Option<String>) {
    let currency = RE_CURRENCY.captures(text).map(|c| c[1].to_uppercase());

    let amount = RE_AMOUNT_GROUPED
        .find(text)
        .or_else(|| RE_AMOUNT_PLAIN.find(text))
        .map(|m| m.as_str().replace(',', ""));

    (amount, currency)
}

/// `Net N` (1-3 digits, kept as written) or `Due on receipt`.
pub fn extract_payment_terms(text: &str) -> Option<String> {
    let net_days = RE_TERMS_NET
        .captures_iter(text)
        .map(|cap| cap.get(1).map_or("", |m| m.as_str()))
        .find(|digits| digits.len() <= 3);
    if let Some(days) = net_days {
        return Some(format!("Net {}", days));
    }

    RE_TERMS_RECEIPT
        .is_match(text)
        .then(|| "Due on receipt".to_string())
}
