//! Email and summary templates
//!
//! All text is fixed template copy filled from the extraction; nothing is
//! generated. Every tone is always rendered.

use crate::domain::{ExtractionResult, FollowUpEmails};

pub const DEFAULT_CURRENCY: &str = "USD";
pub const SIGNATURE: &str = "[Your Name]";

/// Template inputs after placeholder defaults have been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailContext {
    /// Greeting name, `there` when the vendor is unknown.
    pub greeting: String,
    /// `invoice INV-1` or `the invoice`.
    pub invoice_ref: String,
    /// `USD 2450.00` or `USD [amount]`.
    pub amount: String,
    /// `due on 2025-11-30` or `now due`.
    pub due: String,
    /// ` (15 days overdue)` or empty.
    pub overdue: String,
}

impl EmailContext {
    pub fn new(
        extraction: &ExtractionResult,
        currency_override: Option<&str>,
        days_overdue: Option<i64>,
    ) -> Self {
        let currency = currency_override
            .or(extraction.currency.as_deref())
            .unwrap_or(DEFAULT_CURRENCY);

        Self {
            greeting: extraction
                .vendor
                .clone()
                .unwrap_or_else(|| "there".to_string()),
            invoice_ref: match &extraction.invoice_number {
                Some(n) => format!("invoice {}", n),
                None => "the invoice".to_string(),
            },
            amount: format!(
                "{} {}",
                currency,
                extraction.amount.as_deref().unwrap_or("[amount]")
            ),
            due: match &extraction.due_date {
                Some(d) => format!("due on {}", d),
                None => "now due".to_string(),
            },
            overdue: match days_overdue {
                Some(n) if n > 0 => format!(" ({} days overdue)", n),
                _ => String::new(),
            },
        }
    }
}

pub fn compose_emails(ctx: &EmailContext) -> FollowUpEmails {
    FollowUpEmails {
        friendly: friendly(ctx),
        neutral: neutral(ctx),
        firm: firm(ctx),
    }
}

fn friendly(ctx: &EmailContext) -> String {
    format!(
        "Subject: Quick check-in on {inv}\n\
         \n\
         Hi {greeting},\n\
         \n\
         I hope you're doing well! I wanted to check in on {inv} for {amount}, {due}{overdue}.\n\
         \n\
         Could you let me know when we might expect payment, or whether there's anything you need from us to process it?\n\
         \n\
         Thanks so much,\n\
         {sig}",
        inv = ctx.invoice_ref,
        greeting = ctx.greeting,
        amount = ctx.amount,
        due = ctx.due,
        overdue = ctx.overdue,
        sig = SIGNATURE,
    )
}

fn neutral(ctx: &EmailContext) -> String {
    format!(
        "Subject: Payment status for {inv}\n\
         \n\
         Hi {greeting},\n\
         \n\
         I'm following up on {inv} for {amount}, {due}{overdue}.\n\
         \n\
         Please confirm the payment status and the expected payment date.\n\
         \n\
         Regards,\n\
         {sig}",
        inv = ctx.invoice_ref,
        greeting = ctx.greeting,
        amount = ctx.amount,
        due = ctx.due,
        overdue = ctx.overdue,
        sig = SIGNATURE,
    )
}

fn firm(ctx: &EmailContext) -> String {
    format!(
        "Subject: OVERDUE: {inv} requires immediate payment\n\
         \n\
         Hi {greeting},\n\
         \n\
         Our records show {inv} for {amount}, {due}{overdue}, remains unpaid.\n\
         \n\
         Please arrange payment immediately, or send proof of remittance if payment has already been made.\n\
         \n\
         Sincerely,\n\
         {sig}",
        inv = ctx.invoice_ref,
        greeting = ctx.greeting,
        amount = ctx.amount,
        due = ctx.due,
        overdue = ctx.overdue,
        sig = SIGNATURE,
    )
}

/// Three descriptive lines for the response header.
pub fn summarize(
    extraction: &ExtractionResult,
    currency: Option<&str>,
    days_overdue: Option<i64>,
    red_flag_count: usize,
) -> Vec<String> {
    let vendor = extraction.vendor.as_deref().unwrap_or("Unknown vendor");
    let invoice = extraction.invoice_number.as_deref().unwrap_or("unknown");
    let amount = match (currency, extraction.amount.as_deref()) {
        (Some(c), Some(a)) => format!("{} {}", c, a),
        (None, Some(a)) => a.to_string(),
        (_, None) => "unknown".to_string(),
    };
    let due = match (extraction.due_date.as_deref(), days_overdue) {
        (Some(d), Some(n)) if n > 0 => format!("{} ({} days overdue)", d, n),
        (Some(d), _) => d.to_string(),
        (None, _) => "unknown".to_string(),
    };
    let terms = extraction.payment_terms.as_deref().unwrap_or("not stated");

    vec![
        format!("Vendor: {} | Invoice: {}", vendor, invoice),
        format!("Amount: {} | Due: {}", amount, due),
        format!("Terms: {} | Red flags: {}", terms, red_flag_count),
    ]
}
