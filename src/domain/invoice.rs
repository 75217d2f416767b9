//! Invoice follow-up domain types
//!
//! Request-scoped values produced by the engine. Nothing here is persisted.

use serde::Serialize;

// ============================================================================
// Input
// ============================================================================

/// Email register requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Friendly,
    Neutral,
    Firm,
}

impl Tone {
    pub const ALL: [&'static str; 3] = ["friendly", "neutral", "firm"];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "friendly" => Some(Self::Friendly),
            "neutral" => Some(Self::Neutral),
            "firm" => Some(Self::Firm),
            _ => None,
        }
    }
}

/// Validated arguments for a `prepare` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrepareInput {
    pub invoice_text: String,
    pub currency: Option<String>,
    /// Accepted but does not filter the generated emails.
    pub tone: Option<Tone>,
    pub today: Option<String>,
}

#[cfg(test)]
impl PrepareInput {
    pub fn new(invoice_text: impl Into<String>) -> Self {
        Self {
            invoice_text: invoice_text.into(),
            currency: None,
            tone: None,
            today: None,
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = Some(tone);
        self
    }

    pub fn with_today(mut self, today: impl Into<String>) -> Self {
        self.today = Some(today.into());
        self
    }
}

// ============================================================================
// Extraction
// ============================================================================

/// Fields pulled out of the raw invoice text. Absent means "not found".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionResult {
    pub vendor: Option<String>,
    pub invoice_number: Option<String>,
    /// Normalized to `YYYY-MM-DD`.
    pub due_date: Option<String>,
    /// Decimal string with grouping separators stripped.
    pub amount: Option<String>,
    /// Uppercase 3-letter code.
    pub currency: Option<String>,
    /// `Net N` or `Due on receipt`.
    pub payment_terms: Option<String>,
}

// ============================================================================
// Output
// ============================================================================

/// The `extracted` block of the response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedFields {
    pub vendor: Option<String>,
    pub amount: Option<String>,
    pub currency: Option<String>,
    pub invoice_number: Option<String>,
    pub due_date: Option<String>,
    pub days_overdue: Option<i64>,
    pub payment_terms: Option<String>,
}

/// One email body per tone, each starting with a `Subject:` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FollowUpEmails {
    pub friendly: String,
    pub neutral: String,
    pub firm: String,
}

/// Full response of a `prepare` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparedResult {
    pub summary: Vec<String>,
    pub extracted: ExtractedFields,
    pub follow_up_emails: FollowUpEmails,
    pub next_steps: Vec<String>,
    pub red_flags: Vec<String>,
}
