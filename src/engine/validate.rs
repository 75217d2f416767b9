//! Argument validation for `prepare`
//!
//! Arguments arrive as loose JSON. Every constraint violation is collected so
//! the caller sees all of them at once.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::{PrepareInput, Tone};

/// A single failed constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub field: String,
    pub code: &'static str,
    pub message: String,
}

impl ValidationIssue {
    fn new(field: &str, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            code,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
#[error("Invalid arguments: {}", summarize(.issues))]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

fn summarize(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|i| format!("{}: {}", i.field, i.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Check `arguments` against the `prepare` input schema.
pub fn validate_arguments(arguments: &Value) -> Result<PrepareInput, ValidationError> {
    let empty = Map::new();
    let mut issues = Vec::new();

    let args = match arguments {
        Value::Object(map) => map,
        Value::Null => &empty,
        _ => {
            return Err(ValidationError {
                issues: vec![ValidationIssue::new(
                    "arguments",
                    "invalid_type",
                    "Expected an object",
                )],
            })
        }
    };

    let invoice_text = match args.get("invoiceText") {
        None | Some(Value::Null) => {
            issues.push(ValidationIssue::new("invoiceText", "required", "Required"));
            None
        }
        Some(v) => non_empty_string("invoiceText", v, &mut issues),
    };

    let currency = optional(args, "currency")
        .and_then(|v| non_empty_string("currency", v, &mut issues))
        .map(|c| c.trim().to_uppercase())
        .filter(|c| !c.is_empty());

    let today = optional(args, "today").and_then(|v| non_empty_string("today", v, &mut issues));

    let tone = optional(args, "tone").and_then(|v| match v.as_str().and_then(Tone::parse) {
        Some(tone) => Some(tone),
        None => {
            issues.push(ValidationIssue::new(
                "tone",
                "invalid_enum_value",
                format!("Expected one of {}", Tone::ALL.join(", ")),
            ));
            None
        }
    });

    match invoice_text {
        Some(invoice_text) if issues.is_empty() => Ok(PrepareInput {
            invoice_text,
            currency,
            tone,
            today,
        }),
        _ => Err(ValidationError { issues }),
    }
}

fn optional<'a>(args: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    args.get(key).filter(|v| !v.is_null())
}

fn non_empty_string(
    field: &str,
    value: &Value,
    issues: &mut Vec<ValidationIssue>,
) -> Option<String> {
    match value {
        Value::String(s) if s.is_empty() => {
            issues.push(ValidationIssue::new(
                field,
                "too_small",
                "String must contain at least 1 character(s)",
            ));
            None
        }
        Value::String(s) => Some(s.clone()),
        _ => {
            issues.push(ValidationIssue::new(field, "invalid_type", "Expected string"));
            None
        }
    }
}
