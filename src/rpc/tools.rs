//! Tool catalogue exposed over `tools/list` and `tools/call`

use anyhow::Context;
use chrono::NaiveDate;
use serde_json::{json, Value};

use super::protocol::RpcError;
use crate::domain::{PreparedResult, Tone};
use crate::engine;

pub const PREPARE_TOOL: &str = "prepare";

pub fn list_tools() -> Value {
    json!({
        "tools": [{
            "name": PREPARE_TOOL,
            "description": "Extract invoice fields from free-form text and draft friendly, neutral and firm payment reminders with a follow-up plan.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "invoiceText": { "type": "string", "minLength": 1 },
                    "currency": { "type": "string", "minLength": 1 },
                    "tone": { "type": "string", "enum": Tone::ALL },
                    "today": { "type": "string", "minLength": 1 }
                },
                "required": ["invoiceText"]
            }
        }]
    })
}

/// Run a `tools/call` request. Returns the prepared result alongside the
/// protocol payload so the caller can push a stream notification.
pub fn call_tool(
    params: Option<&Value>,
    today: NaiveDate,
) -> Result<(Value, PreparedResult), RpcError> {
    let params = params.ok_or_else(|| RpcError::invalid_params("Missing params"))?;

    let name = params
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| RpcError::invalid_params("Missing tool name"))?;

    if name != PREPARE_TOOL {
        return Err(RpcError::invalid_params(format!("Unknown tool: {}", name)));
    }

    let arguments = params.get("arguments").unwrap_or(&Value::Null);
    let prepared = engine::prepare_from_arguments(arguments, today)?;

    let structured = serde_json::to_value(&prepared).context("Failed to serialize result")?;
    let text = serde_json::to_string_pretty(&structured).context("Failed to render result")?;

    let payload = json!({
        "content": [{ "type": "text", "text": text }],
        "structuredContent": structured,
    });

    Ok((payload, prepared))
}
