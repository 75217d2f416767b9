//! JSON-RPC method dispatch
//!
//! Transport-agnostic: takes a raw message body plus the caller's session id
//! and returns what should be sent back. The HTTP glue lives in `routes::mcp`.

pub mod protocol;
pub mod sessions;
pub mod tools;

use chrono::NaiveDate;
use serde_json::{json, Value};

use protocol::{JsonRpcNotification, JsonRpcRequest, JsonRpcResponse, RpcError, JSONRPC_VERSION};
pub use sessions::SessionRegistry;

pub const PROTOCOL_VERSION: &str = "2025-03-26";

/// Result of handling one message.
#[derive(Debug)]
pub enum RpcOutcome {
    Reply {
        response: JsonRpcResponse,
        /// Set when `initialize` issued a new session.
        new_session: Option<String>,
    },
    /// Notification acknowledged, nothing to send.
    Accepted,
}

impl RpcOutcome {
    fn reply(response: JsonRpcResponse) -> Self {
        Self::Reply {
            response,
            new_session: None,
        }
    }
}

/// Handle a single JSON-RPC message.
///
/// `today` is the fallback reference date for `prepare` calls that do not
/// carry one.
pub fn handle_message(
    sessions: &SessionRegistry,
    session_id: Option<&str>,
    body: &[u8],
    today: NaiveDate,
) -> RpcOutcome {
    let value: Value = match serde_json::from_slice(body) {
        Ok(v) => v,
        Err(e) => {
            return RpcOutcome::reply(JsonRpcResponse::failure(
                Value::Null,
                RpcError::Parse(e.to_string()),
            ))
        }
    };

    if value.is_array() {
        return RpcOutcome::reply(JsonRpcResponse::failure(
            Value::Null,
            RpcError::InvalidRequest("Batch requests are not supported".to_string()),
        ));
    }

    let request: JsonRpcRequest = match serde_json::from_value(value) {
        Ok(r) => r,
        Err(e) => {
            return RpcOutcome::reply(JsonRpcResponse::failure(
                Value::Null,
                RpcError::InvalidRequest(e.to_string()),
            ))
        }
    };

    let id = request.id.clone().unwrap_or(Value::Null);

    if request.jsonrpc.as_deref() != Some(JSONRPC_VERSION) {
        return RpcOutcome::reply(JsonRpcResponse::failure(
            id,
            RpcError::InvalidRequest("jsonrpc must be \"2.0\"".to_string()),
        ));
    }

    let Some(method) = request.method.as_deref() else {
        return RpcOutcome::reply(JsonRpcResponse::failure(
            id,
            RpcError::InvalidRequest("Missing method".to_string()),
        ));
    };

    if request.is_notification() {
        tracing::debug!(method, "Notification received");
        return RpcOutcome::Accepted;
    }

    tracing::debug!(method, session_id, "RPC request");

    match method {
        "initialize" => {
            let session = sessions.create();
            tracing::info!(session_id = %session, "Session initialized");
            RpcOutcome::Reply {
                response: JsonRpcResponse::success(id, initialize_result(request.params.as_ref())),
                new_session: Some(session),
            }
        }
        "ping" => RpcOutcome::reply(JsonRpcResponse::success(id, json!({}))),
        "tools/list" => RpcOutcome::reply(JsonRpcResponse::success(id, tools::list_tools())),
        "tools/call" => match tools::call_tool(request.params.as_ref(), today) {
            Ok((payload, prepared)) => {
                if let Some(session) = session_id {
                    let message = JsonRpcNotification::new(
                        "notifications/message",
                        json!({
                            "level": "info",
                            "logger": tools::PREPARE_TOOL,
                            "data": {
                                "redFlags": prepared.red_flags.len(),
                                "daysOverdue": prepared.extracted.days_overdue,
                            },
                        }),
                    );
                    if let Ok(message) = serde_json::to_value(message) {
                        sessions.notify(session, message);
                    }
                }
                RpcOutcome::reply(JsonRpcResponse::success(id, payload))
            }
            Err(e) => {
                tracing::warn!(error = %e, "tools/call rejected");
                RpcOutcome::reply(JsonRpcResponse::failure(id, e))
            }
        },
        other => RpcOutcome::reply(JsonRpcResponse::failure(
            id,
            RpcError::MethodNotFound(other.to_string()),
        )),
    }
}

fn initialize_result(params: Option<&Value>) -> Value {
    let requested = params
        .and_then(|p| p.get("protocolVersion"))
        .and_then(Value::as_str)
        .unwrap_or(PROTOCOL_VERSION);

    json!({
        "protocolVersion": requested,
        "capabilities": { "tools": {}, "logging": {} },
        "serverInfo": {
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
        },
    })
}
