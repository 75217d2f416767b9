//! JSON-RPC 2.0 envelope types

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const JSONRPC_VERSION: &str = "2.0";

/// Incoming request or notification. Fields are loose so that malformed
/// envelopes can be reported as `InvalidRequest` instead of a parse error.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: Option<String>,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: Option<String>,
    #[serde(default)]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    /// Requests without an id are notifications and get no response.
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonRpcErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcErrorObject>,
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Value, error: RpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: None,
            error: Some(error.into_object()),
        }
    }
}

/// Server-initiated notification pushed over the session stream.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcNotification {
    pub jsonrpc: &'static str,
    pub method: String,
    pub params: Value,
}

impl JsonRpcNotification {
    pub fn new(method: impl Into<String>, params: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            method: method.into(),
            params,
        }
    }
}

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Invalid params: {message}")]
    InvalidParams {
        message: String,
        data: Option<Value>,
    },

    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

impl RpcError {
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::InvalidParams {
            message: message.into(),
            data: None,
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            Self::Parse(_) => -32700,
            Self::InvalidRequest(_) => -32600,
            Self::MethodNotFound(_) => -32601,
            Self::InvalidParams { .. } => -32602,
            Self::Internal(_) => -32603,
        }
    }

    fn into_object(self) -> JsonRpcErrorObject {
        if let Self::Internal(e) = &self {
            tracing::error!(error = ?e, "Internal RPC error");
        }

        let code = self.code();
        let message = self.to_string();
        let data = match self {
            Self::InvalidParams { data, .. } => data,
            _ => None,
        };

        JsonRpcErrorObject {
            code,
            message,
            data,
        }
    }
}

impl From<crate::engine::ValidationError> for RpcError {
    fn from(err: crate::engine::ValidationError) -> Self {
        Self::InvalidParams {
            message: err.to_string(),
            data: Some(serde_json::json!({
                "code": "VALIDATION_ERROR",
                "issues": err.issues,
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_codes() {
        assert_eq!(RpcError::Parse("x".into()).code(), -32700);
        assert_eq!(RpcError::InvalidRequest("x".into()).code(), -32600);
        assert_eq!(RpcError::MethodNotFound("x".into()).code(), -32601);
        assert_eq!(RpcError::invalid_params("x").code(), -32602);
        assert_eq!(RpcError::Internal(anyhow::anyhow!("boom")).code(), -32603);
    }

    #[test]
    fn internal_error_hides_details() {
        let resp = JsonRpcResponse::failure(json!(1), anyhow::anyhow!("secret").into());
        let error = resp.error.unwrap();
        assert_eq!(error.message, "Internal error");
    }

    #[test]
    fn success_omits_error() {
        let value = serde_json::to_value(JsonRpcResponse::success(json!(7), json!({}))).unwrap();
        assert_eq!(value, json!({ "jsonrpc": "2.0", "id": 7, "result": {} }));
    }

    #[test]
    fn notification_detection() {
        let req: JsonRpcRequest =
            serde_json::from_value(json!({ "jsonrpc": "2.0", "method": "ping" })).unwrap();
        assert!(req.is_notification());
    }
}
