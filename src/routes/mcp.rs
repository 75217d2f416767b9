//! `/mcp` endpoint
//!
//! POST carries JSON-RPC messages, GET opens the server-push stream for a
//! session, DELETE ends the session.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    Json,
};
use chrono::Utc;
use futures::stream::{self, Stream};
use std::sync::Arc;
use std::time::Duration;

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};
use crate::middleware::RequestIdExt;
use crate::rpc::{self, RpcOutcome};

/// Header carrying the opaque session id.
pub const MCP_SESSION_ID: &str = "mcp-session-id";

/// A present but non-ASCII header is rejected rather than read as absent.
fn session_header(headers: &HeaderMap) -> ApiResult<Option<&str>> {
    headers
        .get(MCP_SESSION_ID)
        .map(|value| {
            value
                .to_str()
                .map_err(|_| ApiError::bad_request("Malformed Mcp-Session-Id header"))
        })
        .transpose()
}

/// POST /mcp
pub async fn handle_message(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Response> {
    let session_id = session_header(&headers)?;
    if let Some(id) = session_id {
        if !state.sessions.contains(id) {
            return Err(ApiError::not_found("Session not found"));
        }
    }

    tracing::debug!(
        request_id = headers.request_id(),
        session_id,
        body_bytes = body.len(),
        "MCP message received"
    );

    let today = Utc::now().date_naive();

    match rpc::handle_message(&state.sessions, session_id, &body, today) {
        RpcOutcome::Accepted => Ok(StatusCode::ACCEPTED.into_response()),
        RpcOutcome::Reply {
            response,
            new_session,
        } => {
            let mut res = Json(response).into_response();
            if let Some(id) = new_session.and_then(|id| HeaderValue::from_str(&id).ok()) {
                res.headers_mut().insert(MCP_SESSION_ID, id);
            }
            Ok(res)
        }
    }
}

/// GET /mcp
pub async fn open_stream(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Sse<impl Stream<Item = Result<Event, axum::Error>>>> {
    let session_id = session_header(&headers)?
        .ok_or_else(|| ApiError::bad_request("Missing Mcp-Session-Id header"))?;

    let session_stream = state
        .sessions
        .attach_stream(session_id)
        .ok_or_else(|| ApiError::not_found("Session not found"))?;

    tracing::info!(session_id = %session_id, "Notification stream opened");

    // The session ends with the stream: dropping the unfold state releases it.
    let events = stream::unfold(session_stream, |mut session_stream| async move {
        let message = session_stream.recv().await?;
        Some((Event::default().event("message").json_data(message), session_stream))
    });

    let keep_alive =
        KeepAlive::new().interval(Duration::from_secs(state.settings.sse_keepalive_seconds));

    Ok(Sse::new(events).keep_alive(keep_alive))
}

/// DELETE /mcp
pub async fn close_session(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<StatusCode> {
    let session_id = session_header(&headers)?
        .ok_or_else(|| ApiError::bad_request("Missing Mcp-Session-Id header"))?;

    if state.sessions.remove(session_id) {
        tracing::info!(session_id = %session_id, "Session closed");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Session not found"))
    }
}
