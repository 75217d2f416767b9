//! Session registry for the notification stream
//!
//! Sessions are issued on `initialize` and end on DELETE, when their stream
//! disconnects, or once they outlive the TTL without a live stream. Each
//! session holds at most one live stream; attaching a new one replaces the
//! old.

use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use uuid::Uuid;

struct Session {
    created_at: Instant,
    stream: Option<mpsc::Sender<Value>>,
}

impl Session {
    fn has_live_stream(&self) -> bool {
        self.stream.as_ref().is_some_and(|tx| !tx.is_closed())
    }
}

#[derive(Clone)]
pub struct SessionRegistry {
    inner: Arc<RwLock<HashMap<String, Session>>>,
    channel_capacity: usize,
    ttl: Duration,
}

impl SessionRegistry {
    pub fn new(channel_capacity: usize, ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            channel_capacity: channel_capacity.max(1),
            ttl,
        }
    }

    /// Issue a fresh opaque session id. Expired sessions are swept first.
    pub fn create(&self) -> String {
        self.sweep();

        let id = Uuid::new_v4().to_string();
        self.inner.write().insert(
            id.clone(),
            Session {
                created_at: Instant::now(),
                stream: None,
            },
        );
        tracing::debug!(session_id = %id, "Session created");
        id
    }

    pub fn contains(&self, id: &str) -> bool {
        self.inner.read().contains_key(id)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Drop sessions older than the TTL unless a stream is still attached.
    /// Returns how many were removed.
    pub fn sweep(&self) -> usize {
        let mut sessions = self.inner.write();
        let before = sessions.len();
        sessions.retain(|_, s| s.created_at.elapsed() < self.ttl || s.has_live_stream());

        let removed = before - sessions.len();
        if removed > 0 {
            tracing::debug!(removed, remaining = sessions.len(), "Expired sessions swept");
        }
        removed
    }

    /// Bind a new stream to the session. `None` if the session is unknown.
    pub fn attach_stream(&self, id: &str) -> Option<SessionStream> {
        let mut sessions = self.inner.write();
        let session = sessions.get_mut(id)?;

        let (tx, rx) = mpsc::channel(self.channel_capacity);
        if session.stream.replace(tx).is_some() {
            tracing::debug!(session_id = %id, "Replaced existing session stream");
        }

        Some(SessionStream {
            receiver: rx,
            _guard: StreamGuard {
                registry: self.clone(),
                id: id.to_string(),
            },
        })
    }

    /// Push a message to the session's stream. Returns whether it was queued.
    pub fn notify(&self, id: &str, message: Value) -> bool {
        let sender = self.inner.read().get(id).and_then(|s| s.stream.clone());
        let Some(sender) = sender else {
            return false;
        };

        match sender.try_send(message) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(session_id = %id, "Session stream full, dropping notification");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                if let Some(session) = self.inner.write().get_mut(id) {
                    if session.stream.as_ref().is_some_and(|s| s.same_channel(&sender)) {
                        session.stream = None;
                    }
                }
                tracing::debug!(session_id = %id, "Session stream closed");
                false
            }
        }
    }

    pub fn remove(&self, id: &str) -> bool {
        match self.inner.write().remove(id) {
            Some(session) => {
                tracing::debug!(
                    session_id = %id,
                    age_secs = session.created_at.elapsed().as_secs(),
                    "Session removed"
                );
                true
            }
            None => false,
        }
    }

    /// Remove the session once its stream has gone away, unless a newer
    /// stream replaced it in the meantime.
    fn release_stream(&self, id: &str) {
        let mut sessions = self.inner.write();
        if sessions.get(id).is_some_and(|s| !s.has_live_stream()) {
            sessions.remove(id);
            tracing::debug!(session_id = %id, "Session removed after stream disconnect");
        }
    }
}

/// Receiving half of a session stream. Dropping it ends the session.
pub struct SessionStream {
    // Declared before the guard so the channel is closed by the time the
    // guard runs.
    receiver: mpsc::Receiver<Value>,
    _guard: StreamGuard,
}

impl SessionStream {
    pub async fn recv(&mut self) -> Option<Value> {
        self.receiver.recv().await
    }

    #[cfg(test)]
    pub fn try_recv(&mut self) -> Result<Value, mpsc::error::TryRecvError> {
        self.receiver.try_recv()
    }
}

struct StreamGuard {
    registry: SessionRegistry,
    id: String,
}

impl Drop for StreamGuard {
    fn drop(&mut self) {
        self.registry.release_stream(&self.id);
    }
}
