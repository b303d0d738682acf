use axum::response::sse::Event;
use std::collections::HashMap;
use tokio::sync::{mpsc, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

const EVENT_BUFFER: usize = 64;

/// Tracks open SSE sessions and delivers response events to them.
///
/// A session is opened when a client connects to `/sse` and removed when its
/// receiver goes away (detected on the first failed send).
pub struct SessionManager {
    sessions: RwLock<HashMap<Uuid, mpsc::Sender<Event>>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Open a new session, returning its id and the event receiver the SSE
    /// stream drains.
    pub async fn open(&self) -> (Uuid, mpsc::Receiver<Event>) {
        let id = Uuid::new_v4();
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        self.sessions.write().await.insert(id, tx);
        info!(session_id = %id, "SSE session opened");
        (id, rx)
    }

    /// Whether the session exists.
    pub async fn contains(&self, id: Uuid) -> bool {
        self.sessions.read().await.contains_key(&id)
    }

    /// Send an event to a session. Returns false (and drops the session) if
    /// the client has gone away.
    pub async fn send(&self, id: Uuid, event: Event) -> bool {
        let sender = { self.sessions.read().await.get(&id).cloned() };
        match sender {
            Some(tx) => {
                if tx.send(event).await.is_ok() {
                    true
                } else {
                    debug!(session_id = %id, "SSE client gone, dropping session");
                    self.remove(id).await;
                    false
                }
            }
            None => false,
        }
    }

    pub async fn remove(&self, id: Uuid) {
        if self.sessions.write().await.remove(&id).is_some() {
            info!(session_id = %id, "SSE session closed");
        }
    }

    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_send_receive() {
        let manager = SessionManager::new();
        let (id, mut rx) = manager.open().await;
        assert!(manager.contains(id).await);

        assert!(manager.send(id, Event::default().data("hello")).await);
        assert!(rx.recv().await.is_some());
    }

    #[tokio::test]
    async fn test_send_to_unknown_session() {
        let manager = SessionManager::new();
        assert!(!manager.send(Uuid::new_v4(), Event::default().data("x")).await);
    }

    #[tokio::test]
    async fn test_send_after_client_gone_drops_session() {
        let manager = SessionManager::new();
        let (id, rx) = manager.open().await;
        drop(rx);

        assert!(!manager.send(id, Event::default().data("x")).await);
        assert!(!manager.contains(id).await);
        assert_eq!(manager.count().await, 0);
    }
}
