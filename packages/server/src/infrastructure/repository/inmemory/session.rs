//! In-memory connection registry.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ClientSession, SessionRepository, SocketId};

#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: Mutex<HashMap<SocketId, ClientSession>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn add_session(&self, session: ClientSession) {
        let mut sessions = self.sessions.lock().await;
        sessions.insert(session.id, session);
    }

    async fn remove_session(&self, socket_id: &SocketId) -> Option<ClientSession> {
        let mut sessions = self.sessions.lock().await;
        sessions.remove(socket_id)
    }

    async fn list_sessions(&self) -> Vec<ClientSession> {
        let sessions = self.sessions.lock().await;
        sessions.values().cloned().collect()
    }

    async fn all_socket_ids(&self) -> Vec<SocketId> {
        let sessions = self.sessions.lock().await;
        sessions.keys().copied().collect()
    }

    async fn count(&self) -> usize {
        let sessions = self.sessions.lock().await;
        sessions.len()
    }

    async fn any_with_address(&self, address: &str) -> bool {
        let sessions = self.sessions.lock().await;
        sessions.values().any(|s| s.address == address)
    }
}
