//! UseCase: connected-socket introspection.

use std::sync::Arc;

use crate::domain::{ClientSession, SessionRepository};

/// Snapshot of the connection registry for the introspection endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocketsOverview {
    pub count: usize,
    pub sessions: Vec<ClientSession>,
}

pub struct GetSocketsUseCase {
    sessions: Arc<dyn SessionRepository>,
}

impl GetSocketsUseCase {
    pub fn new(sessions: Arc<dyn SessionRepository>) -> Self {
        Self { sessions }
    }

    pub async fn execute(&self) -> SocketsOverview {
        let mut sessions = self.sessions.list_sessions().await;

        // Sort by connect time (id as tie-breaker) for consistent ordering
        sessions.sort_by(|a, b| {
            a.connected_at
                .cmp(&b.connected_at)
                .then_with(|| a.id.to_string().cmp(&b.id.to_string()))
        });

        SocketsOverview {
            count: sessions.len(),
            sessions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SocketId, Timestamp};
    use crate::infrastructure::repository::InMemorySessionRepository;

    fn session(address: &str, connected_at: i64) -> ClientSession {
        ClientSession::new(
            SocketId::generate(),
            address.to_string(),
            Timestamp::new(connected_at),
        )
    }

    #[tokio::test]
    async fn test_empty_registry_yields_empty_overview() {
        // given:
        let sessions = Arc::new(InMemorySessionRepository::new());
        let usecase = GetSocketsUseCase::new(sessions);

        // when:
        let overview = usecase.execute().await;

        // then:
        assert_eq!(overview.count, 0);
        assert!(overview.sessions.is_empty());
    }

    #[tokio::test]
    async fn test_overview_lists_sessions_in_connect_order() {
        // given: three sessions registered out of connect order
        let sessions = Arc::new(InMemorySessionRepository::new());
        let late = session("10.0.0.3", 3000);
        let early = session("10.0.0.1", 1000);
        let middle = session("10.0.0.2", 2000);
        sessions.add_session(late.clone()).await;
        sessions.add_session(early.clone()).await;
        sessions.add_session(middle.clone()).await;
        let usecase = GetSocketsUseCase::new(sessions);

        // when:
        let overview = usecase.execute().await;

        // then:
        assert_eq!(overview.count, 3);
        assert_eq!(overview.sessions, vec![early, middle, late]);
    }
}
