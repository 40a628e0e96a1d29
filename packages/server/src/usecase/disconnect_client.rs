//! UseCase: client disconnection.

use std::sync::Arc;

use crate::domain::{
    ClientSession, MessagePusher, RateLimiter, SessionRepository, SocketId,
};

/// Removes a connection from the registry and the message pusher, and drops
/// its rate-limiter state once no other session shares the identity.
pub struct DisconnectClientUseCase {
    sessions: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    rate_limiter: Arc<RateLimiter>,
}

impl DisconnectClientUseCase {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        rate_limiter: Arc<RateLimiter>,
    ) -> Self {
        Self {
            sessions,
            message_pusher,
            rate_limiter,
        }
    }

    /// Deregister the connection. Idempotent: an unknown socket id is a
    /// no-op returning `None`.
    pub async fn execute(&self, socket_id: SocketId) -> Option<ClientSession> {
        self.message_pusher.unregister_client(&socket_id).await;
        let removed = self.sessions.remove_session(&socket_id).await;

        if let Some(ref session) = removed {
            // Keep the bucket while another session shares the identity.
            if !self.sessions.any_with_address(&session.address).await {
                self.rate_limiter.forget(&session.address).await;
            }
        }

        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RateLimitConfig, Timestamp};
    use crate::infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemorySessionRepository,
    };
    use oekaki_shared::time::FixedClock;

    fn create_usecase() -> (
        DisconnectClientUseCase,
        Arc<InMemorySessionRepository>,
        Arc<RateLimiter>,
    ) {
        let sessions = Arc::new(InMemorySessionRepository::new());
        let rate_limiter = Arc::new(RateLimiter::new(
            RateLimitConfig::default(),
            Arc::new(FixedClock::new(1_700_000_000_000)),
        ));
        let usecase = DisconnectClientUseCase::new(
            sessions.clone(),
            Arc::new(WebSocketMessagePusher::new()),
            rate_limiter.clone(),
        );
        (usecase, sessions, rate_limiter)
    }

    fn session(address: &str) -> ClientSession {
        ClientSession::new(
            SocketId::generate(),
            address.to_string(),
            Timestamp::new(1_700_000_000_000),
        )
    }

    #[tokio::test]
    async fn test_disconnect_removes_session_and_bucket() {
        // given: one connected client with rate-limiter state
        let (usecase, sessions, rate_limiter) = create_usecase();
        let connected = session("10.0.0.1");
        sessions.add_session(connected.clone()).await;
        rate_limiter.consume("10.0.0.1").await;
        assert_eq!(rate_limiter.tracked_identities().await, 1);

        // when:
        let removed = usecase.execute(connected.id).await;

        // then:
        assert_eq!(removed, Some(connected));
        assert_eq!(sessions.count().await, 0);
        assert_eq!(rate_limiter.tracked_identities().await, 0);
    }

    #[tokio::test]
    async fn test_bucket_survives_while_identity_has_other_sessions() {
        // given: two sessions sharing one address
        let (usecase, sessions, rate_limiter) = create_usecase();
        let first = session("10.0.0.1");
        let second = session("10.0.0.1");
        sessions.add_session(first.clone()).await;
        sessions.add_session(second.clone()).await;
        rate_limiter.consume("10.0.0.1").await;

        // when: only one of them disconnects
        usecase.execute(first.id).await;

        // then: the shared bucket is retained
        assert_eq!(rate_limiter.tracked_identities().await, 1);

        // when: the last one disconnects
        usecase.execute(second.id).await;

        // then:
        assert_eq!(rate_limiter.tracked_identities().await, 0);
    }

    #[tokio::test]
    async fn test_disconnect_unknown_socket_is_noop() {
        // given:
        let (usecase, sessions, _rate_limiter) = create_usecase();

        // when:
        let removed = usecase.execute(SocketId::generate()).await;

        // then:
        assert_eq!(removed, None);
        assert_eq!(sessions.count().await, 0);
    }
}
