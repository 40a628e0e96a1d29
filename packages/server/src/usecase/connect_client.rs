//! UseCase: client connection.

use std::sync::Arc;

use oekaki_shared::time::Clock;

use crate::domain::{
    ClientSession, MessagePusher, PusherChannel, SessionRepository, SocketId, Timestamp,
};

/// Registers a new connection in the registry and the message pusher.
pub struct ConnectClientUseCase {
    sessions: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl ConnectClientUseCase {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            sessions,
            message_pusher,
            clock,
        }
    }

    /// Register the connection.
    ///
    /// # Arguments
    ///
    /// * `address` - remote identity used for rate limiting (forwarded
    ///   header or transport peer address)
    /// * `sender` - the client's outbound message channel
    ///
    /// # Returns
    ///
    /// The session record, including the server-assigned socket id.
    pub async fn execute(&self, address: String, sender: PusherChannel) -> ClientSession {
        let session = ClientSession::new(
            SocketId::generate(),
            address,
            Timestamp::new(self.clock.now_millis()),
        );
        self.sessions.add_session(session.clone()).await;
        self.message_pusher.register_client(session.id, sender).await;
        session
    }
}
