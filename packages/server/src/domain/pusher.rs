//! Message pusher abstraction for outbound delivery.
//!
//! Each connected client owns an unbounded channel drained by its own
//! WebSocket task, so enqueueing here never waits on a peer's socket.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use super::session::SocketId;

/// Sender half of a client's outbound message queue.
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[derive(Debug, Error)]
pub enum MessagePushError {
    #[error("client '{0}' is not registered")]
    ClientNotFound(SocketId),
    #[error("failed to push message: {0}")]
    PushFailed(String),
}

/// Outbound message delivery, abstracted so use cases stay independent of
/// the WebSocket layer.
#[async_trait]
pub trait MessagePusher: Send + Sync {
    async fn register_client(&self, socket_id: SocketId, sender: PusherChannel);

    async fn unregister_client(&self, socket_id: &SocketId);

    /// Deliver to a single client.
    async fn push_to(&self, socket_id: &SocketId, content: &str) -> Result<(), MessagePushError>;

    /// Fire-and-forget delivery to every target; a failed or missing target
    /// must not prevent delivery to the rest.
    async fn broadcast(&self, targets: Vec<SocketId>, content: &str);
}
