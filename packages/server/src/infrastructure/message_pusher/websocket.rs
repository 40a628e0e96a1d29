//! WebSocket-backed MessagePusher implementation.
//!
//! Owns the map of connected clients' outbound senders. WebSocket creation
//! happens in the UI layer (`ui/handler/websocket.rs`); this implementation
//! receives the channel sender and uses it for delivery. Each sender feeds a
//! per-connection task that drains into the socket, so a slow peer only
//! backs up its own queue.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{MessagePushError, MessagePusher, PusherChannel, SocketId};

#[derive(Default)]
pub struct WebSocketMessagePusher {
    clients: Mutex<HashMap<SocketId, PusherChannel>>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, socket_id: SocketId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        clients.insert(socket_id, sender);
        tracing::debug!("Client {} registered to MessagePusher", socket_id);
    }

    async fn unregister_client(&self, socket_id: &SocketId) {
        let mut clients = self.clients.lock().await;
        clients.remove(socket_id);
        tracing::debug!("Client {} unregistered from MessagePusher", socket_id);
    }

    async fn push_to(&self, socket_id: &SocketId, content: &str) -> Result<(), MessagePushError> {
        let clients = self.clients.lock().await;

        if let Some(sender) = clients.get(socket_id) {
            sender
                .send(content.to_string())
                .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
            tracing::debug!("Pushed message to client {}", socket_id);
            Ok(())
        } else {
            Err(MessagePushError::ClientNotFound(*socket_id))
        }
    }

    async fn broadcast(&self, targets: Vec<SocketId>, content: &str) {
        let clients = self.clients.lock().await;

        for target in targets {
            if let Some(sender) = clients.get(&target) {
                // Broadcast tolerates individual delivery failures
                if let Err(e) = sender.send(content.to_string()) {
                    tracing::warn!("Failed to push message to client {}: {}", target, e);
                } else {
                    tracing::debug!("Broadcasted message to client {}", target);
                }
            } else {
                tracing::warn!("Client {} not found during broadcast, skipping", target);
            }
        }
    }
}
