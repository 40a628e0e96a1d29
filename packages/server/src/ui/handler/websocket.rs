//! WebSocket connection handlers.

use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{
        ConnectInfo, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::HeaderMap,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::ClientSession,
    infrastructure::dto::websocket::PixelFrame,
    ui::state::AppState,
    usecase::PlacePixelError,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let address = client_address(&headers, &peer);

    // Create a channel for this client to receive messages
    let (tx, rx) = mpsc::unbounded_channel();

    // Register the connection before completing the upgrade
    let session = state
        .connect_client_usecase
        .execute(address.clone(), tx)
        .await;
    tracing::info!("Client {} connected from '{}'", session.id, address);

    ws.on_upgrade(move |socket| handle_socket(socket, state, session, rx))
}

/// Rate-limit identity: first `X-Forwarded-For` entry when present (trusted
/// reverse proxy deployments only), otherwise the transport peer address.
fn client_address(headers: &HeaderMap, peer: &SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| peer.ip().to_string())
}

/// Spawns a task that receives messages from the rx channel and pushes them
/// to the WebSocket sender.
///
/// This is the outbound half of a connection: updates from other clients
/// (via the rx channel) are written to this client's socket. A slow socket
/// only backs up this task's queue, never another client's.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    session: ClientSession,
    rx: mpsc::UnboundedReceiver<String>,
) {
    let (sender, mut receiver) = socket.split();
    let socket_id = session.id;
    let address = session.address.clone();

    let state_clone = state.clone();

    // Spawn a task to receive messages from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    // Parse the incoming message
                    let frame = match serde_json::from_str::<PixelFrame>(&text) {
                        Ok(frame) => frame,
                        Err(e) => {
                            tracing::warn!("Dropping malformed frame from {}: {}", socket_id, e);
                            continue;
                        }
                    };

                    // Re-serialize the parsed frame so fan-out carries the
                    // canonical shape, not the client's raw text
                    let outbound = match serde_json::to_string(&frame) {
                        Ok(json) => json,
                        Err(e) => {
                            tracing::error!("Failed to serialize outbound frame: {}", e);
                            continue;
                        }
                    };

                    match state_clone
                        .place_pixel_usecase
                        .execute(socket_id, &address, &frame.data, outbound)
                        .await
                    {
                        Ok(outcome) => {
                            tracing::debug!("Update from {}: {:?}", socket_id, outcome);
                        }
                        Err(PlacePixelError::InvalidUpdate(e)) => {
                            tracing::warn!("Dropping invalid update from {}: {}", socket_id, e);
                        }
                        Err(PlacePixelError::RateLimitExceeded(identity)) => {
                            tracing::warn!(
                                "Disconnecting {}: rate limit exceeded for '{}'",
                                socket_id,
                                identity
                            );
                            break;
                        }
                        Err(PlacePixelError::Internal(e)) => {
                            tracing::error!(
                                "Dropped update from {} that passed validation: {}",
                                socket_id,
                                e
                            );
                        }
                    }
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Client {} requested close", socket_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to receive messages from other clients and send to this client
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state.disconnect_client_usecase.execute(socket_id).await;
    tracing::info!("Client {} disconnected", socket_id);
}
