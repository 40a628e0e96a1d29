//! Server execution logic.

use std::{future::Future, net::SocketAddr, sync::Arc, time::Duration};

use axum::{Router, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use oekaki_shared::time::{get_unix_timestamp, timestamp_to_rfc3339};

use crate::domain::CanvasRepository;
use crate::usecase::{
    ConnectClientUseCase, DisconnectClientUseCase, GetSocketsUseCase, PersistCanvasUseCase,
    PlacePixelUseCase,
};

use super::{
    handler::{canvas_png, get_sockets, health_check, uptime, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Collaborative pixel canvas server.
///
/// Encapsulates the wired use cases and runs the HTTP/WebSocket surface plus
/// the snapshot persistence loop.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     connect_client_usecase,
///     disconnect_client_usecase,
///     place_pixel_usecase,
///     get_sockets_usecase,
///     persist_canvas_usecase,
///     canvas_repository,
///     Duration::from_millis(1000),
/// );
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    connect_client_usecase: Arc<ConnectClientUseCase>,
    disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    place_pixel_usecase: Arc<PlacePixelUseCase>,
    get_sockets_usecase: Arc<GetSocketsUseCase>,
    persist_canvas_usecase: Arc<PersistCanvasUseCase>,
    canvas: Arc<dyn CanvasRepository>,
    persist_interval: Duration,
    started_at: String,
}

impl Server {
    pub fn new(
        connect_client_usecase: Arc<ConnectClientUseCase>,
        disconnect_client_usecase: Arc<DisconnectClientUseCase>,
        place_pixel_usecase: Arc<PlacePixelUseCase>,
        get_sockets_usecase: Arc<GetSocketsUseCase>,
        persist_canvas_usecase: Arc<PersistCanvasUseCase>,
        canvas: Arc<dyn CanvasRepository>,
        persist_interval: Duration,
    ) -> Self {
        Self {
            connect_client_usecase,
            disconnect_client_usecase,
            place_pixel_usecase,
            get_sockets_usecase,
            persist_canvas_usecase,
            canvas,
            persist_interval,
            started_at: timestamp_to_rfc3339(get_unix_timestamp()),
        }
    }

    /// Run the server until ctrl-c / SIGTERM.
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address
    /// or if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already-bound listener until `shutdown` completes, then
    /// flush one final snapshot. Split out from [`run`] so tests can bind an
    /// ephemeral port and trigger shutdown themselves.
    ///
    /// [`run`]: Server::run
    pub async fn serve(
        self,
        listener: tokio::net::TcpListener,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let app_state = Arc::new(AppState {
            connect_client_usecase: self.connect_client_usecase,
            disconnect_client_usecase: self.disconnect_client_usecase,
            place_pixel_usecase: self.place_pixel_usecase,
            get_sockets_usecase: self.get_sockets_usecase,
            canvas: self.canvas,
            started_at: self.started_at,
        });

        // Define handlers
        let app = Router::new()
            // Liveness + introspection endpoints
            .route("/", get(uptime))
            .route("/api/health", get(health_check))
            .route("/api/sockets", get(get_sockets))
            .route("/canvas.png", get(canvas_png))
            // WebSocket endpoint
            .route("/ws", get(websocket_handler))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(app_state);

        // Snapshot persistence loop, independent of update traffic
        let persist_usecase = self.persist_canvas_usecase.clone();
        let persist_interval = self.persist_interval;
        let persist_task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(persist_interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // The first tick fires immediately; startup already materialized
            // the file, so consume it before entering the loop.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if let Err(e) = persist_usecase.execute().await {
                    tracing::warn!("Snapshot persistence failed, retrying on next tick: {}", e);
                }
            }
        });

        // Start the server
        tracing::info!("Canvas server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", listener.local_addr()?);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown)
        .await?;

        // Final best-effort flush once the listener has stopped
        persist_task.abort();
        if let Err(e) = self.persist_canvas_usecase.execute().await {
            tracing::warn!("Final snapshot flush failed: {}", e);
        }

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
