//! Collaborative pixel canvas server.
//!
//! Clients connect over WebSocket, place pixels on a shared raster, and
//! every accepted change is broadcast to the other connected clients. The
//! raster is persisted as a PNG snapshot on a fixed interval.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin oekaki-server
//! cargo run --bin oekaki-server -- --host 0.0.0.0 --port 3000 --width 256 --height 256
//! ```

use std::{path::PathBuf, sync::Arc, time::Duration};

use clap::Parser;
use tokio::sync::Mutex;

use oekaki_server::{
    domain::{Canvas, PixelColor, RateLimitConfig, RateLimiter, SnapshotStore},
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryCanvasRepository, InMemorySessionRepository},
        snapshot::PngSnapshotStore,
    },
    ui::Server,
    usecase::{
        ConnectClientUseCase, DisconnectClientUseCase, GetSocketsUseCase, PersistCanvasUseCase,
        PlacePixelUseCase,
    },
};
use oekaki_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "oekaki-server")]
#[command(about = "Collaborative pixel canvas server with WebSocket broadcast", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Canvas width in pixels
    #[arg(long, default_value = "1024")]
    width: u32,

    /// Canvas height in pixels
    #[arg(long, default_value = "1024")]
    height: u32,

    /// Updates allowed per client identity per refill window
    #[arg(long, default_value = "10")]
    rate_limit_points: u32,

    /// Rate limiter refill window in milliseconds
    #[arg(long, default_value = "1000")]
    rate_limit_duration_ms: u64,

    /// Interval between canvas snapshots in milliseconds
    #[arg(long, default_value = "1000")]
    persist_interval_ms: u64,

    /// Path of the persisted canvas snapshot
    #[arg(long, default_value = "data/canvas.png")]
    image_path: PathBuf,

    /// Background color for a fresh canvas, as #rrggbb
    #[arg(long, default_value = "#ffffff")]
    background: PixelColor,
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Snapshot store + canvas
    // 2. Repositories
    // 3. MessagePusher + rate limiter
    // 4. UseCases
    // 5. Server

    // 1. Load the persisted canvas, or start blank
    let store = Arc::new(PngSnapshotStore::new(
        args.image_path.clone(),
        args.width,
        args.height,
    ));
    let canvas = match store.load().await {
        Ok(Some(canvas)) => {
            tracing::info!("Loaded existing canvas from {}", args.image_path.display());
            canvas
        }
        Ok(None) => {
            tracing::info!(
                "No canvas at {}, starting blank {}x{}",
                args.image_path.display(),
                args.width,
                args.height
            );
            Canvas::blank(args.width, args.height, args.background)
        }
        Err(e) => {
            tracing::warn!("Error reading canvas snapshot, creating new blank image: {}", e);
            Canvas::blank(args.width, args.height, args.background)
        }
    };

    // 2. Create repositories (in-memory, mutex-serialized)
    let canvas_repository = Arc::new(InMemoryCanvasRepository::new(Arc::new(Mutex::new(canvas))));
    let session_repository = Arc::new(InMemorySessionRepository::new());

    // 3. Create the MessagePusher and the admission policy
    let message_pusher = Arc::new(WebSocketMessagePusher::new());
    let clock = Arc::new(SystemClock);
    let rate_limiter = Arc::new(RateLimiter::new(
        RateLimitConfig {
            points: args.rate_limit_points,
            duration_ms: args.rate_limit_duration_ms,
        },
        clock.clone(),
    ));

    // 4. Create UseCases
    let connect_client_usecase = Arc::new(ConnectClientUseCase::new(
        session_repository.clone(),
        message_pusher.clone(),
        clock.clone(),
    ));
    let disconnect_client_usecase = Arc::new(DisconnectClientUseCase::new(
        session_repository.clone(),
        message_pusher.clone(),
        rate_limiter.clone(),
    ));
    let place_pixel_usecase = Arc::new(PlacePixelUseCase::new(
        canvas_repository.clone(),
        session_repository.clone(),
        message_pusher.clone(),
        rate_limiter.clone(),
    ));
    let get_sockets_usecase = Arc::new(GetSocketsUseCase::new(session_repository.clone()));
    let persist_canvas_usecase = Arc::new(PersistCanvasUseCase::new(
        canvas_repository.clone(),
        store.clone(),
    ));

    // Materialize the snapshot file before accepting traffic
    if let Err(e) = persist_canvas_usecase.execute().await {
        tracing::warn!("Failed to write initial canvas snapshot: {}", e);
    }

    // 5. Create and run the server
    let server = Server::new(
        connect_client_usecase,
        disconnect_client_usecase,
        place_pixel_usecase,
        get_sockets_usecase,
        persist_canvas_usecase,
        canvas_repository.clone(),
        Duration::from_millis(args.persist_interval_ms),
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
