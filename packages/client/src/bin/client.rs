//! CLI client for the oekaki canvas server.
//!
//! Connects to the server's WebSocket endpoint, prints pixel events placed
//! by other clients, and sends one pixel update per `x y r g b` line read
//! from stdin.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin oekaki-client
//! cargo run --bin oekaki-client -- --url ws://127.0.0.1:8080/ws
//! ```

use clap::Parser;
use futures_util::{SinkExt, StreamExt};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_tungstenite::{connect_async, tungstenite::Message};

use oekaki_server::infrastructure::dto::websocket::PixelFrame;
use oekaki_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "oekaki-client")]
#[command(about = "CLI client for the oekaki canvas server", long_about = None)]
struct Args {
    /// WebSocket URL of the canvas server
    #[arg(long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,
}

/// Parse one `x y r g b` input line into a wire tuple. Returns `None` on
/// anything other than five integers; range checking is the server's job.
fn parse_line(line: &str) -> Option<Vec<i64>> {
    let values: Result<Vec<i64>, _> = line.split_whitespace().map(str::parse).collect();
    match values {
        Ok(values) if values.len() == 5 => Some(values),
        _ => None,
    }
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    let (stream, _) = match connect_async(args.url.as_str()).await {
        Ok(connected) => connected,
        Err(e) => {
            tracing::error!("Failed to connect to {}: {}", args.url, e);
            std::process::exit(1);
        }
    };
    tracing::info!("Connected to {}", args.url);
    tracing::info!("Type 'x y r g b' and press enter to place a pixel");

    let (mut sender, mut receiver) = stream.split();

    // Print pixel events placed by other clients
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(text)) => match serde_json::from_str::<PixelFrame>(&text) {
                    Ok(frame) => println!("pixel {:?}", frame.data),
                    Err(_) => println!("{}", text),
                },
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    break;
                }
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
                _ => {}
            }
        }
    });

    // Read `x y r g b` lines from stdin and send them as pixel frames
    let mut send_task = tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let Some(data) = parse_line(line) else {
                eprintln!("expected: x y r g b");
                continue;
            };
            let frame = PixelFrame::new(data);
            let json = match serde_json::to_string(&frame) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to serialize frame: {}", e);
                    continue;
                }
            };
            if sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
        let _ = sender.send(Message::Close(None)).await;
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    tracing::info!("Disconnected");
}
