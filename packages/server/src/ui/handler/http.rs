//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::infrastructure::dto::http::SocketsDto;
use crate::ui::state::AppState;

/// Liveness endpoint: plain-text process start time.
pub async fn uptime(State(state): State<Arc<AppState>>) -> String {
    format!("Up since {}", state.started_at)
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Connected-socket introspection.
pub async fn get_sockets(State(state): State<Arc<AppState>>) -> Json<SocketsDto> {
    let overview = state.get_sockets_usecase.execute().await;
    Json(SocketsDto::from(overview))
}

/// The current canvas, PNG-encoded on the fly.
pub async fn canvas_png(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (width, height) = state.canvas.dimensions().await;
    let raster = state.canvas.snapshot().await;

    let encoded = tokio::task::spawn_blocking(move || encode_png(width, height, raster)).await;
    match encoded {
        Ok(Ok(bytes)) => ([(header::CONTENT_TYPE, "image/png")], bytes).into_response(),
        Ok(Err(e)) => {
            tracing::error!("Failed to encode canvas PNG: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
        Err(e) => {
            tracing::error!("Canvas PNG encode task failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn encode_png(width: u32, height: u32, raster: Vec<u8>) -> Result<Vec<u8>, String> {
    let image: image::RgbaImage = image::ImageBuffer::from_raw(width, height, raster)
        .ok_or_else(|| "raster byte length mismatch".to_string())?;
    let mut buf = std::io::Cursor::new(Vec::new());
    image
        .write_to(&mut buf, image::ImageFormat::Png)
        .map_err(|e| e.to_string())?;
    Ok(buf.into_inner())
}
