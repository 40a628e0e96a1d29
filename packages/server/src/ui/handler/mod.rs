//! HTTP and WebSocket handlers.

pub mod http;
pub mod websocket;

pub use http::{canvas_png, get_sockets, health_check, uptime};
pub use websocket::websocket_handler;
