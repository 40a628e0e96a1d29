//! UI layer: the axum router, HTTP/WebSocket handlers, and the server
//! runner.

pub mod handler;
pub mod server;
pub mod signal;
pub mod state;

pub use server::Server;
